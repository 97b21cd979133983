//! Lloyd's k-means over binary membership rows.

use crate::cluster::ClusterCount;
use crate::data::Transaction;
use crate::encoding::TransactionEncoder;
use ndarray::{Array2, ArrayView1};
use rand::prelude::*;
use thiserror::Error;

/// Too few rows to seed the requested number of clusters
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("insufficient data: {rows} transactions cannot seed {clusters} clusters")]
pub struct InsufficientDataError {
    /// Rows available in the input matrix
    pub rows: usize,
    /// Clusters requested
    pub clusters: usize,
}

/// K-means engine configured through builder methods.
///
/// Initial centroids are `k` distinct rows drawn uniformly without
/// replacement. A cluster left empty after assignment is reseeded from a
/// random row, so every run returns exactly `k` clusters.
#[derive(Debug, Clone)]
pub struct KMeans {
    k: usize,
    max_iters: usize,
    tolerance: f64,
    seed: Option<u64>,
}

impl KMeans {
    /// Engine with `k` clusters (clamped to at least 1), a 100 iteration
    /// cap, tolerance 1e-4, and entropy seeding
    pub fn new(k: usize) -> Self {
        Self {
            k: k.max(1),
            max_iters: 100,
            tolerance: 1e-4,
            seed: None,
        }
    }

    /// Set the iteration cap (clamped to at least 1)
    pub fn max_iters(mut self, max_iters: usize) -> Self {
        self.max_iters = max_iters.max(1);
        self
    }

    /// Set the convergence threshold on total centroid shift
    pub fn tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance.max(0.0);
        self
    }

    /// Fix the RNG seed so initialization and empty-cluster recovery
    /// are reproducible
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Number of clusters the engine will produce
    pub fn k(&self) -> usize {
        self.k
    }

    /// Partition the rows of `data`, drawing randomness from the configured
    /// seed or from entropy when unseeded
    pub fn fit(&self, data: &Array2<f64>) -> Result<KMeansFit, InsufficientDataError> {
        let mut rng: StdRng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        self.fit_with_rng(data, &mut rng)
    }

    /// Partition the rows of `data` using a caller-supplied RNG
    pub fn fit_with_rng<R: Rng + ?Sized>(
        &self,
        data: &Array2<f64>,
        rng: &mut R,
    ) -> Result<KMeansFit, InsufficientDataError> {
        let rows = data.nrows();
        if rows < self.k {
            return Err(InsufficientDataError {
                rows,
                clusters: self.k,
            });
        }

        let mut centroids = Array2::zeros((self.k, data.ncols()));
        let chosen: Vec<usize> = (0..rows).choose_multiple(&mut *rng, self.k);
        for (c, &row) in chosen.iter().enumerate() {
            centroids.row_mut(c).assign(&data.row(row));
        }

        let mut labels = vec![0usize; rows];
        let mut iterations = 0;
        let mut converged = false;

        for _ in 0..self.max_iters {
            iterations += 1;

            // Assignment: nearest centroid, ties to the lowest index
            for (row, point) in data.outer_iter().enumerate() {
                let mut best = 0usize;
                let mut best_dist = euclidean(&point, &centroids.row(0));
                for c in 1..self.k {
                    let dist = euclidean(&point, &centroids.row(c));
                    if dist < best_dist {
                        best_dist = dist;
                        best = c;
                    }
                }
                labels[row] = best;
            }

            // Update: member mean per cluster, random row for empty clusters
            let mut new_centroids = Array2::zeros((self.k, data.ncols()));
            let mut members = vec![0usize; self.k];
            for (row, &label) in labels.iter().enumerate() {
                members[label] += 1;
                let mut acc = new_centroids.row_mut(label);
                acc += &data.row(row);
            }
            for c in 0..self.k {
                if members[c] > 0 {
                    let mut centroid = new_centroids.row_mut(c);
                    centroid /= members[c] as f64;
                } else {
                    let row = rng.gen_range(0..rows);
                    tracing::debug!("cluster {} is empty, reseeding from row {}", c, row);
                    new_centroids.row_mut(c).assign(&data.row(row));
                }
            }

            let shift: f64 = (0..self.k)
                .map(|c| euclidean(&centroids.row(c), &new_centroids.row(c)))
                .sum();
            centroids = new_centroids;

            if shift < self.tolerance {
                converged = true;
                tracing::debug!("converged after {} iterations, shift {:.6}", iterations, shift);
                break;
            }
        }

        let counts = count_labels(&labels, self.k);
        let inertia = compute_inertia(data, &labels, &centroids);

        Ok(KMeansFit {
            centroids,
            labels,
            counts,
            inertia,
            iterations,
            converged,
        })
    }
}

/// Outcome of one k-means run
#[derive(Debug, Clone)]
pub struct KMeansFit {
    /// Final centroids, one row per cluster
    pub centroids: Array2<f64>,
    /// Cluster index assigned to each input row
    pub labels: Vec<usize>,
    /// Rows per cluster; sums to the input row count
    pub counts: Vec<usize>,
    /// Within-cluster sum of squared distances
    pub inertia: f64,
    /// Iterations executed
    pub iterations: usize,
    /// Whether the centroid shift dropped below tolerance before the cap.
    /// A capped run still returns its final partition.
    pub converged: bool,
}

impl KMeansFit {
    /// Number of clusters
    pub fn k(&self) -> usize {
        self.counts.len()
    }

    /// Display table labeled "Cluster 1" through "Cluster k"
    pub fn cluster_counts(&self) -> Vec<ClusterCount> {
        self.counts
            .iter()
            .enumerate()
            .map(|(c, &count)| ClusterCount {
                label: format!("Cluster {}", c + 1),
                count,
            })
            .collect()
    }

    /// Largest cluster by member count, first on ties
    pub fn largest(&self) -> Option<ClusterCount> {
        let mut best: Option<(usize, usize)> = None;
        for (c, &count) in self.counts.iter().enumerate() {
            if best.map_or(true, |(_, b)| count > b) {
                best = Some((c, count));
            }
        }
        best.map(|(c, count)| ClusterCount {
            label: format!("Cluster {}", c + 1),
            count,
        })
    }

    /// Smallest cluster by member count, first on ties
    pub fn smallest(&self) -> Option<ClusterCount> {
        let mut best: Option<(usize, usize)> = None;
        for (c, &count) in self.counts.iter().enumerate() {
            if best.map_or(true, |(_, b)| count < b) {
                best = Some((c, count));
            }
        }
        best.map(|(c, count)| ClusterCount {
            label: format!("Cluster {}", c + 1),
            count,
        })
    }
}

/// Encode `transactions` and cluster them with the demo defaults
pub fn run_kmeans(
    transactions: &[Transaction],
    k: usize,
) -> Result<Vec<ClusterCount>, InsufficientDataError> {
    let encoded = TransactionEncoder::encode(transactions);
    let fit = KMeans::new(k).fit(&encoded.matrix)?;
    Ok(fit.cluster_counts())
}

/// Euclidean distance between two equal-length rows
fn euclidean(a: &ArrayView1<f64>, b: &ArrayView1<f64>) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y).powi(2))
        .sum::<f64>()
        .sqrt()
}

fn count_labels(labels: &[usize], k: usize) -> Vec<usize> {
    let mut counts = vec![0usize; k];
    for &label in labels {
        counts[label] += 1;
    }
    counts
}

/// Within-cluster sum of squared distances to the assigned centroid
fn compute_inertia(data: &Array2<f64>, labels: &[usize], centroids: &Array2<f64>) -> f64 {
    labels
        .iter()
        .enumerate()
        .map(|(row, &label)| {
            let d = euclidean(&data.row(row), &centroids.row(label));
            d * d
        })
        .sum()
}
