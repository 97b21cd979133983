//! K-means clustering of encoded transactions.
//!
//! This module provides:
//! - The `KMeans` engine with seedable initialization
//! - Fit results with per-cluster counts and inertia
//! - `run_kmeans` for the encode-then-fit path front-ends use

mod kmeans;

pub use kmeans::{run_kmeans, InsufficientDataError, KMeans, KMeansFit};

use serde::{Deserialize, Serialize};

/// Display row for one cluster
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterCount {
    /// Human-facing label, "Cluster 1" through "Cluster k"
    pub label: String,
    /// Number of transactions assigned to the cluster
    pub count: usize,
}
