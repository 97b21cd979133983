//! Apriori frequent-itemset and association-rule mining.

use crate::data::Transaction;
use crate::encoding::{EncodedMatrix, TransactionEncoder};
use crate::mining::{FrequentItemset, Itemset, Rule, RuleSet};
use std::collections::{HashMap, HashSet};

/// Association-rule miner with support and confidence thresholds.
///
/// Itemsets are grown level by level over vocabulary column indices. A
/// candidate survives only while every subset one item smaller is itself
/// frequent, so supersets of an infrequent set are never counted.
#[derive(Debug, Clone)]
pub struct Apriori {
    min_support: f64,
    min_confidence: f64,
}

impl Default for Apriori {
    fn default() -> Self {
        Self::new()
    }
}

impl Apriori {
    /// Miner with the demo thresholds: support 0.3, confidence 0.7
    pub fn new() -> Self {
        Self {
            min_support: 0.3,
            min_confidence: 0.7,
        }
    }

    /// Set the minimum itemset support, clamped into (0, 1]
    pub fn min_support(mut self, support: f64) -> Self {
        self.min_support = clamp_threshold(support);
        self
    }

    /// Set the minimum rule confidence, clamped into (0, 1]
    pub fn min_confidence(mut self, confidence: f64) -> Self {
        self.min_confidence = clamp_threshold(confidence);
        self
    }

    /// Frequent itemsets of the encoded batch, smallest sets first
    pub fn frequent_itemsets(&self, encoded: &EncodedMatrix) -> Vec<FrequentItemset> {
        let supports = self.frequent_supports(encoded);

        let mut itemsets: Vec<FrequentItemset> = supports
            .into_iter()
            .map(|(columns, support)| FrequentItemset {
                items: columns_to_itemset(&columns, &encoded.items),
                support,
            })
            .collect();
        itemsets.sort_by(|a, b| {
            a.items
                .len()
                .cmp(&b.items.len())
                .then_with(|| a.items.cmp(&b.items))
        });
        itemsets
    }

    /// Mine rules from raw transactions
    pub fn mine(&self, transactions: &[Transaction]) -> RuleSet {
        let encoded = TransactionEncoder::encode(transactions);
        self.mine_encoded(&encoded)
    }

    /// Mine rules from an already-encoded batch.
    ///
    /// Every frequent itemset of two or more items is split into all
    /// antecedent/consequent pairs; a rule is kept when its confidence
    /// clears the threshold. An empty result is a valid outcome.
    pub fn mine_encoded(&self, encoded: &EncodedMatrix) -> RuleSet {
        let supports = self.frequent_supports(encoded);

        let mut frequent: Vec<&Vec<usize>> =
            supports.keys().filter(|c| c.len() >= 2).collect();
        frequent.sort_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)));

        let mut rules = Vec::new();
        for itemset in frequent {
            let support = match supports.get(itemset) {
                Some(&s) => s,
                None => continue,
            };

            for (antecedent, consequent) in proper_splits(itemset) {
                // Both splits of a frequent set are frequent themselves,
                // so their supports are already in the table
                let antecedent_support = match supports.get(&antecedent) {
                    Some(&s) => s,
                    None => continue,
                };
                let consequent_support = match supports.get(&consequent) {
                    Some(&s) => s,
                    None => continue,
                };

                let confidence = support / antecedent_support;
                if confidence >= self.min_confidence {
                    rules.push(Rule {
                        antecedent: columns_to_itemset(&antecedent, &encoded.items),
                        consequent: columns_to_itemset(&consequent, &encoded.items),
                        support,
                        confidence,
                        lift: confidence / consequent_support,
                    });
                }
            }
        }

        tracing::debug!(
            "{} rules above confidence {:.2}",
            rules.len(),
            self.min_confidence
        );
        RuleSet::new(rules)
    }

    /// Support table of all frequent itemsets, keyed by sorted column indices
    fn frequent_supports(&self, encoded: &EncodedMatrix) -> HashMap<Vec<usize>, f64> {
        let mut supports: HashMap<Vec<usize>, f64> = HashMap::new();
        if encoded.n_rows() == 0 {
            return supports;
        }

        let mut level: Vec<Vec<usize>> = Vec::new();
        for col in 0..encoded.n_items() {
            let candidate = vec![col];
            let support = self.support_of(encoded, &candidate);
            if support >= self.min_support {
                level.push(candidate.clone());
                supports.insert(candidate, support);
            }
        }

        while !level.is_empty() {
            let previous: HashSet<&[usize]> = level.iter().map(Vec::as_slice).collect();
            let mut next: Vec<Vec<usize>> = Vec::new();

            for candidate in join_level(&level) {
                if !subsets_frequent(&candidate, &previous) {
                    continue;
                }
                let support = self.support_of(encoded, &candidate);
                if support >= self.min_support {
                    next.push(candidate.clone());
                    supports.insert(candidate, support);
                }
            }

            if let Some(first) = next.first() {
                tracing::debug!("{} frequent itemsets of size {}", next.len(), first.len());
            }
            level = next;
        }

        supports
    }

    /// Fraction of rows whose cells are set for every column of `candidate`
    fn support_of(&self, encoded: &EncodedMatrix, candidate: &[usize]) -> f64 {
        let rows = encoded.n_rows();
        if rows == 0 {
            return 0.0;
        }

        let hits = encoded
            .matrix
            .outer_iter()
            .filter(|row| candidate.iter().all(|&col| row[col] > 0.5))
            .count();
        hits as f64 / rows as f64
    }
}

/// Mine rules with explicit thresholds over raw transactions
pub fn run_apriori(
    transactions: &[Transaction],
    min_support: f64,
    min_confidence: f64,
) -> RuleSet {
    Apriori::new()
        .min_support(min_support)
        .min_confidence(min_confidence)
        .mine(transactions)
}

/// Join size-k sets sharing their first k-1 columns into size-k+1 candidates
fn join_level(level: &[Vec<usize>]) -> Vec<Vec<usize>> {
    let mut candidates = Vec::new();
    for i in 0..level.len() {
        for j in (i + 1)..level.len() {
            let a = &level[i];
            let b = &level[j];
            if a[..a.len() - 1] != b[..b.len() - 1] {
                continue;
            }

            let last_a = a[a.len() - 1];
            let last_b = b[b.len() - 1];
            let mut candidate = a[..a.len() - 1].to_vec();
            candidate.push(last_a.min(last_b));
            candidate.push(last_a.max(last_b));
            candidates.push(candidate);
        }
    }
    candidates
}

/// Check that every subset one item smaller appears in the previous level
fn subsets_frequent(candidate: &[usize], previous: &HashSet<&[usize]>) -> bool {
    if candidate.len() <= 1 {
        return true;
    }

    let mut subset = Vec::with_capacity(candidate.len() - 1);
    for skip in 0..candidate.len() {
        subset.clear();
        for (i, &col) in candidate.iter().enumerate() {
            if i != skip {
                subset.push(col);
            }
        }
        if !previous.contains(subset.as_slice()) {
            return false;
        }
    }
    true
}

/// All splits of an itemset into two non-empty disjoint parts covering it
fn proper_splits(itemset: &[usize]) -> Vec<(Vec<usize>, Vec<usize>)> {
    let n = itemset.len();
    let mut splits = Vec::new();

    // Masks 1..2^n-1 pick the antecedent, the complement is the consequent
    for mask in 1..((1u64 << n) - 1) {
        let mut antecedent = Vec::new();
        let mut consequent = Vec::new();
        for (i, &col) in itemset.iter().enumerate() {
            if mask & (1 << i) != 0 {
                antecedent.push(col);
            } else {
                consequent.push(col);
            }
        }
        splits.push((antecedent, consequent));
    }
    splits
}

/// Map column indices back to item names
fn columns_to_itemset(columns: &[usize], items: &[String]) -> Itemset {
    columns.iter().map(|&c| items[c].clone()).collect()
}

/// Thresholds live in (0, 1]
fn clamp_threshold(value: f64) -> f64 {
    if value <= 0.0 {
        f64::EPSILON
    } else {
        value.min(1.0)
    }
}
