//! Binary membership encoding of transactions.
//!
//! Variable-length carts become a fixed-width 0/1 matrix over the batch
//! vocabulary. Both mining engines consume this representation, and the
//! column order is pinned so identical input always encodes identically.

use crate::data::Transaction;
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One-hot membership encoder over a fitted item vocabulary.
///
/// The vocabulary is the sorted distinct item set of the batch seen at fit
/// time, so column order never depends on insertion order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionEncoder {
    items: Vec<String>,
}

impl TransactionEncoder {
    /// Learn the vocabulary of a batch: all distinct items, sorted
    pub fn fit(transactions: &[Transaction]) -> Self {
        let vocabulary: BTreeSet<&str> = transactions
            .iter()
            .flat_map(|txn| txn.distinct())
            .collect();

        Self {
            items: vocabulary.into_iter().map(str::to_string).collect(),
        }
    }

    /// Fitted vocabulary, in column order
    pub fn items(&self) -> &[String] {
        &self.items
    }

    /// Column index of an item, if it is in the vocabulary
    pub fn column_of(&self, item: &str) -> Option<usize> {
        self.items
            .binary_search_by(|probe| probe.as_str().cmp(item))
            .ok()
    }

    /// Encode transactions against the fitted vocabulary.
    ///
    /// Rows follow input order. A cell is 1.0 when the transaction contains
    /// the column's item at least once; items outside the vocabulary are
    /// ignored.
    pub fn transform(&self, transactions: &[Transaction]) -> Array2<f64> {
        let mut matrix = Array2::zeros((transactions.len(), self.items.len()));
        for (row, txn) in transactions.iter().enumerate() {
            for item in txn.distinct() {
                if let Some(col) = self.column_of(item) {
                    matrix[[row, col]] = 1.0;
                }
            }
        }
        matrix
    }

    /// Fit and transform one batch, bundling matrix and vocabulary
    pub fn encode(transactions: &[Transaction]) -> EncodedMatrix {
        let encoder = Self::fit(transactions);
        let matrix = encoder.transform(transactions);
        EncodedMatrix {
            matrix,
            items: encoder.items,
        }
    }
}

/// A batch of transactions as a binary membership matrix
#[derive(Debug, Clone)]
pub struct EncodedMatrix {
    /// Rows are transactions in input order, columns follow `items`,
    /// cells are 0.0 or 1.0
    pub matrix: Array2<f64>,
    /// Column vocabulary in lexicographic order
    pub items: Vec<String>,
}

impl EncodedMatrix {
    /// Number of encoded transactions
    pub fn n_rows(&self) -> usize {
        self.matrix.nrows()
    }

    /// Number of vocabulary items
    pub fn n_items(&self) -> usize {
        self.matrix.ncols()
    }
}
