//! Core transaction types.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Item catalog offered by the demo shop front-end
pub const DEFAULT_CATALOG: [&str; 10] = [
    "milk", "bread", "eggs", "soda", "chips", "cereal", "juice", "butter", "cheese", "yogurt",
];

/// A single shopping-cart transaction.
///
/// Serializes transparently as a JSON array of item names, so a persisted
/// batch is a plain array of arrays of strings. Item order and duplicates
/// are kept as recorded; mining reads membership through [`Transaction::distinct`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Transaction {
    items: Vec<String>,
}

impl Transaction {
    /// Create a transaction from owned item names
    pub fn new(items: Vec<String>) -> Self {
        Self { items }
    }

    /// Create a transaction from anything iterable over item names
    pub fn from_items<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            items: items.into_iter().map(Into::into).collect(),
        }
    }

    /// Items exactly as recorded, duplicates included
    pub fn items(&self) -> &[String] {
        &self.items
    }

    /// Distinct items in lexicographic order
    pub fn distinct(&self) -> BTreeSet<&str> {
        self.items.iter().map(String::as_str).collect()
    }

    /// Check whether the cart records the item at least once
    pub fn contains(&self, item: &str) -> bool {
        self.items.iter().any(|i| i == item)
    }

    /// Number of recorded items, duplicates counted
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check whether the cart holds no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl From<Vec<String>> for Transaction {
    fn from(items: Vec<String>) -> Self {
        Self::new(items)
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.items.join(", "))
    }
}

/// Occurrence count for one item across a batch of transactions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemCount {
    /// Item name
    pub item: String,
    /// Times the item was recorded
    pub count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transaction_serializes_as_bare_array() {
        let txn = Transaction::from_items(["milk", "bread"]);
        let json = serde_json::to_string(&txn).unwrap();
        assert_eq!(json, r#"["milk","bread"]"#);

        let back: Transaction = serde_json::from_str(&json).unwrap();
        assert_eq!(back, txn);
    }

    #[test]
    fn test_distinct_deduplicates_and_sorts() {
        let txn = Transaction::from_items(["milk", "bread", "milk"]);
        let distinct: Vec<&str> = txn.distinct().into_iter().collect();
        assert_eq!(distinct, vec!["bread", "milk"]);
        assert_eq!(txn.len(), 3);
    }

    #[test]
    fn test_contains() {
        let txn = Transaction::from_items(["eggs"]);
        assert!(txn.contains("eggs"));
        assert!(!txn.contains("milk"));
    }

    #[test]
    fn test_catalog_has_ten_items() {
        assert_eq!(DEFAULT_CATALOG.len(), 10);
        assert!(DEFAULT_CATALOG.contains(&"milk"));
    }
}
