//! Itemset representation for association mining.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// An ordered set of item names.
///
/// Backed by a `BTreeSet`, so iteration is lexicographic and equal sets
/// compare equal regardless of construction order.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Itemset(BTreeSet<String>);

impl Itemset {
    /// Create an empty itemset
    pub fn new() -> Self {
        Self(BTreeSet::new())
    }

    /// Build from anything iterable over item names
    pub fn from_items<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(items.into_iter().map(Into::into).collect())
    }

    /// Number of items
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check whether the set holds no items
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Check membership of one item
    pub fn contains(&self, item: &str) -> bool {
        self.0.contains(item)
    }

    /// Check whether every item of `self` appears in `other`
    pub fn is_subset(&self, other: &Itemset) -> bool {
        self.0.is_subset(&other.0)
    }

    /// Check whether the two sets share no items
    pub fn is_disjoint(&self, other: &Itemset) -> bool {
        self.0.is_disjoint(&other.0)
    }

    /// Items in lexicographic order
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.0.iter().map(String::as_str)
    }

    /// Set union with another itemset
    pub fn union(&self, other: &Itemset) -> Itemset {
        Self(self.0.union(&other.0).cloned().collect())
    }

    /// Items of `self` not present in `other`
    pub fn difference(&self, other: &Itemset) -> Itemset {
        Self(self.0.difference(&other.0).cloned().collect())
    }

    /// Insert one item
    pub fn insert(&mut self, item: impl Into<String>) {
        self.0.insert(item.into());
    }
}

impl<S: Into<String>> FromIterator<S> for Itemset {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::from_items(iter)
    }
}

impl fmt::Display for Itemset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, item) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", item)?;
        }
        write!(f, "}}")
    }
}

/// An itemset whose support cleared the mining threshold
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrequentItemset {
    /// The items
    pub items: Itemset,
    /// Fraction of transactions containing all of them
    pub support: f64,
}
