//! Association-rule mining over transaction batches.
//!
//! This module provides:
//! - Apriori frequent-itemset enumeration with anti-monotone pruning
//! - Rule generation with support, confidence, and lift metrics
//! - Typed rule tables for display layers

mod apriori;
mod itemset;
mod rules;

pub use apriori::{run_apriori, Apriori};
pub use itemset::{FrequentItemset, Itemset};
pub use rules::{Rule, RuleSet};
