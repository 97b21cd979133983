//! # Basket Mining
//!
//! A Rust library for market-basket analysis of shopping-cart
//! transactions.
//!
//! ## Overview
//!
//! This library provides:
//! - Flat-file transaction storage behind an injectable store trait
//! - Binary membership encoding of carts over the batch vocabulary
//! - K-means clustering of encoded carts with seedable initialization
//! - Apriori association-rule mining with support, confidence, and lift
//! - Item popularity summaries for quick insights
//!
//! ## Example
//!
//! ```rust
//! use basket_mining::{
//!     cluster::KMeans,
//!     data::{MemoryStore, Transaction, TransactionStore},
//!     encoding::TransactionEncoder,
//!     mining::Apriori,
//! };
//!
//! fn main() -> anyhow::Result<()> {
//!     // Record a few carts
//!     let store = MemoryStore::new();
//!     store.add(Transaction::from_items(["milk", "bread"]))?;
//!     store.add(Transaction::from_items(["milk", "bread"]))?;
//!     store.add(Transaction::from_items(["milk"]))?;
//!     store.add(Transaction::from_items(["bread", "eggs"]))?;
//!     store.add(Transaction::from_items(["eggs"]))?;
//!
//!     // Cluster the encoded carts
//!     let transactions = store.load()?;
//!     let encoded = TransactionEncoder::encode(&transactions);
//!     let fit = KMeans::new(2).seed(42).fit(&encoded.matrix)?;
//!     for row in fit.cluster_counts() {
//!         println!("{}: {}", row.label, row.count);
//!     }
//!
//!     // Mine association rules
//!     let rules = Apriori::new()
//!         .min_support(0.4)
//!         .min_confidence(0.6)
//!         .mine(&transactions);
//!     for rule in rules.iter() {
//!         println!("{}", rule);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod cluster;
pub mod config;
pub mod data;
pub mod encoding;
pub mod mining;

// Re-export main types for convenience
pub use cluster::{run_kmeans, ClusterCount, InsufficientDataError, KMeans, KMeansFit};
pub use config::Config;
pub use data::{
    item_popularity, most_popular, ItemCount, JsonFileStore, MemoryStore, StorageError,
    Transaction, TransactionStore, DEFAULT_CATALOG, MIN_TRANSACTIONS,
};
pub use encoding::{EncodedMatrix, TransactionEncoder};
pub use mining::{run_apriori, Apriori, FrequentItemset, Itemset, Rule, RuleSet};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::cluster::{run_kmeans, ClusterCount, KMeans, KMeansFit};
    pub use crate::config::Config;
    pub use crate::data::{
        item_popularity, most_popular, JsonFileStore, MemoryStore, Transaction,
        TransactionStore, MIN_TRANSACTIONS,
    };
    pub use crate::encoding::{EncodedMatrix, TransactionEncoder};
    pub use crate::mining::{run_apriori, Apriori, Rule, RuleSet};
}
