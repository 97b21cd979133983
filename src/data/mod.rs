//! Data module for transaction handling and persistence.
//!
//! This module provides:
//! - The shopping-cart transaction type and item catalog
//! - File-backed and in-memory transaction stores
//! - Item popularity counts for quick insights

mod popularity;
mod store;
mod types;

pub use popularity::{item_popularity, most_popular};
pub use store::{JsonFileStore, MemoryStore, StorageError, TransactionStore, MIN_TRANSACTIONS};
pub use types::{ItemCount, Transaction, DEFAULT_CATALOG};
