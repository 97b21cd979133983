//! Transaction persistence.
//!
//! The canonical store is a single JSON file holding an array of arrays of
//! item names. Every mutation reads the whole list and rewrites it, which
//! keeps the format trivially inspectable at teaching scale.

use crate::data::Transaction;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use tempfile::NamedTempFile;
use thiserror::Error;

/// Minimum number of stored transactions before mining is offered.
/// Policy value for front-ends; the store itself never enforces it.
pub const MIN_TRANSACTIONS: usize = 5;

/// Errors from reading or writing the persisted transaction list
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem failure
    #[error("storage IO error: {0}")]
    Io(#[from] std::io::Error),
    /// File exists but does not hold a valid transaction array
    #[error("storage format error: {0}")]
    Format(#[from] serde_json::Error),
}

/// Whole-batch transaction storage.
///
/// `add` is load-then-save with no cross-process locking: concurrent writers
/// over one backing file race and the last writer wins.
pub trait TransactionStore {
    /// Load the full transaction sequence. A store that has never been
    /// written is empty, not an error.
    fn load(&self) -> Result<Vec<Transaction>, StorageError>;

    /// Replace the persisted sequence wholesale
    fn save(&self, transactions: &[Transaction]) -> Result<(), StorageError>;

    /// Append one transaction at the end of the sequence
    fn add(&self, transaction: Transaction) -> Result<(), StorageError> {
        let mut transactions = self.load()?;
        transactions.push(transaction);
        self.save(&transactions)
    }
}

/// File-backed store persisting a JSON array of arrays of item names
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store over the given file path. The file appears on the
    /// first `save`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TransactionStore for JsonFileStore {
    fn load(&self) -> Result<Vec<Transaction>, StorageError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.path)?;
        let transactions: Vec<Transaction> = serde_json::from_str(&content)?;

        tracing::debug!(
            "loaded {} transactions from {}",
            transactions.len(),
            self.path.display()
        );
        Ok(transactions)
    }

    fn save(&self, transactions: &[Transaction]) -> Result<(), StorageError> {
        let parent = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent)?;

        // Write to a sibling temp file and rename over the target so a
        // concurrent reader never sees a half-written list.
        let mut tmp = NamedTempFile::new_in(parent)?;
        let payload = serde_json::to_string(transactions)?;
        tmp.write_all(payload.as_bytes())?;
        tmp.persist(&self.path).map_err(|e| StorageError::Io(e.error))?;

        Ok(())
    }
}

/// In-memory store for tests and library embedding
#[derive(Debug, Default)]
pub struct MemoryStore {
    transactions: RwLock<Vec<Transaction>>,
}

impl MemoryStore {
    /// Create an empty in-memory store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with transactions
    pub fn with_transactions(transactions: Vec<Transaction>) -> Self {
        Self {
            transactions: RwLock::new(transactions),
        }
    }
}

impl TransactionStore for MemoryStore {
    fn load(&self) -> Result<Vec<Transaction>, StorageError> {
        Ok(self
            .transactions
            .read()
            .map(|t| t.clone())
            .unwrap_or_default())
    }

    fn save(&self, transactions: &[Transaction]) -> Result<(), StorageError> {
        if let Ok(mut guard) = self.transactions.write() {
            *guard = transactions.to_vec();
        }
        Ok(())
    }
}
