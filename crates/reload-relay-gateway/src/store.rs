use std::sync::RwLock;

use chrono::{DateTime, Utc};
use relay::TransactionStatus;
use serde::{Deserialize, Serialize};

/// A committed reload. Never mutated once appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub reference: String,
    pub msisdn: String,
    pub promo: String,
    pub amount: i64,
    /// Whatever the caller submitted, or `"UNKNOWN"`.
    pub network: String,
    pub status: TransactionStatus,
    pub timestamp: DateTime<Utc>,
    pub remote_addr: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("transaction store lock poisoned")]
    Poisoned,
}

/// Trait for transaction storage backends.
///
/// Implementations must be thread-safe (`Send + Sync`) and append-only:
/// records are never removed or rewritten.
pub trait TransactionStore: Send + Sync {
    /// Append a record and return its 1-based position.
    ///
    /// The append and the position are computed atomically with respect to
    /// other appends.
    fn append(&self, record: TransactionRecord) -> Result<usize, StoreError>;

    /// Number of records stored.
    fn len(&self) -> Result<usize, StoreError>;

    fn is_empty(&self) -> Result<bool, StoreError> {
        self.len().map(|n| n == 0)
    }

    /// The `limit` most recent records, oldest first, plus the total size
    /// observed in the same snapshot.
    fn recent(&self, limit: usize) -> Result<(usize, Vec<TransactionRecord>), StoreError>;

    /// Exact-match lookup by reference.
    fn find(&self, reference: &str) -> Result<Option<TransactionRecord>, StoreError>;
}

/// In-memory queue backed by a `Vec` behind an `RwLock`. Lost on restart.
#[derive(Default)]
pub struct InMemoryQueue {
    records: RwLock<Vec<TransactionRecord>>,
}

impl InMemoryQueue {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TransactionStore for InMemoryQueue {
    fn append(&self, record: TransactionRecord) -> Result<usize, StoreError> {
        let mut records = self.records.write().map_err(|_| StoreError::Poisoned)?;
        records.push(record);
        Ok(records.len())
    }

    fn len(&self) -> Result<usize, StoreError> {
        let records = self.records.read().map_err(|_| StoreError::Poisoned)?;
        Ok(records.len())
    }

    fn recent(&self, limit: usize) -> Result<(usize, Vec<TransactionRecord>), StoreError> {
        let records = self.records.read().map_err(|_| StoreError::Poisoned)?;
        let start = records.len().saturating_sub(limit);
        Ok((records.len(), records[start..].to_vec()))
    }

    fn find(&self, reference: &str) -> Result<Option<TransactionRecord>, StoreError> {
        let records = self.records.read().map_err(|_| StoreError::Poisoned)?;
        Ok(records.iter().find(|r| r.reference == reference).cloned())
    }
}
