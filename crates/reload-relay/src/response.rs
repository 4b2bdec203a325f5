use serde::{Deserialize, Serialize};

/// Lifecycle state reported by the gateway.
///
/// `NotFound` is only ever synthesized for lookups; it is never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionStatus {
    Queued,
    NotFound,
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Queued => "QUEUED",
            TransactionStatus::NotFound => "NOT_FOUND",
        }
    }
}

/// Body returned by the gateway's `POST /reload` on success.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueReceipt {
    pub status: TransactionStatus,
    pub reference: String,
    /// 1-based position in the queue at the moment of insertion.
    pub queue_position: usize,
}

/// Error body shared by both services: `{"status": ..., "message": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusMessage {
    pub status: String,
    pub message: String,
}

impl StatusMessage {
    pub fn new(status: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            message: message.into(),
        }
    }
}
