//! Checkpoint trait and storage error types

use crate::model::WorkKey;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Durable completion tracking for one crawl stage.
///
/// Once a key is marked complete the orchestrator never reprocesses it unless
/// the store is explicitly cleared — this is the central resumability
/// guarantee. Implementations persist their whole document after every
/// successful mark.
pub trait Checkpoint {
    /// What a completed key materialized (discovered URLs, an identity key).
    type Payload;

    fn is_complete(&self, key: &WorkKey) -> bool;

    /// Marks `key` complete with its payload and persists the document.
    fn mark_complete(&mut self, key: &WorkKey, payload: Self::Payload) -> StorageResult<()>;

    /// All keys currently marked complete.
    fn completed_keys(&self) -> Vec<WorkKey>;
}
