//! Durable message repository
//!
//! The broker persists every published message so that it can be fetched
//! later by id. This crate defines that narrow repository seam:
//! - `StoredMessage`: the record persisted per `(subject, id)` key
//! - `MessageStore`: the async put/get trait the broker writes through
//! - `SledStore`: the durable backend, one tree per namespaced subject
//! - `MemoryStore`: a HashMap-backed store for tests and ephemeral use
//!
//! Consistency note: implementations must provide read-your-writes for a
//! single `(subject, id)` key — the broker fetches ids immediately after
//! publishing them. Retry and backend pooling are the store's business.

pub mod memory_store;
pub mod sled_store;

mod tests;

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use memory_store::MemoryStore;
pub use sled_store::SledStore;

/// Errors surfaced by a message store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage backend error: {0}")]
    Backend(#[from] sled::Error),
    #[error("record encoding error: {0}")]
    Encoding(#[from] serde_json::Error),
}

/// One persisted message, keyed by `(subject, id)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredMessage {
    pub subject: String,
    pub id: u64,
    pub body: String,
    /// How long after publication the record stays retrievable.
    /// `Duration::ZERO` means forever.
    pub expiration: Duration,
    /// Milliseconds since the UNIX epoch, captured at publish time.
    pub published_at: i64,
}

impl StoredMessage {
    /// Whether this record's time-to-live has elapsed as of `now_ms`.
    pub fn is_expired(&self, now_ms: i64) -> bool {
        if self.expiration.is_zero() {
            return false;
        }
        now_ms.saturating_sub(self.published_at) >= self.expiration.as_millis() as i64
    }
}

/// The repository the broker writes on publish and reads on fetch.
#[async_trait]
pub trait MessageStore: Send + Sync {
    /// Persist `record` under its `(subject, id)` key.
    async fn put(&self, record: &StoredMessage) -> Result<(), StoreError>;

    /// Load the record stored under `(subject, id)`, if any.
    async fn get(&self, subject: &str, id: u64) -> Result<Option<StoredMessage>, StoreError>;
}
