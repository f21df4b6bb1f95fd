//! In-memory message store
//!
//! Same read-your-writes contract as the durable store, minus the
//! durability. Backs unit tests and ephemeral deployments.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::{MessageStore, StoreError, StoredMessage};

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Arc<Mutex<HashMap<(String, u64), StoredMessage>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MessageStore for MemoryStore {
    async fn put(&self, record: &StoredMessage) -> Result<(), StoreError> {
        let mut records = self.records.lock().await;
        records.insert((record.subject.clone(), record.id), record.clone());
        Ok(())
    }

    async fn get(&self, subject: &str, id: u64) -> Result<Option<StoredMessage>, StoreError> {
        let records = self.records.lock().await;
        Ok(records.get(&(subject.to_string(), id)).cloned())
    }
}
