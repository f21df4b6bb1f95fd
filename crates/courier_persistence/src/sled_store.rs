//! Message store backed by `sled`
//!
//! Records live in one sled tree per namespaced subject. Keys are the
//! message id in big-endian bytes so iteration order matches publication
//! order; values are JSON-encoded `StoredMessage`s.
//!
//! The namespace selects the logical keyspace inside one database: two
//! stores opened over different namespaces never see each other's records.

use async_trait::async_trait;
use sled::Db;

use crate::{MessageStore, StoreError, StoredMessage};

#[derive(Clone)]
pub struct SledStore {
    db: Db,
    namespace: String,
}

impl SledStore {
    /// Open or create the database at `path`, scoping every subject tree
    /// under `namespace`.
    pub fn open(path: &str, namespace: &str) -> Result<Self, StoreError> {
        let db = sled::open(path)?;
        Ok(Self {
            db,
            namespace: namespace.to_string(),
        })
    }

    fn tree_name(&self, subject: &str) -> String {
        format!("{}/{}", self.namespace, subject)
    }
}

#[async_trait]
impl MessageStore for SledStore {
    async fn put(&self, record: &StoredMessage) -> Result<(), StoreError> {
        let tree = self.db.open_tree(self.tree_name(&record.subject))?;
        let value = serde_json::to_vec(record)?;
        tree.insert(record.id.to_be_bytes(), value)?;
        Ok(())
    }

    async fn get(&self, subject: &str, id: u64) -> Result<Option<StoredMessage>, StoreError> {
        let tree = self.db.open_tree(self.tree_name(subject))?;
        match tree.get(id.to_be_bytes())? {
            Some(raw) => Ok(Some(serde_json::from_slice(&raw)?)),
            None => Ok(None),
        }
    }
}

impl std::fmt::Debug for SledStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SledStore")
            .field("namespace", &self.namespace)
            .finish_non_exhaustive()
    }
}
