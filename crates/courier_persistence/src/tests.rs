#[cfg(test)]
mod persistence_tests {
    use std::time::Duration;

    use tempfile::tempdir;

    use crate::{MemoryStore, MessageStore, SledStore, StoredMessage};

    fn record(subject: &str, id: u64, body: &str) -> StoredMessage {
        StoredMessage {
            subject: subject.to_string(),
            id,
            body: body.to_string(),
            expiration: Duration::ZERO,
            published_at: 1_725_000_000_000,
        }
    }

    #[tokio::test]
    async fn sled_put_then_get_roundtrip() {
        let dir = tempdir().unwrap();
        let store = SledStore::open(dir.path().to_str().unwrap(), "test").unwrap();

        let rec = record("orders", 1, "hello");
        store.put(&rec).await.unwrap();

        let loaded = store.get("orders", 1).await.unwrap();
        assert_eq!(loaded, Some(rec));
    }

    #[tokio::test]
    async fn sled_get_missing_id_returns_none() {
        let dir = tempdir().unwrap();
        let store = SledStore::open(dir.path().to_str().unwrap(), "test").unwrap();

        store.put(&record("orders", 1, "hello")).await.unwrap();

        assert_eq!(store.get("orders", 2).await.unwrap(), None);
    }

    #[tokio::test]
    async fn sled_subjects_do_not_share_ids() {
        let dir = tempdir().unwrap();
        let store = SledStore::open(dir.path().to_str().unwrap(), "test").unwrap();

        store.put(&record("orders", 7, "for orders")).await.unwrap();

        assert_eq!(store.get("invoices", 7).await.unwrap(), None);
    }

    #[tokio::test]
    async fn sled_overwrite_is_last_write_wins() {
        let dir = tempdir().unwrap();
        let store = SledStore::open(dir.path().to_str().unwrap(), "test").unwrap();

        store.put(&record("orders", 1, "first")).await.unwrap();
        store.put(&record("orders", 1, "second")).await.unwrap();

        let loaded = store.get("orders", 1).await.unwrap().unwrap();
        assert_eq!(loaded.body, "second");
    }

    #[tokio::test]
    async fn sled_records_survive_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().to_str().unwrap().to_string();

        {
            let store = SledStore::open(&path, "test").unwrap();
            store.put(&record("orders", 3, "durable")).await.unwrap();
        }

        let store = SledStore::open(&path, "test").unwrap();
        let loaded = store.get("orders", 3).await.unwrap().unwrap();
        assert_eq!(loaded.body, "durable");
    }

    #[tokio::test]
    async fn sled_namespaces_are_isolated() {
        let dir = tempdir().unwrap();
        let path = dir.path().to_str().unwrap().to_string();

        {
            let store = SledStore::open(&path, "blue").unwrap();
            store.put(&record("orders", 1, "blue record")).await.unwrap();
        }

        let store = SledStore::open(&path, "green").unwrap();
        assert_eq!(store.get("orders", 1).await.unwrap(), None);
    }

    #[tokio::test]
    async fn memory_put_then_get_roundtrip() {
        let store = MemoryStore::new();

        let rec = record("orders", 1, "hello");
        store.put(&rec).await.unwrap();

        assert_eq!(store.get("orders", 1).await.unwrap(), Some(rec));
        assert_eq!(store.get("orders", 2).await.unwrap(), None);
        assert_eq!(store.get("invoices", 1).await.unwrap(), None);
    }

    #[test]
    fn expiry_honors_zero_and_elapsed_ttl() {
        let mut rec = record("orders", 1, "x");

        // zero expiration never expires, however old the record is
        assert!(!rec.is_expired(rec.published_at + 1_000_000_000));

        rec.expiration = Duration::from_millis(500);
        assert!(!rec.is_expired(rec.published_at));
        assert!(!rec.is_expired(rec.published_at + 499));
        assert!(rec.is_expired(rec.published_at + 500));
        assert!(rec.is_expired(rec.published_at + 10_000));
    }

    #[test]
    fn record_serialization_roundtrip() {
        let rec = StoredMessage {
            subject: "roundtrip".into(),
            id: 42,
            body: "{\"key\":42}".into(),
            expiration: Duration::from_secs(10),
            published_at: 1_725_000_000_000,
        };

        let data = serde_json::to_vec(&rec).unwrap();
        let parsed: StoredMessage = serde_json::from_slice(&data).unwrap();

        assert_eq!(rec, parsed);
    }
}
