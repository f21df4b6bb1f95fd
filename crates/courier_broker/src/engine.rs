//! Broker engine
//!
//! This module contains the in-process broker implementation responsible
//! for:
//! - maintaining the per-subject registry of live delivery sinks
//! - publishing: id assignment, the durable write, and fan-out
//! - fetching stored messages with TTL-aware expiry
//! - gating every operation behind the open/closed lifecycle flag
//!
//! Concurrency and usage notes:
//! - Each subject carries its own mutex. A publish holds it from id
//!   allocation through fan-out, so publishes on one subject are totally
//!   ordered and every sink observes them in the same order. Distinct
//!   subjects never contend.
//! - Sink registration takes the same mutex, so a subscribe lands either
//!   entirely before or entirely after any concurrent publish on its
//!   subject.
//! - The durable write happens inside the critical section: once `publish`
//!   has returned an id, a `fetch` of that id cannot miss the record.
//! - Delivery sinks are bounded. Fan-out blocks on a full sink instead of
//!   dropping, so a slow subscriber throttles publishes on its subject.
//! - Dropping an in-flight operation's future cancels it at its next await
//!   point. A publish dropped after the durable write leaves a record that
//!   is fetchable but was never (fully) fanned out.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use courier_persistence::{MessageStore, StoredMessage};
use tokio::sync::{mpsc, Mutex, RwLock};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::BrokerError;
use crate::message::Message;
use crate::subject::Subject;
use crate::subscription::Subscription;

pub struct Broker {
    store: Arc<dyn MessageStore>,
    /// Subject registry. Reads dominate (every operation starts with a
    /// lookup); the write lock is taken only on first touch of a subject.
    subjects: RwLock<HashMap<String, Arc<Mutex<Subject>>>>,
    next_id: AtomicU64,
    closed: AtomicBool,
    sink_capacity: usize,
}

impl Broker {
    /// Default bounded capacity of each delivery sink.
    pub const DEFAULT_SINK_CAPACITY: usize = 128;

    pub fn new(store: Arc<dyn MessageStore>) -> Self {
        Self::with_sink_capacity(store, Self::DEFAULT_SINK_CAPACITY)
    }

    /// Create a broker whose delivery sinks buffer up to `sink_capacity`
    /// messages before publishes on their subject start blocking.
    pub fn with_sink_capacity(store: Arc<dyn MessageStore>, sink_capacity: usize) -> Self {
        assert!(sink_capacity > 0, "sink capacity must be positive");

        Self {
            store,
            subjects: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(1),
            closed: AtomicBool::new(false),
            sink_capacity,
        }
    }

    /// Publish `message` on `subject`, returning the assigned id.
    ///
    /// The message is durably stored before any delivery. Every sink
    /// attached to the subject at this point receives it exactly once, in
    /// publication order. A storage failure aborts the publish: nothing is
    /// delivered and the consumed id stays unused (ids are not dense).
    pub async fn publish(&self, subject: &str, message: Message) -> Result<u64, BrokerError> {
        if self.is_closed() {
            return Err(BrokerError::Unavailable);
        }

        let handle = self.subject(subject).await;
        let mut state = handle.lock().await;

        // Ids are allocated under the subject lock, so the per-subject id
        // sequence rises with delivery order.
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let record = StoredMessage {
            subject: state.name.clone(),
            id,
            body: message.body.clone(),
            expiration: message.expiration,
            published_at: Utc::now().timestamp_millis(),
        };

        self.store.put(&record).await?;

        state.prune_closed();
        for sink in state.sinks() {
            // A full sink blocks here; order is preserved at the cost of
            // throttling this subject. The send only fails if the receiver
            // was dropped after the prune above.
            if sink.sender.send(message.clone()).await.is_err() {
                warn!(subject = %state.name, sink = %sink.id, "sink dropped during fan-out");
            }
        }

        debug!(subject = %state.name, id, sinks = state.sink_count(), "published");
        Ok(id)
    }

    /// Attach a new subscription to `subject`.
    ///
    /// The subscription observes every publish serialized after this call
    /// and nothing published before it.
    pub async fn subscribe(&self, subject: &str) -> Result<Subscription, BrokerError> {
        if self.is_closed() {
            return Err(BrokerError::Unavailable);
        }

        let handle = self.subject(subject).await;
        let (sender, receiver) = mpsc::channel(self.sink_capacity);
        let id = Uuid::new_v4();

        let mut state = handle.lock().await;
        state.attach(id, sender);
        debug!(subject = %state.name, sink = %id, "subscribed");

        Ok(Subscription::new(state.name.clone(), id, receiver))
    }

    /// Retrieve the message stored under `(subject, id)`.
    ///
    /// Fails with [`BrokerError::InvalidId`] when no such record exists and
    /// with [`BrokerError::ExpiredId`] when its time-to-live has elapsed.
    pub async fn fetch(&self, subject: &str, id: u64) -> Result<Message, BrokerError> {
        if self.is_closed() {
            return Err(BrokerError::Unavailable);
        }

        let record = self
            .store
            .get(subject, id)
            .await?
            .ok_or(BrokerError::InvalidId)?;

        if record.is_expired(Utc::now().timestamp_millis()) {
            return Err(BrokerError::ExpiredId);
        }

        Ok(Message {
            body: record.body,
            expiration: record.expiration,
        })
    }

    /// Close the broker. Idempotent. Every later `publish`, `subscribe`,
    /// or `fetch` fails with [`BrokerError::Unavailable`]; operations that
    /// already passed the gate complete normally.
    pub fn close(&self) {
        if !self.closed.swap(true, Ordering::SeqCst) {
            debug!("broker closed");
        }
    }

    /// Whether `close` has been called.
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// Look up a subject's state, creating it on first touch. Concurrent
    /// first touches race to insert; every caller ends up with the same
    /// instance.
    async fn subject(&self, name: &str) -> Arc<Mutex<Subject>> {
        if let Some(state) = self.subjects.read().await.get(name) {
            return Arc::clone(state);
        }

        let mut subjects = self.subjects.write().await;
        Arc::clone(
            subjects
                .entry(name.to_string())
                .or_insert_with(|| Arc::new(Mutex::new(Subject::new(name)))),
        )
    }
}

impl std::fmt::Debug for Broker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Broker")
            .field("closed", &self.is_closed())
            .field("sink_capacity", &self.sink_capacity)
            .finish_non_exhaustive()
    }
}
