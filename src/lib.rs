//! # courier
//!
//! `courier` is an in-process publish/subscribe message broker with
//! durable, TTL-aware message history. Producers publish to named
//! subjects; every subscription attached to a subject receives each later
//! publish, in publication order; and any message whose time-to-live has
//! not elapsed can be fetched again by its id.
//!
//! ## Core crates
//!
//! - `courier_broker`: the broker engine — subjects, fan-out, fetch,
//!   lifecycle.
//! - `courier_persistence`: the durable store seam — sled-backed and
//!   in-memory implementations.
//! - `courier_config`: layered file/environment configuration.
//! - `courier_utils`: logging setup.
//!
//! ## Quick start
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use courier::{Broker, MemoryStore, Message};
//!
//! # async fn run() -> Result<(), courier::BrokerError> {
//! let broker = Broker::new(Arc::new(MemoryStore::new()));
//!
//! let mut sub = broker.subscribe("orders").await?;
//! let id = broker.publish("orders", Message::new("hello")).await?;
//!
//! let live = sub.recv().await.unwrap();
//! assert_eq!(broker.fetch("orders", id).await?, live);
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

pub use courier_broker::{Broker, BrokerError, Message, Subscription};
pub use courier_config::{load_config, Settings};
pub use courier_persistence::{MemoryStore, MessageStore, SledStore, StoreError, StoredMessage};

/// Open a broker backed by the sled store described in `settings`.
///
/// Also initializes logging at the configured level, so embedding
/// applications get a working subscriber with one call.
pub fn open(settings: &Settings) -> Result<Broker, StoreError> {
    courier_utils::logging::init(&settings.log.level);

    let store = SledStore::open(&settings.store.path, &settings.store.namespace)?;
    Ok(Broker::with_sink_capacity(
        Arc::new(store),
        settings.sink.buffer_capacity,
    ))
}
