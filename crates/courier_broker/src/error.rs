//! Broker error taxonomy
//!
//! Every public operation returns one of these; none of them panic.
//! Storage failures wrap the repository's own error so callers can inspect
//! the cause.

use courier_persistence::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BrokerError {
    /// The broker has been closed; no further operations are served.
    #[error("broker is unavailable")]
    Unavailable,
    /// No record exists for the requested `(subject, id)`.
    #[error("no message with the requested id")]
    InvalidId,
    /// The record exists but its time-to-live has elapsed.
    #[error("message has expired")]
    ExpiredId,
    /// The durable store failed a read or write. A publish that hits this
    /// has delivered nothing.
    #[error("durable store failure: {0}")]
    Storage(#[from] StoreError),
}
