//! Message definitions
//!
//! `Message` is what producers hand to `publish` and what subscribers pull
//! from their sinks. The broker routes the body untouched.
//!
//! Notes on fields:
//! - `body`: opaque UTF-8 payload
//! - `expiration`: how long after publication the message stays fetchable
//!   by id; `Duration::ZERO` means it never expires

use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub body: String,
    pub expiration: Duration,
}

impl Message {
    /// Create a non-expiring message.
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            expiration: Duration::ZERO,
        }
    }

    /// Create a message that stops being fetchable `expiration` after
    /// publication.
    pub fn with_expiration(body: impl Into<String>, expiration: Duration) -> Self {
        Self {
            body: body.into(),
            expiration,
        }
    }
}
