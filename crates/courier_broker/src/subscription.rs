//! Subscription handle
//!
//! The consumer half of a delivery sink. The broker keeps the sending half
//! under the subject; messages arrive here in publication order. Dropping
//! the handle ends the subscription — the dead sink is pruned on the
//! subject's next publish.

use tokio::sync::mpsc::error::TryRecvError;
use tokio::sync::mpsc::Receiver;
use uuid::Uuid;

use crate::message::Message;

#[derive(Debug)]
pub struct Subscription {
    subject: String,
    id: Uuid,
    inner: Receiver<Message>,
}

impl Subscription {
    pub(crate) fn new(subject: String, id: Uuid, inner: Receiver<Message>) -> Self {
        Self { subject, id, inner }
    }

    /// Subject this subscription is attached to.
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Identifier correlating this subscription in broker logs.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Wait for the next message. Returns `None` once the broker itself
    /// has been dropped and every buffered message was consumed.
    pub async fn recv(&mut self) -> Option<Message> {
        self.inner.recv().await
    }

    /// Non-blocking variant of [`recv`](Self::recv).
    pub fn try_recv(&mut self) -> Result<Message, TryRecvError> {
        self.inner.try_recv()
    }
}
