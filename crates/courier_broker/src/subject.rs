//! Subject state
//!
//! A `Subject` owns the delivery sinks attached to one named channel. The
//! broker wraps each subject in a mutex; holding it across the whole
//! publish critical section is what gives every sink the same view of the
//! subject's publication order.

use tokio::sync::mpsc::Sender;
use tracing::debug;
use uuid::Uuid;

use crate::message::Message;

/// The broker-held sending half of one subscription.
pub(crate) struct Sink {
    pub(crate) id: Uuid,
    pub(crate) sender: Sender<Message>,
}

pub(crate) struct Subject {
    pub(crate) name: String,
    sinks: Vec<Sink>,
}

impl Subject {
    pub(crate) fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            sinks: Vec::new(),
        }
    }

    /// Attach a delivery sink. Visible to every publish serialized after
    /// the caller's hold on this subject's lock.
    pub(crate) fn attach(&mut self, id: Uuid, sender: Sender<Message>) {
        self.sinks.push(Sink { id, sender });
    }

    /// Drop sinks whose subscriber went away.
    pub(crate) fn prune_closed(&mut self) {
        self.sinks.retain(|sink| {
            let live = !sink.sender.is_closed();
            if !live {
                debug!(subject = %self.name, sink = %sink.id, "removing dropped sink");
            }
            live
        });
    }

    pub(crate) fn sinks(&self) -> &[Sink] {
        &self.sinks
    }

    pub(crate) fn sink_count(&self) -> usize {
        self.sinks.len()
    }
}
