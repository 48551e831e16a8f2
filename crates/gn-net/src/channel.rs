//! Channel-backed broadcaster.
//!
//! The scheduler side holds a [`ChannelBroadcaster`]; the transport side
//! holds the matching `Receiver<Envelope>` and forwards envelopes to the
//! session's recipients.  With a bounded channel a slow transport loses
//! updates instead of stalling agent ticks.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use crossbeam_channel::{Receiver, Sender, TrySendError};
use gn_core::{RecipientId, SessionId};
use tracing::{debug, warn};

use crate::broadcaster::Broadcaster;
use crate::event::{Envelope, PositionUpdate};

pub struct ChannelBroadcaster {
    tx:           Sender<Envelope>,
    dropped:      AtomicU64,
    disconnected: AtomicBool,
}

impl ChannelBroadcaster {
    /// A broadcaster that never drops while the receiver is alive.
    pub fn unbounded() -> (Self, Receiver<Envelope>) {
        let (tx, rx) = crossbeam_channel::unbounded();
        (Self::from_sender(tx), rx)
    }

    /// A broadcaster that drops (and counts) updates while `capacity`
    /// envelopes are already waiting.
    pub fn bounded(capacity: usize) -> (Self, Receiver<Envelope>) {
        let (tx, rx) = crossbeam_channel::bounded(capacity);
        (Self::from_sender(tx), rx)
    }

    pub fn from_sender(tx: Sender<Envelope>) -> Self {
        Self { tx, dropped: AtomicU64::new(0), disconnected: AtomicBool::new(false) }
    }

    /// Updates lost to a full channel or a disconnected receiver.
    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }
}

impl Broadcaster for ChannelBroadcaster {
    fn broadcast(&self, update: &PositionUpdate, exclude: Option<RecipientId>, session: SessionId) {
        let envelope = Envelope { update: *update, exclude, session };
        match self.tx.try_send(envelope) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => {
                let total = self.dropped.fetch_add(1, Ordering::Relaxed) + 1;
                warn!(agent = %update.agent, %session, total, "broadcast channel full, update dropped");
            }
            Err(TrySendError::Disconnected(_)) => {
                let total = self.dropped.fetch_add(1, Ordering::Relaxed) + 1;
                if !self.disconnected.swap(true, Ordering::Relaxed) {
                    warn!(%session, "broadcast receiver disconnected");
                } else {
                    debug!(agent = %update.agent, total, "update dropped, receiver gone");
                }
            }
        }
    }
}
