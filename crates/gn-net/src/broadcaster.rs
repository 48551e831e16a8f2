//! The `Broadcaster` trait implemented by all delivery backends.

use std::sync::{Arc, Mutex, PoisonError};

use gn_core::{RecipientId, SessionId};

use crate::event::{Envelope, PositionUpdate};

/// Outbound sink for position updates.
///
/// Called from the scheduler for every step taken, possibly from several
/// worker threads at once.  Implementations serialize their own writes and
/// must not block for long; delivery failures are the backend's concern and
/// never reach the scheduler.
pub trait Broadcaster: Send + Sync {
    fn broadcast(&self, update: &PositionUpdate, exclude: Option<RecipientId>, session: SessionId);
}

impl<B: Broadcaster + ?Sized> Broadcaster for Arc<B> {
    fn broadcast(&self, update: &PositionUpdate, exclude: Option<RecipientId>, session: SessionId) {
        (**self).broadcast(update, exclude, session);
    }
}

impl<B: Broadcaster + ?Sized> Broadcaster for Box<B> {
    fn broadcast(&self, update: &PositionUpdate, exclude: Option<RecipientId>, session: SessionId) {
        (**self).broadcast(update, exclude, session);
    }
}

// ── NoopBroadcaster ───────────────────────────────────────────────────────────

/// Discards every update.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoopBroadcaster;

impl Broadcaster for NoopBroadcaster {
    fn broadcast(&self, _update: &PositionUpdate, _exclude: Option<RecipientId>, _session: SessionId) {}
}

// ── MemoryBroadcaster ─────────────────────────────────────────────────────────

/// Records every envelope in arrival order.
#[derive(Debug, Default)]
pub struct MemoryBroadcaster {
    envelopes: Mutex<Vec<Envelope>>,
}

impl MemoryBroadcaster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything recorded so far.
    pub fn envelopes(&self) -> Vec<Envelope> {
        self.lock().clone()
    }

    /// Just the updates, in arrival order.
    pub fn updates(&self) -> Vec<PositionUpdate> {
        self.lock().iter().map(|e| e.update).collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Remove and return everything recorded so far.
    pub fn take(&self) -> Vec<Envelope> {
        std::mem::take(&mut *self.lock())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Envelope>> {
        // Poisoning only means a recording thread panicked; the Vec is intact.
        self.envelopes.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Broadcaster for MemoryBroadcaster {
    fn broadcast(&self, update: &PositionUpdate, exclude: Option<RecipientId>, session: SessionId) {
        self.lock().push(Envelope { update: *update, exclude, session });
    }
}
