//! CSV event-log backend.
//!
//! One row per update: `agent_id,x,y,session`.

use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};

use csv::Writer;
use gn_core::{RecipientId, SessionId};

use crate::broadcaster::Broadcaster;
use crate::event::PositionUpdate;
use crate::{NetError, NetResult};

/// Writes every update as a CSV row.
///
/// Write errors are stored internally because `broadcast` has no return
/// value.  Check for them with [`take_error`][Self::take_error] after the
/// run, or surface them through [`flush`][Self::flush].
pub struct CsvBroadcaster<W: Write> {
    inner: Mutex<LogState<W>>,
}

struct LogState<W: Write> {
    writer:     Writer<W>,
    rows:       u64,
    last_error: Option<NetError>,
}

impl CsvBroadcaster<File> {
    /// Create (or truncate) `path` and write the header row.
    pub fn create(path: &Path) -> NetResult<Self> {
        Self::from_csv_writer(Writer::from_path(path)?)
    }
}

impl<W: Write> CsvBroadcaster<W> {
    /// Wrap `writer` and write the header row.
    pub fn new(writer: W) -> NetResult<Self> {
        Self::from_csv_writer(Writer::from_writer(writer))
    }

    fn from_csv_writer(mut writer: Writer<W>) -> NetResult<Self> {
        writer.write_record(["agent_id", "x", "y", "session"])?;
        Ok(Self {
            inner: Mutex::new(LogState { writer, rows: 0, last_error: None }),
        })
    }

    /// Rows successfully written so far (header excluded).
    pub fn rows(&self) -> u64 {
        self.lock().rows
    }

    /// Flush buffered rows.  Returns the stored write error first, if any.
    pub fn flush(&self) -> NetResult<()> {
        let mut state = self.lock();
        if let Some(e) = state.last_error.take() {
            return Err(e);
        }
        state.writer.flush()?;
        Ok(())
    }

    /// Take the stored write error (if any).
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&self) -> Option<NetError> {
        self.lock().last_error.take()
    }

    /// Flush and unwrap the underlying writer.
    pub fn into_inner(self) -> NetResult<W> {
        let state = self.inner.into_inner().unwrap_or_else(PoisonError::into_inner);
        if let Some(e) = state.last_error {
            return Err(e);
        }
        state.writer.into_inner().map_err(|e| NetError::Io(e.into_error()))
    }

    fn lock(&self) -> MutexGuard<'_, LogState<W>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<W: Write + Send> Broadcaster for CsvBroadcaster<W> {
    fn broadcast(&self, update: &PositionUpdate, _exclude: Option<RecipientId>, session: SessionId) {
        let mut state = self.lock();
        let result = state.writer.write_record(&[
            update.agent.0.to_string(),
            update.x.to_string(),
            update.y.to_string(),
            session.0.to_string(),
        ]);
        match result {
            Ok(()) => state.rows += 1,
            Err(e) => {
                tracing::warn!(agent = %update.agent, error = %e, "event log write failed");
                // Keep only the first error.
                if state.last_error.is_none() {
                    state.last_error = Some(e.into());
                }
            }
        }
    }
}
