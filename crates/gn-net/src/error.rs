//! Error types for gn-net.

use thiserror::Error;

/// Errors raised by the file-backed broadcaster.
#[derive(Debug, Error)]
pub enum NetError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),
}

/// Alias for `Result<T, NetError>`.
pub type NetResult<T> = Result<T, NetError>;
