use gn_core::{AgentId, Cell, CoreError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("scheduler configuration error: {0}")]
    Config(#[from] CoreError),

    #[error("cannot place an agent on {cell}: cell is blocked or out of bounds")]
    NotWalkable { cell: Cell },

    #[error("no registered agent {0}")]
    AgentNotFound(AgentId),

    #[error("agent id space exhausted")]
    IdsExhausted,

    #[error("realtime scheduler thread has stopped")]
    Stopped,

    #[error("failed to spawn the scheduler thread: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("realtime scheduler thread panicked")]
    ThreadPanicked,
}

pub type SimResult<T> = Result<T, SimError>;
