//! Wire payloads.

use gn_core::{AgentId, Cell, RecipientId, SessionId};

/// One agent moved onto `(x, y)`.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PositionUpdate {
    #[cfg_attr(feature = "serde", serde(rename = "agent_id"))]
    pub agent: AgentId,
    pub x:     i32,
    pub y:     i32,
}

impl PositionUpdate {
    pub fn new(agent: AgentId, cell: Cell) -> Self {
        Self { agent, x: cell.x, y: cell.y }
    }

    #[inline]
    pub fn cell(&self) -> Cell {
        Cell::new(self.x, self.y)
    }
}

/// A `PositionUpdate` together with its routing parameters, as queued by
/// the channel and memory backends.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Envelope {
    pub update:  PositionUpdate,
    /// Recipient that must not receive this update.
    pub exclude: Option<RecipientId>,
    pub session: SessionId,
}
