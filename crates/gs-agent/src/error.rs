use gs_core::{AgentId, CoreError, Pos};
use thiserror::Error;

use crate::ParamKind;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AgentError {
    // ── Configuration errors ──────────────────────────────────────────────
    #[error("agent builder has no strategy")]
    MissingStrategy,

    #[error("unknown parameter `{0}`")]
    UnknownParameter(String),

    #[error("parameter `{name}` expects {expected}, got {got}")]
    KindMismatch {
        name:     String,
        expected: ParamKind,
        got:      ParamKind,
    },

    #[error("value for `{name}` is outside its domain: {description}")]
    OutOfDomain { name: String, description: String },

    #[error("unresolved required parameters: {}", .0.join(", "))]
    Unresolved(Vec<String>),

    #[error(transparent)]
    Core(#[from] CoreError),

    // ── Invariant violations ──────────────────────────────────────────────
    #[error("position {0} is outside the grid")]
    OutOfBounds(Pos),

    #[error("position {0} is already occupied")]
    Occupied(Pos),

    #[error("position {0} has no occupant")]
    Vacant(Pos),

    #[error("{agent} is not the occupant of {pos}")]
    NotOccupant { pos: Pos, agent: AgentId },

    #[error("{0} is not placed in this state")]
    UnknownAgent(AgentId),
}

impl AgentError {
    /// `true` for errors that indicate a broken occupancy invariant (a bug in
    /// the calling strategy or model) rather than a configuration mistake.
    pub fn is_invariant_violation(&self) -> bool {
        matches!(
            self,
            AgentError::OutOfBounds(_)
                | AgentError::Occupied(_)
                | AgentError::Vacant(_)
                | AgentError::NotOccupant { .. }
                | AgentError::UnknownAgent(_)
        )
    }
}

pub type AgentResult<T> = Result<T, AgentError>;
