use gs_agent::AgentError;
use gs_core::CoreError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("missing model parameters: {}", .0.join(", "))]
    MissingParameter(Vec<String>),

    #[error("requested {requested} agents but the grid holds only {capacity}")]
    Capacity { requested: u64, capacity: u64 },

    #[error("model configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Agent(#[from] AgentError),
}

pub type ModelResult<T> = Result<T, ModelError>;
