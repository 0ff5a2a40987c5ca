use gs_core::{CoreError, SessionId};
use gs_model::ModelError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimError {
    #[error("{0} is not running")]
    NotRunning(SessionId),

    #[error("{0} is already calculating a tick")]
    AlreadyCalculating(SessionId),

    #[error("no session {0}")]
    UnknownSession(SessionId),

    #[error("invalid session configuration: {0}")]
    Config(#[from] CoreError),

    #[error("model error: {0}")]
    Model(#[from] ModelError),

    #[error("a lock was poisoned by a panicking tick")]
    Lock,

    #[error("the worker computing a tick for {0} was lost")]
    WorkerLost(SessionId),
}

impl SimError {
    /// `true` for the "try again later" errors: the session exists and is
    /// healthy but cannot step right now.
    pub fn is_retryable(&self) -> bool {
        matches!(self, SimError::NotRunning(_) | SimError::AlreadyCalculating(_))
    }
}

pub type SimResult<T> = Result<T, SimError>;
