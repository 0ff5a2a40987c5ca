//! Core error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` where a core
//! operation can fail inside them.

use thiserror::Error;

/// Errors produced by `gs-core` constructors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("direction vector must not be (0, 0)")]
    ZeroDirection,

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `gs-core`.
pub type CoreResult<T> = Result<T, CoreError>;
