//! Error types for toolr
//!
//! Centralized error handling using thiserror. Controller-side verdicts
//! (`ControllerError`) map into this taxonomy so callers always see one typed
//! failure kind per enumerable condition, never an opaque error.

use std::time::Duration;
use thiserror::Error;

use crate::controller::{ControllerError, PoolRejection};
use crate::domain::{OperatingMode, ParamError};

/// All error types that can occur in toolr
#[derive(Debug, Error)]
pub enum ToolrError {
    /// A mutating operation was attempted outside IDLE mode
    #[error("mode must be IDLE, current mode is {0}")]
    NotIdle(OperatingMode),

    /// Tool parameters failed validation; fix the input, never retry as-is
    #[error("invalid tool parameters: {0}")]
    InvalidParams(#[from] ParamError),

    /// Tool names must be non-empty
    #[error("tool name must not be empty")]
    EmptyName,

    /// The reserved built-in tool cannot be added, updated, or removed
    #[error("tool name [{0}] is reserved")]
    ReservedName(String),

    /// A tool with this name already exists in the pool
    #[error("tool [{0}] already exists")]
    DuplicateName(String),

    /// No tool with this name in the pool
    #[error("tool [{0}] does not exist")]
    UnknownTool(String),

    /// Attempted to remove the active tool; switch away first
    #[error("tool [{0}] is the active tool, switch to another tool before removing it")]
    ActiveToolInUse(String),

    /// The robot did not become operational within the startup timeout
    #[error("robot not operational after {0:?}")]
    NotOperational(Duration),

    /// Communication with the controller failed; possibly transient, retry
    /// policy is left to the caller
    #[error("controller error: {0}")]
    Controller(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ToolrError {
    /// Whether retrying the same call can succeed without any other change.
    ///
    /// Note that a transport failure during `add` may have landed on the
    /// controller; check `exists` before retrying an add.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ToolrError::Controller(_))
    }
}

impl From<ControllerError> for ToolrError {
    fn from(err: ControllerError) -> Self {
        match err {
            ControllerError::Rejected(rejection) => match rejection {
                PoolRejection::DuplicateName(name) => ToolrError::DuplicateName(name),
                PoolRejection::UnknownTool(name) => ToolrError::UnknownTool(name),
                PoolRejection::ActiveToolInUse(name) => ToolrError::ActiveToolInUse(name),
                PoolRejection::ReservedName(name) => ToolrError::ReservedName(name),
                PoolRejection::WrongMode(mode) => ToolrError::NotIdle(mode),
            },
            ControllerError::Transport(message) => ToolrError::Controller(message),
        }
    }
}

/// Result type alias for toolr operations
pub type Result<T> = std::result::Result<T, ToolrError>;
