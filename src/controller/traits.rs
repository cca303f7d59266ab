//! Robot controller trait and its error types
//!
//! The orchestrator never talks to hardware directly; it goes through this
//! trait. The controller owns the tool pool and the active-tool pointer, so
//! its rejections are authoritative: local existence checks in the
//! orchestrator are advisory only, and anything the controller refuses comes
//! back as a typed `PoolRejection` rather than a boolean the client has to
//! trust.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{OperatingMode, ToolEntry, ToolParameters};

/// The controller's verdict when it refuses a request it understood.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PoolRejection {
    /// A tool with this name already exists in the pool
    #[error("tool [{0}] already exists")]
    DuplicateName(String),

    /// No tool with this name in the pool
    #[error("tool [{0}] does not exist")]
    UnknownTool(String),

    /// The tool is currently active and cannot be removed
    #[error("tool [{0}] is the active tool")]
    ActiveToolInUse(String),

    /// The reserved built-in tool cannot be modified
    #[error("tool [{0}] is reserved")]
    ReservedName(String),

    /// The request is not legal in the controller's current mode
    #[error("operation not allowed in mode {0}")]
    WrongMode(OperatingMode),
}

/// Errors returned by controller calls.
#[derive(Debug, Error)]
pub enum ControllerError {
    /// The controller received the request and refused it
    #[error("rejected by controller: {0}")]
    Rejected(#[from] PoolRejection),

    /// The request never got a valid reply; possibly transient
    #[error("transport error: {0}")]
    Transport(String),
}

impl ControllerError {
    /// Transport failures may succeed on retry; rejections never will
    /// without a state change.
    pub fn is_transient(&self) -> bool {
        matches!(self, ControllerError::Transport(_))
    }
}

/// Connection to a robot controller.
///
/// Each method is one blocking round-trip: it resolves once the controller
/// has acknowledged or refused the request. Calls issued sequentially through
/// one connection are observed in issue order; no guarantee is made about
/// interleaving with other clients of the same controller.
#[async_trait]
pub trait RobotController: Send + Sync {
    /// Current operating mode.
    async fn mode(&self) -> Result<OperatingMode, ControllerError>;

    /// Switch operating mode, resolving once the transition completes.
    async fn switch_mode(&self, target: OperatingMode) -> Result<(), ControllerError>;

    /// Whether a fault is currently active.
    async fn fault(&self) -> Result<bool, ControllerError>;

    /// Try to clear an active fault. Returns whether the fault is gone.
    async fn clear_fault(&self) -> Result<bool, ControllerError>;

    /// Request servo-on. The robot becomes operational some time later;
    /// poll [`operational`](Self::operational) to observe it.
    async fn enable(&self) -> Result<(), ControllerError>;

    /// Whether the robot is enabled and ready for commands.
    async fn operational(&self) -> Result<bool, ControllerError>;

    /// Full tool pool in controller-reported order.
    async fn pool_list(&self) -> Result<Vec<ToolEntry>, ControllerError>;

    /// Whether a tool with this name exists in the pool.
    async fn pool_exists(&self, name: &str) -> Result<bool, ControllerError>;

    /// Parameters of an existing tool.
    async fn pool_params(&self, name: &str) -> Result<ToolParameters, ControllerError>;

    /// Add a new tool. Rejects duplicates.
    async fn pool_add(&self, name: &str, params: &ToolParameters) -> Result<(), ControllerError>;

    /// Replace the parameters of an existing tool in place.
    async fn pool_update(&self, name: &str, params: &ToolParameters) -> Result<(), ControllerError>;

    /// Remove an existing tool. Rejects the reserved tool and the active tool.
    async fn pool_remove(&self, name: &str) -> Result<(), ControllerError>;

    /// Make an existing tool the active one.
    async fn pool_switch_active(&self, name: &str) -> Result<(), ControllerError>;

    /// Name of the currently active tool; the reserved sentinel when no tool
    /// is mounted.
    async fn active_name(&self) -> Result<String, ControllerError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_display() {
        let err = PoolRejection::DuplicateName("Gripper".to_string());
        assert_eq!(err.to_string(), "tool [Gripper] already exists");

        let err = PoolRejection::WrongMode(OperatingMode::PlanExecution);
        assert_eq!(err.to_string(), "operation not allowed in mode PLAN_EXECUTION");
    }

    #[test]
    fn test_controller_error_from_rejection() {
        let err: ControllerError = PoolRejection::UnknownTool("T1".to_string()).into();
        assert!(matches!(err, ControllerError::Rejected(_)));
        assert!(err.to_string().contains("tool [T1] does not exist"));
    }

    #[test]
    fn test_transient_classification() {
        assert!(ControllerError::Transport("timeout".to_string()).is_transient());

        let rejected: ControllerError = PoolRejection::ReservedName("Flange".to_string()).into();
        assert!(!rejected.is_transient());
    }
}
