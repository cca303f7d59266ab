//! Controller operating modes
//!
//! Tool-pool mutation and active-tool switching are only legal in IDLE; the
//! other variants exist so the orchestrator can report exactly which mode
//! blocked an operation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Operating mode reported by the robot controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperatingMode {
    /// Servo-on, holding position, accepting configuration changes
    Idle,
    /// Executing a pre-programmed plan
    PlanExecution,
    /// Executing primitives
    PrimitiveExecution,
    /// Joint-space motion control
    JointPosition,
    /// Cartesian motion/force control
    CartesianMotionForce,
    /// Mode not recognized by this client
    Unknown,
}

impl OperatingMode {
    /// Whether pool mutations are legal in this mode.
    pub fn is_idle(&self) -> bool {
        matches!(self, OperatingMode::Idle)
    }
}

impl fmt::Display for OperatingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OperatingMode::Idle => "IDLE",
            OperatingMode::PlanExecution => "PLAN_EXECUTION",
            OperatingMode::PrimitiveExecution => "PRIMITIVE_EXECUTION",
            OperatingMode::JointPosition => "JOINT_POSITION",
            OperatingMode::CartesianMotionForce => "CARTESIAN_MOTION_FORCE",
            OperatingMode::Unknown => "UNKNOWN",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_idle() {
        assert!(OperatingMode::Idle.is_idle());
        assert!(!OperatingMode::PlanExecution.is_idle());
        assert!(!OperatingMode::Unknown.is_idle());
    }

    #[test]
    fn test_display() {
        assert_eq!(OperatingMode::Idle.to_string(), "IDLE");
        assert_eq!(OperatingMode::PlanExecution.to_string(), "PLAN_EXECUTION");
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_string(&OperatingMode::Idle).unwrap();
        assert_eq!(json, "\"idle\"");

        let json = serde_json::to_string(&OperatingMode::CartesianMotionForce).unwrap();
        assert_eq!(json, "\"cartesian_motion_force\"");
    }
}
