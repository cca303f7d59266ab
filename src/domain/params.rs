//! Tool parameter value type and validation
//!
//! ToolParameters describes the physical properties of an end-effector. The
//! controller will reject malformed parameters anyway, but validating locally
//! lets callers fix bad input without a controller round-trip.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default tolerance on the TCP quaternion norm.
pub const DEFAULT_QUAT_TOLERANCE: f64 = 1e-3;

/// Physical parameters of a robot tool.
///
/// Serializable so parameter sets can be kept as JSON files and loaded by the
/// CLI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolParameters {
    /// Tool mass in kg, must be positive
    pub mass: f64,

    /// Center of mass in tool-frame coordinates [x, y, z] (m)
    pub center_of_mass: [f64; 3],

    /// Upper-triangular entries of the inertia tensor about the center of
    /// mass: [Ixx, Iyy, Izz, Ixy, Ixz, Iyz] (kg·m²)
    pub inertia: [f64; 6],

    /// TCP frame relative to the mounting flange: 3 translation components
    /// (m) followed by a unit quaternion [qw, qx, qy, qz]
    pub tcp_transform: [f64; 7],
}

/// Validation failures for tool parameters
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParamError {
    /// Mass must be strictly positive
    #[error("mass must be positive, got {0}")]
    NonPositiveMass(f64),

    /// Some component is NaN or infinite
    #[error("{0} contains a non-finite value")]
    NonFinite(&'static str),

    /// The orientation part of the TCP transform is not a unit quaternion
    #[error("TCP quaternion norm is {norm}, expected 1 within {tolerance}")]
    NonUnitQuaternion { norm: f64, tolerance: f64 },
}

impl ToolParameters {
    /// Parameters of the built-in "Flange" tool: no tool mounted, TCP at the
    /// flange itself. Never submitted through `add`, so the positive-mass
    /// invariant does not apply to it.
    pub fn flange() -> Self {
        Self {
            mass: 0.0,
            center_of_mass: [0.0; 3],
            inertia: [0.0; 6],
            tcp_transform: [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0],
        }
    }

    /// Check all invariants, using the given tolerance for the quaternion
    /// norm. Returns the first violation found.
    pub fn validate(&self, quat_tolerance: f64) -> Result<(), ParamError> {
        if !self.mass.is_finite() {
            return Err(ParamError::NonFinite("mass"));
        }
        if self.mass <= 0.0 {
            return Err(ParamError::NonPositiveMass(self.mass));
        }
        if self.center_of_mass.iter().any(|v| !v.is_finite()) {
            return Err(ParamError::NonFinite("center_of_mass"));
        }
        if self.inertia.iter().any(|v| !v.is_finite()) {
            return Err(ParamError::NonFinite("inertia"));
        }
        if self.tcp_transform.iter().any(|v| !v.is_finite()) {
            return Err(ParamError::NonFinite("tcp_transform"));
        }

        let norm = self.quaternion_norm();
        if (norm - 1.0).abs() > quat_tolerance {
            return Err(ParamError::NonUnitQuaternion {
                norm,
                tolerance: quat_tolerance,
            });
        }

        Ok(())
    }

    /// Norm of the orientation part of the TCP transform.
    fn quaternion_norm(&self) -> f64 {
        self.tcp_transform[3..7].iter().map(|v| v * v).sum::<f64>().sqrt()
    }
}
