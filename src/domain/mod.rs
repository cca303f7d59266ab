//! Domain types for the tool system
//!
//! Value types shared across the crate:
//! - ToolParameters: physical description of a tool (mass, CoM, inertia, TCP)
//! - ToolEntry: named binding of a tool in the controller's pool
//! - OperatingMode: controller mode, gates all pool mutations
//!
//! All state that matters lives on the controller side; these types only
//! describe it.

pub mod entry;
pub mod mode;
pub mod params;

pub use entry::{FLANGE, ToolEntry};
pub use mode::OperatingMode;
pub use params::{DEFAULT_QUAT_TOLERANCE, ParamError, ToolParameters};
