//! toolr - online tool-configuration orchestration for robot manipulators
//!
//! toolr adds, updates, switches, and removes end-effector definitions on a
//! running robot controller without a reboot, enforcing the preconditions
//! (IDLE mode, valid parameters, unique names, one active tool) under which
//! such changes are legal.

pub mod controller;
pub mod domain;
pub mod error;
pub mod orchestrator;
pub mod session;

pub use error::{Result, ToolrError};
pub use orchestrator::ToolOrchestrator;
