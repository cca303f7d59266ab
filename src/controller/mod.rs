//! Robot controller collaborator
//!
//! This module provides:
//! - RobotController trait abstracting the controller connection
//! - ControllerError / PoolRejection carrying the controller's verdicts
//! - SimController, an in-memory implementation for tests and the demo CLI

pub mod sim;
pub mod traits;

pub use sim::SimController;
pub use traits::{ControllerError, PoolRejection, RobotController};
