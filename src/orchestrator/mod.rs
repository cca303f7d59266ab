//! Tool orchestration
//!
//! ToolOrchestrator mediates all reads and mutations of the controller's
//! tool pool: mode gating, local parameter validation, advisory pool checks,
//! and mapping of controller verdicts into the crate error taxonomy.

pub mod tool_orchestrator;

pub use tool_orchestrator::ToolOrchestrator;
