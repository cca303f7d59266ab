//! Tool orchestration integration tests
//!
//! Exercises the orchestrator end-to-end against the in-memory controller,
//! including the startup sequence and the params-file glue the CLI uses.

use std::sync::Arc;
use std::time::Duration;

use tempfile::TempDir;
use toolr::ToolOrchestrator;
use toolr::controller::{RobotController, SimController};
use toolr::domain::{FLANGE, OperatingMode, ToolParameters};
use toolr::error::ToolrError;
use toolr::session::{SessionOptions, ensure_operational};

fn gripper() -> ToolParameters {
    ToolParameters {
        mass: 0.9,
        center_of_mass: [0.0, 0.0, 0.057],
        inertia: [2.768e-3, 3.149e-3, 5.64e-4, 0.0, 0.0, 0.0],
        tcp_transform: [0.0, -0.207, 0.09, 0.7071068, 0.7071068, 0.0, 0.0],
    }
}

fn fast_session() -> SessionOptions {
    SessionOptions {
        poll_interval: Duration::from_millis(1),
        timeout: Some(Duration::from_millis(100)),
    }
}

/// The full workflow: enable, inspect, add, switch, park, remove.
#[tokio::test]
async fn test_online_tool_update_sequence() {
    let controller = Arc::new(SimController::new().powered_off());

    ensure_operational(controller.as_ref(), &fast_session())
        .await
        .unwrap();
    controller.switch_mode(OperatingMode::Idle).await.unwrap();

    let orchestrator = ToolOrchestrator::new(controller.clone());

    // Pool starts with only the flange, which is active
    let pool = orchestrator.list().await.unwrap();
    assert_eq!(pool.len(), 1);
    assert_eq!(pool[0].name, FLANGE);
    assert_eq!(orchestrator.active_name().await.unwrap(), FLANGE);

    // Add a new tool; it appears at the end of the list
    orchestrator.add("ExampleTool1", &gripper()).await.unwrap();
    let pool = orchestrator.list().await.unwrap();
    assert_eq!(pool.last().unwrap().name, "ExampleTool1");

    // Switch to it, then park on the flange and clean up
    orchestrator.switch("ExampleTool1").await.unwrap();
    assert_eq!(orchestrator.active_name().await.unwrap(), "ExampleTool1");

    orchestrator.switch(FLANGE).await.unwrap();
    orchestrator.remove("ExampleTool1").await.unwrap();
    assert!(!orchestrator.exists("ExampleTool1").await.unwrap());
}

/// Mutations outside IDLE mode fail and change nothing.
#[tokio::test]
async fn test_mode_gate_blocks_all_mutations() {
    let controller = Arc::new(SimController::new().with_mode(OperatingMode::PrimitiveExecution));
    let orchestrator = ToolOrchestrator::new(controller);

    for result in [
        orchestrator.add("T1", &gripper()).await,
        orchestrator.switch(FLANGE).await,
        orchestrator.remove("T1").await,
    ] {
        assert!(matches!(result.unwrap_err(), ToolrError::NotIdle(_)));
    }

    assert_eq!(orchestrator.list().await.unwrap().len(), 1);
    assert_eq!(orchestrator.active_name().await.unwrap(), FLANGE);
}

/// A same-named entry is never silently overwritten; replace handles the
/// remove-then-add dance, parking the active tool on the flange first.
#[tokio::test]
async fn test_replace_previously_active_tool() {
    let controller = Arc::new(SimController::new());
    let orchestrator = ToolOrchestrator::new(controller);

    orchestrator.add("ExampleTool1", &gripper()).await.unwrap();
    orchestrator.switch("ExampleTool1").await.unwrap();

    let mut revised = gripper();
    revised.mass = 1.1;
    revised.center_of_mass = [0.0, 0.0, 0.062];

    // Plain add is refused
    let err = orchestrator.add("ExampleTool1", &revised).await.unwrap_err();
    assert!(matches!(err, ToolrError::DuplicateName(_)));

    orchestrator.replace("ExampleTool1", &revised).await.unwrap();

    assert_eq!(orchestrator.active_name().await.unwrap(), FLANGE);
    assert_eq!(
        orchestrator.params("ExampleTool1").await.unwrap(),
        revised
    );
}

/// Transport failures surface as retryable controller errors; the failed
/// step is not retried automatically.
#[tokio::test]
async fn test_transport_failure_mid_replace_is_surfaced() {
    let controller = Arc::new(SimController::new());
    let orchestrator = ToolOrchestrator::new(controller.clone());

    orchestrator.add("ExampleTool1", &gripper()).await.unwrap();

    // The next pool call inside replace (the remove step) fails
    controller.fail_next_pool_op().await;
    let err = orchestrator
        .replace("ExampleTool1", &gripper())
        .await
        .unwrap_err();
    assert!(matches!(err, ToolrError::Controller(_)));
    assert!(err.is_retryable());

    // The remove never happened, so the old entry is still there
    assert!(orchestrator.exists("ExampleTool1").await.unwrap());
}

/// Startup wait is bounded: a controller that never comes up times out.
#[tokio::test]
async fn test_startup_times_out_on_dead_controller() {
    let controller = SimController::new().never_operational();
    let err = ensure_operational(&controller, &fast_session())
        .await
        .unwrap_err();
    assert!(matches!(err, ToolrError::NotOperational(_)));
}

/// Startup clears a clearable fault before enabling.
#[tokio::test]
async fn test_startup_clears_fault() {
    let controller = SimController::new().with_fault(true).powered_off();
    ensure_operational(&controller, &fast_session())
        .await
        .unwrap();
    assert!(controller.operational().await.unwrap());
}

/// Params files round-trip through the JSON representation the CLI reads.
#[tokio::test]
async fn test_params_file_roundtrip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("gripper.json");

    std::fs::write(&path, serde_json::to_string_pretty(&gripper()).unwrap()).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    let params: ToolParameters = serde_json::from_str(&content).unwrap();
    assert_eq!(params, gripper());

    let orchestrator = ToolOrchestrator::new(Arc::new(SimController::new()));
    orchestrator.add("Gripper", &params).await.unwrap();
    assert_eq!(orchestrator.params("Gripper").await.unwrap(), gripper());
}

/// A hand-written params file with a bad quaternion is rejected before any
/// pool mutation.
#[tokio::test]
async fn test_malformed_params_file_rejected() {
    let json = r#"{
        "mass": 0.9,
        "center_of_mass": [0.0, 0.0, 0.057],
        "inertia": [0.003, 0.003, 0.001, 0.0, 0.0, 0.0],
        "tcp_transform": [0.0, 0.0, 0.09, 0.5, 0.5, 0.0, 0.0]
    }"#;
    let params: ToolParameters = serde_json::from_str(json).unwrap();

    let orchestrator = ToolOrchestrator::new(Arc::new(SimController::new()));
    let err = orchestrator.add("Gripper", &params).await.unwrap_err();
    assert!(matches!(err, ToolrError::InvalidParams(_)));
    assert!(!orchestrator.exists("Gripper").await.unwrap());
}

/// Switching to the sentinel is idempotent.
#[tokio::test]
async fn test_flange_switch_idempotent() {
    let orchestrator = ToolOrchestrator::new(Arc::new(SimController::new()));
    orchestrator.switch(FLANGE).await.unwrap();
    orchestrator.switch(FLANGE).await.unwrap();
    assert_eq!(orchestrator.active_name().await.unwrap(), FLANGE);
}
