//! Startup sequencing for a controller connection
//!
//! Before the orchestrator can do anything useful the robot must be enabled
//! and operational: clear any active fault, request servo-on, then poll until
//! the controller reports operational. The wait is bounded; a controller that
//! never comes up fails the sequence instead of blocking forever.

use std::time::{Duration, Instant};

use crate::controller::RobotController;
use crate::error::{Result, ToolrError};

/// Options for the startup wait.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// Interval between operational polls
    pub poll_interval: Duration,
    /// Give up after this long; None polls forever (callers embedding this
    /// in production should keep a timeout)
    pub timeout: Option<Duration>,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(1),
            timeout: Some(Duration::from_secs(30)),
        }
    }
}

/// Bring the robot to the operational state: clear faults, enable, wait.
///
/// Fails with [`ToolrError::Controller`] when a fault cannot be cleared and
/// with [`ToolrError::NotOperational`] when the timeout elapses first.
pub async fn ensure_operational<C: RobotController>(
    controller: &C,
    opts: &SessionOptions,
) -> Result<()> {
    if controller.fault().await? {
        log::warn!("fault active on the connected robot, attempting to clear");
        if !controller.clear_fault().await? {
            return Err(ToolrError::Controller(
                "fault on the connected robot could not be cleared".to_string(),
            ));
        }
        log::info!("fault cleared");
    }

    log::info!("enabling robot");
    controller.enable().await?;

    let start = Instant::now();
    loop {
        if controller.operational().await? {
            log::info!("robot is operational");
            return Ok(());
        }
        if let Some(timeout) = opts.timeout {
            if start.elapsed() >= timeout {
                return Err(ToolrError::NotOperational(start.elapsed()));
            }
        }
        tokio::time::sleep(opts.poll_interval).await;
    }
}
