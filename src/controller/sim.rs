//! In-memory robot controller
//!
//! SimController implements the full collaborator contract over local state.
//! It enforces the same rejections a real controller does (mode gate,
//! duplicate names, reserved tool, active-tool removal), which makes it the
//! authoritative end of the check-then-act race in tests: orchestrator-level
//! advisory checks can be bypassed and the sim still refuses correctly.
//!
//! Used by the integration tests and by the CLI until a hardware transport
//! adapter exists.

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::controller::traits::{ControllerError, PoolRejection, RobotController};
use crate::domain::{FLANGE, OperatingMode, ToolEntry, ToolParameters};

struct SimState {
    mode: OperatingMode,
    fault: bool,
    fault_clearable: bool,
    enabled: bool,
    /// When false, enable() is accepted but the robot never reports
    /// operational. Exercises the bounded startup wait.
    reaches_operational: bool,
    /// One-shot transport failure injected into the next pool operation.
    fail_next_pool_op: bool,
    pool: Vec<ToolEntry>,
    active: String,
}

/// In-memory implementation of [`RobotController`].
pub struct SimController {
    state: Mutex<SimState>,
}

impl SimController {
    /// A controller that is already enabled and operational, in IDLE mode,
    /// with only the built-in flange tool.
    pub fn new() -> Self {
        Self {
            state: Mutex::new(SimState {
                mode: OperatingMode::Idle,
                fault: false,
                fault_clearable: true,
                enabled: true,
                reaches_operational: true,
                fail_next_pool_op: false,
                pool: vec![ToolEntry::flange()],
                active: FLANGE.to_string(),
            }),
        }
    }

    /// Start in a non-idle mode.
    pub fn with_mode(mut self, mode: OperatingMode) -> Self {
        self.state.get_mut().mode = mode;
        self
    }

    /// Start servo-off, requiring the enable sequence.
    pub fn powered_off(mut self) -> Self {
        self.state.get_mut().enabled = false;
        self
    }

    /// Start with an active fault. Clearable faults go away on clear_fault();
    /// non-clearable ones persist.
    pub fn with_fault(mut self, clearable: bool) -> Self {
        let state = self.state.get_mut();
        state.fault = true;
        state.fault_clearable = clearable;
        self
    }

    /// Accept enable() but never report operational.
    pub fn never_operational(mut self) -> Self {
        let state = self.state.get_mut();
        state.enabled = false;
        state.reaches_operational = false;
        self
    }

    /// Seed the pool with an extra tool.
    pub fn with_tool(mut self, name: &str, params: ToolParameters) -> Self {
        self.state.get_mut().pool.push(ToolEntry::new(name, params));
        self
    }

    /// Make the next pool operation fail with a transport error.
    pub async fn fail_next_pool_op(&self) {
        self.state.lock().await.fail_next_pool_op = true;
    }

    fn check_transport(state: &mut SimState) -> Result<(), ControllerError> {
        if state.fail_next_pool_op {
            state.fail_next_pool_op = false;
            return Err(ControllerError::Transport(
                "injected transport failure".to_string(),
            ));
        }
        Ok(())
    }

    fn check_idle(state: &SimState) -> Result<(), ControllerError> {
        if !state.mode.is_idle() {
            return Err(PoolRejection::WrongMode(state.mode).into());
        }
        Ok(())
    }
}

impl Default for SimController {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RobotController for SimController {
    async fn mode(&self) -> Result<OperatingMode, ControllerError> {
        Ok(self.state.lock().await.mode)
    }

    async fn switch_mode(&self, target: OperatingMode) -> Result<(), ControllerError> {
        let mut state = self.state.lock().await;
        if state.fault {
            return Err(ControllerError::Transport(
                "cannot switch mode while a fault is active".to_string(),
            ));
        }
        state.mode = target;
        Ok(())
    }

    async fn fault(&self) -> Result<bool, ControllerError> {
        Ok(self.state.lock().await.fault)
    }

    async fn clear_fault(&self) -> Result<bool, ControllerError> {
        let mut state = self.state.lock().await;
        if state.fault && state.fault_clearable {
            state.fault = false;
        }
        Ok(!state.fault)
    }

    async fn enable(&self) -> Result<(), ControllerError> {
        let mut state = self.state.lock().await;
        if state.fault {
            return Err(ControllerError::Transport(
                "cannot enable while a fault is active".to_string(),
            ));
        }
        state.enabled = true;
        Ok(())
    }

    async fn operational(&self) -> Result<bool, ControllerError> {
        let state = self.state.lock().await;
        Ok(state.enabled && !state.fault && state.reaches_operational)
    }

    async fn pool_list(&self) -> Result<Vec<ToolEntry>, ControllerError> {
        Ok(self.state.lock().await.pool.clone())
    }

    async fn pool_exists(&self, name: &str) -> Result<bool, ControllerError> {
        Ok(self.state.lock().await.pool.iter().any(|e| e.name == name))
    }

    async fn pool_params(&self, name: &str) -> Result<ToolParameters, ControllerError> {
        let state = self.state.lock().await;
        state
            .pool
            .iter()
            .find(|e| e.name == name)
            .map(|e| e.params.clone())
            .ok_or_else(|| PoolRejection::UnknownTool(name.to_string()).into())
    }

    async fn pool_add(&self, name: &str, params: &ToolParameters) -> Result<(), ControllerError> {
        let mut state = self.state.lock().await;
        Self::check_transport(&mut state)?;
        Self::check_idle(&state)?;
        if state.pool.iter().any(|e| e.name == name) {
            return Err(PoolRejection::DuplicateName(name.to_string()).into());
        }
        state.pool.push(ToolEntry::new(name, params.clone()));
        Ok(())
    }

    async fn pool_update(&self, name: &str, params: &ToolParameters) -> Result<(), ControllerError> {
        let mut state = self.state.lock().await;
        Self::check_transport(&mut state)?;
        Self::check_idle(&state)?;
        if name == FLANGE {
            return Err(PoolRejection::ReservedName(name.to_string()).into());
        }
        match state.pool.iter_mut().find(|e| e.name == name) {
            Some(entry) => {
                entry.params = params.clone();
                Ok(())
            }
            None => Err(PoolRejection::UnknownTool(name.to_string()).into()),
        }
    }

    async fn pool_remove(&self, name: &str) -> Result<(), ControllerError> {
        let mut state = self.state.lock().await;
        Self::check_transport(&mut state)?;
        Self::check_idle(&state)?;
        if name == FLANGE {
            return Err(PoolRejection::ReservedName(name.to_string()).into());
        }
        if !state.pool.iter().any(|e| e.name == name) {
            return Err(PoolRejection::UnknownTool(name.to_string()).into());
        }
        if state.active == name {
            return Err(PoolRejection::ActiveToolInUse(name.to_string()).into());
        }
        state.pool.retain(|e| e.name != name);
        Ok(())
    }

    async fn pool_switch_active(&self, name: &str) -> Result<(), ControllerError> {
        let mut state = self.state.lock().await;
        Self::check_transport(&mut state)?;
        Self::check_idle(&state)?;
        if !state.pool.iter().any(|e| e.name == name) {
            return Err(PoolRejection::UnknownTool(name.to_string()).into());
        }
        state.active = name.to_string();
        Ok(())
    }

    async fn active_name(&self) -> Result<String, ControllerError> {
        Ok(self.state.lock().await.active.clone())
    }
}
