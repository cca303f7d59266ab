//! Tool orchestrator implementation
//!
//! All pool mutations on a running controller go through here. The
//! orchestrator is stateless per call: it holds no copy of the pool, takes no
//! locks of its own, and re-reads controller state on every operation. The
//! controller remains the single source of truth, so the local existence and
//! mode checks are advisory; when another client races us between check and
//! act, the controller's own rejection comes back through the same typed
//! taxonomy.

use std::sync::Arc;

use crate::controller::RobotController;
use crate::domain::{DEFAULT_QUAT_TOLERANCE, FLANGE, ToolEntry, ToolParameters};
use crate::error::{Result, ToolrError};

/// Orchestrates tool-pool reads and mutations against one controller
/// connection.
///
/// Mutating operations (`add`, `update`, `switch`, `remove`, `replace`) are
/// gated on IDLE mode; reads are not. Each operation is a short sequence of
/// blocking controller round-trips issued in order.
pub struct ToolOrchestrator<C: RobotController> {
    controller: Arc<C>,
    quat_tolerance: f64,
}

impl<C: RobotController> ToolOrchestrator<C> {
    /// Create an orchestrator with the default quaternion tolerance.
    pub fn new(controller: Arc<C>) -> Self {
        Self {
            controller,
            quat_tolerance: DEFAULT_QUAT_TOLERANCE,
        }
    }

    /// Create an orchestrator with a custom quaternion tolerance.
    pub fn with_tolerance(controller: Arc<C>, quat_tolerance: f64) -> Self {
        Self {
            controller,
            quat_tolerance,
        }
    }

    /// Full tool pool in controller-reported order. No mode requirement.
    pub async fn list(&self) -> Result<Vec<ToolEntry>> {
        Ok(self.controller.pool_list().await?)
    }

    /// Name of the currently active tool. No mode requirement.
    pub async fn active_name(&self) -> Result<String> {
        Ok(self.controller.active_name().await?)
    }

    /// Whether a tool with this name exists in the pool. No mode requirement.
    pub async fn exists(&self, name: &str) -> Result<bool> {
        Ok(self.controller.pool_exists(name).await?)
    }

    /// Parameters of an existing tool. No mode requirement.
    pub async fn params(&self, name: &str) -> Result<ToolParameters> {
        Ok(self.controller.pool_params(name).await?)
    }

    /// Parameters of the currently active tool. No mode requirement.
    pub async fn active_params(&self) -> Result<ToolParameters> {
        let name = self.controller.active_name().await?;
        Ok(self.controller.pool_params(&name).await?)
    }

    /// Add a new tool to the pool. The active tool is unchanged.
    ///
    /// Name and parameters are checked locally before any mutation is
    /// issued; an existing entry is never overwritten, remove it first or
    /// use [`update`](Self::update).
    pub async fn add(&self, name: &str, params: &ToolParameters) -> Result<()> {
        self.check_name(name)?;
        params.validate(self.quat_tolerance)?;
        self.require_idle().await?;

        if self.controller.pool_exists(name).await? {
            return Err(ToolrError::DuplicateName(name.to_string()));
        }

        log::info!("adding tool [{}] to the pool", name);
        self.controller.pool_add(name, params).await?;
        Ok(())
    }

    /// Replace the parameters of an existing tool in place. The active
    /// binding is unchanged.
    pub async fn update(&self, name: &str, params: &ToolParameters) -> Result<()> {
        self.check_name(name)?;
        params.validate(self.quat_tolerance)?;
        self.require_idle().await?;

        if !self.controller.pool_exists(name).await? {
            return Err(ToolrError::UnknownTool(name.to_string()));
        }

        log::info!("updating parameters of tool [{}]", name);
        self.controller.pool_update(name, params).await?;
        Ok(())
    }

    /// Make an existing tool the active one. The sentinel always qualifies.
    ///
    /// One controller call; idempotent, switching to the already-active tool
    /// succeeds.
    pub async fn switch(&self, name: &str) -> Result<()> {
        if name.is_empty() {
            return Err(ToolrError::EmptyName);
        }
        self.require_idle().await?;

        if !self.controller.pool_exists(name).await? {
            return Err(ToolrError::UnknownTool(name.to_string()));
        }

        log::info!("switching active tool to [{}]", name);
        self.controller.pool_switch_active(name).await?;
        Ok(())
    }

    /// Remove an existing tool from the pool.
    ///
    /// The sentinel and the currently active tool are rejected; switch away
    /// first. The controller has no "no active tool" state distinct from the
    /// sentinel, so removing the active tool is refused rather than
    /// attempted.
    pub async fn remove(&self, name: &str) -> Result<()> {
        self.check_name(name)?;
        self.require_idle().await?;

        if !self.controller.pool_exists(name).await? {
            return Err(ToolrError::UnknownTool(name.to_string()));
        }
        if self.controller.active_name().await? == name {
            return Err(ToolrError::ActiveToolInUse(name.to_string()));
        }

        log::info!("removing tool [{}] from the pool", name);
        self.controller.pool_remove(name).await?;
        Ok(())
    }

    /// Replace a tool definition: remove any existing entry under this name,
    /// switching the active tool to the sentinel first if needed, then add
    /// the new definition.
    ///
    /// Not atomic across controller calls. A failure mid-sequence surfaces
    /// the failing step's error and leaves the pool in that step's state; in
    /// particular, an interruption between remove and add leaves the pool
    /// without `name` defined. Parameters are validated up front so bad input
    /// never costs the existing entry.
    pub async fn replace(&self, name: &str, params: &ToolParameters) -> Result<()> {
        self.check_name(name)?;
        params.validate(self.quat_tolerance)?;
        self.require_idle().await?;

        if self.controller.pool_exists(name).await? {
            if self.controller.active_name().await? == name {
                log::warn!(
                    "tool [{}] is active, switching to [{}] before replacing it",
                    name,
                    FLANGE
                );
                self.controller.pool_switch_active(FLANGE).await?;
            }
            self.controller.pool_remove(name).await?;
        }

        log::info!("adding replacement definition for tool [{}]", name);
        self.controller.pool_add(name, params).await?;
        Ok(())
    }

    /// Mode gate shared by all mutating operations.
    async fn require_idle(&self) -> Result<()> {
        let mode = self.controller.mode().await?;
        if !mode.is_idle() {
            return Err(ToolrError::NotIdle(mode));
        }
        Ok(())
    }

    /// Local name checks: non-empty and not the reserved sentinel.
    fn check_name(&self, name: &str) -> Result<()> {
        if name.is_empty() {
            return Err(ToolrError::EmptyName);
        }
        if name == FLANGE {
            return Err(ToolrError::ReservedName(name.to_string()));
        }
        Ok(())
    }
}
