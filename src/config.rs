use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use toolr::domain::DEFAULT_QUAT_TOLERANCE;
use toolr::session::SessionOptions;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub log_level: Option<String>,
    pub robot: RobotConfig,
    pub session: SessionConfig,
    pub validation: ValidationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RobotConfig {
    /// Serial number of the robot to connect to, e.g. "Rizon4s-123456"
    pub serial: String,
}

impl Default for RobotConfig {
    fn default() -> Self {
        Self {
            serial: String::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub poll_interval_ms: u64,
    pub operational_timeout_ms: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 1000,
            operational_timeout_ms: 30000,
        }
    }
}

impl SessionConfig {
    pub fn options(&self) -> SessionOptions {
        SessionOptions {
            poll_interval: Duration::from_millis(self.poll_interval_ms),
            timeout: Some(Duration::from_millis(self.operational_timeout_ms)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Tolerance on the TCP quaternion norm
    pub quat_tolerance: f64,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            quat_tolerance: DEFAULT_QUAT_TOLERANCE,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: Some("info".to_string()),
            robot: RobotConfig::default(),
            session: SessionConfig::default(),
            validation: ValidationConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Try primary location: ~/.config/<project>/<project>.yml
        if let Some(config_dir) = dirs::config_dir() {
            let project_name = env!("CARGO_PKG_NAME");
            let primary_config = config_dir.join(project_name).join(format!("{}.yml", project_name));
            if primary_config.exists() {
                match Self::load_from_file(&primary_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        log::warn!("Failed to load config from {}: {}", primary_config.display(), e);
                    }
                }
            }
        }

        // Try fallback location: ./<project>.yml
        let project_name = env!("CARGO_PKG_NAME");
        let fallback_config = PathBuf::from(format!("{}.yml", project_name));
        if fallback_config.exists() {
            match Self::load_from_file(&fallback_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    log::warn!("Failed to load config from {}: {}", fallback_config.display(), e);
                }
            }
        }

        // No config file found, use defaults
        log::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        log::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.log_level.as_deref(), Some("info"));
        assert_eq!(config.session.poll_interval_ms, 1000);
        assert_eq!(config.validation.quat_tolerance, DEFAULT_QUAT_TOLERANCE);
    }

    #[test]
    fn test_session_options_conversion() {
        let session = SessionConfig {
            poll_interval_ms: 250,
            operational_timeout_ms: 5000,
        };
        let opts = session.options();
        assert_eq!(opts.poll_interval, Duration::from_millis(250));
        assert_eq!(opts.timeout, Some(Duration::from_millis(5000)));
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("toolr.yml");
        fs::write(
            &path,
            "robot:\n  serial: Rizon4s-123456\nvalidation:\n  quat_tolerance: 0.01\n",
        )
        .unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.robot.serial, "Rizon4s-123456");
        assert_eq!(config.validation.quat_tolerance, 0.01);
        // Unspecified sections fall back to defaults
        assert_eq!(config.session.operational_timeout_ms, 30000);
    }

    #[test]
    fn test_load_missing_explicit_file_fails() {
        let path = PathBuf::from("/nonexistent/toolr.yml");
        assert!(Config::load(Some(&path)).is_err());
    }
}
