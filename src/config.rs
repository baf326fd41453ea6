//! Application configuration with sensible defaults.
//!
//! [`SyncConfig`] is loaded from a TOML file and controls the endpoint URL,
//! where the session is persisted, and the login checkup / operator
//! notification settings. Every field has a default so a missing or partial
//! config file still yields a usable configuration.

use crate::error::{Result, SyncError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// URL of the query endpoint.
    pub endpoint: String,
    /// Directory holding the persisted session. `None` uses the platform
    /// default under the user's config directory.
    pub state_dir: Option<PathBuf>,
    /// Login checkup settings.
    pub checkup: CheckupConfig,
    /// Operator notification settings.
    pub notify: NotifyConfig,
}

/// Settings for the periodic external-CLI login check.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckupConfig {
    /// Program to run. Empty string disables the checkup.
    pub command: String,
    /// Arguments passed to the program.
    pub args: Vec<String>,
    /// Text file the command is expected to produce.
    pub output_file: PathBuf,
    /// Seconds between checks. The first check runs immediately on start.
    pub interval_secs: u64,
}

/// Settings for operator email notifications.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NotifyConfig {
    /// Address that receives login alerts.
    pub operator_email: String,
    /// Sender address for outgoing alerts.
    pub from_address: String,
    /// SMTP relay hostname.
    pub smtp_relay: String,
    /// Optional SMTP username. When unset, mail is sent unauthenticated.
    pub smtp_username: Option<String>,
    /// Optional SMTP password.
    pub smtp_password: Option<String>,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:8080/graphql".to_owned(),
            state_dir: None,
            checkup: CheckupConfig::default(),
            notify: NotifyConfig::default(),
        }
    }
}

impl Default for CheckupConfig {
    fn default() -> Self {
        Self {
            command: String::new(),
            args: Vec::new(),
            output_file: PathBuf::from("checkup-output.txt"),
            interval_secs: 3600,
        }
    }
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            operator_email: String::new(),
            from_address: "todosync@localhost".to_owned(),
            smtp_relay: "localhost".to_owned(),
            smtp_username: None,
            smtp_password: None,
        }
    }
}

impl SyncConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| SyncError::Config(format!("cannot read {}: {e}", path.display())))?;
        let config: Self = toml::from_str(&contents)
            .map_err(|e| SyncError::Config(format!("cannot parse {}: {e}", path.display())))?;
        config.validate()?;
        Ok(config)
    }

    /// Default path for the config file.
    pub fn default_config_path() -> Option<PathBuf> {
        #[cfg(target_os = "windows")]
        {
            std::env::var_os("LOCALAPPDATA")
                .map(|d| PathBuf::from(d).join("todosync").join("config.toml"))
        }
        #[cfg(not(target_os = "windows"))]
        {
            std::env::var_os("HOME").map(|h| {
                PathBuf::from(h)
                    .join(".config")
                    .join("todosync")
                    .join("config.toml")
            })
        }
    }

    /// Validates this configuration.
    ///
    /// Checks:
    /// - `endpoint` must not be empty
    /// - `checkup.interval_secs` must be greater than 0
    /// - a configured checkup command requires an operator email
    pub fn validate(&self) -> Result<()> {
        if self.endpoint.trim().is_empty() {
            return Err(SyncError::Config("endpoint must not be empty".into()));
        }
        if self.checkup.interval_secs == 0 {
            return Err(SyncError::Config(
                "checkup.interval_secs must be greater than 0".into(),
            ));
        }
        if !self.checkup.command.trim().is_empty()
            && self.notify.operator_email.trim().is_empty()
        {
            return Err(SyncError::Config(
                "notify.operator_email is required when a checkup command is configured".into(),
            ));
        }
        Ok(())
    }

    /// Whether the login checkup is configured to run.
    pub fn checkup_enabled(&self) -> bool {
        !self.checkup.command.trim().is_empty()
    }
}
