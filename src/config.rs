use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::inventory::SshOptions;

const DEFAULT_PROBE_TIMEOUT_SECS: u64 = 2;

/// Anything wrong with how the tool was invoked. Always raised before the
/// first host is contacted.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("specify either --computer-name or --computer-list-path, not both")]
    ConflictingSources,
    #[error("no hosts given: use --computer-name or --computer-list-path")]
    NoSource,
    #[error("host list file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("host list file {} contains no hosts", .0.display())]
    EmptyHostList(PathBuf),
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("settings file not found: {}", .0.display())]
    SettingsNotFound(PathBuf),
    #[error("invalid settings file {}: {source}", .path.display())]
    InvalidSettings {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Optional YAML settings file.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub probe_timeout_secs: u64,
    pub local_aliases: Vec<String>,
    pub ssh: SshOptions,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            probe_timeout_secs: DEFAULT_PROBE_TIMEOUT_SECS,
            local_aliases: Vec::new(),
            ssh: SshOptions::default(),
        }
    }
}

impl Settings {
    /// Default location: `<config_dir>/disk-report/config.yaml`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("disk-report").join("config.yaml"))
    }

    /// Load from an explicit path (which must exist), or from the default
    /// location if one is present, or fall back to defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::SettingsNotFound(path.to_path_buf()));
                }
                Self::from_file(path)
            }
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::from_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loading settings");
        Self::from_yaml(&text).map_err(|source| ConfigError::InvalidSettings {
            path: path.to_path_buf(),
            source,
        })
    }

    fn from_yaml(text: &str) -> Result<Self, serde_yaml::Error> {
        // An empty document deserializes to unit, not a mapping
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(text)
    }
}

/// Explicit inputs to one collection run.
#[derive(Debug, Clone)]
pub struct CollectOptions {
    pub probe_timeout: Duration,
    pub ssh: SshOptions,
    pub local_aliases: Vec<String>,
}

impl CollectOptions {
    /// Merge settings with command-line overrides; flags win.
    pub fn from_settings(
        settings: Settings,
        probe_timeout_secs: Option<u64>,
        ssh_user: Option<String>,
        ssh_port: Option<u16>,
    ) -> Self {
        let mut ssh = settings.ssh;
        if ssh_user.is_some() {
            ssh.user = ssh_user;
        }
        if ssh_port.is_some() {
            ssh.port = ssh_port;
        }

        Self {
            probe_timeout: Duration::from_secs(
                probe_timeout_secs.unwrap_or(settings.probe_timeout_secs),
            ),
            ssh,
            local_aliases: settings.local_aliases,
        }
    }
}
