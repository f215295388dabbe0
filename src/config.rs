use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ThermalTrayError;
use crate::poller::DEFAULT_POLL_INTERVAL;
use crate::provider::{powershell::DEFAULT_SHELL, MANAGED_PROPERTY};

/// User-tunable settings. Every field has a default, so a missing file or
/// a partial file both work.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Seconds between periodic profile refreshes.
    pub poll_interval_secs: u64,

    /// Virtual path of the managed property on the provider drive.
    pub managed_property: String,

    /// Shell binary used to reach the BIOS provider.
    pub shell: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: DEFAULT_POLL_INTERVAL.as_secs(),
            managed_property: MANAGED_PROPERTY.to_string(),
            shell: DEFAULT_SHELL.to_string(),
        }
    }
}

impl AppConfig {
    /// Load from `path` if given, otherwise from the default location.
    /// An absent file yields defaults; a malformed file is an error.
    pub fn load(path: Option<&Path>) -> Result<Self, ThermalTrayError> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => match default_path() {
                Some(p) => p,
                None => return Ok(Self::default()),
            },
        };

        if !path.exists() {
            debug!("No config at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(&path)
            .map_err(|e| ThermalTrayError::Config(format!("Cannot read {:?}: {}", path, e)))?;
        toml::from_str(&raw)
            .map_err(|e| ThermalTrayError::Config(format!("Cannot parse {:?}: {}", path, e)))
    }
}

/// `<config_dir>/xps-thermal-tray/config.toml`, if a config dir exists.
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("xps-thermal-tray").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.poll_interval_secs, DEFAULT_POLL_INTERVAL.as_secs());
        assert_eq!(config.poll_interval_secs, 300);
        assert_eq!(config.managed_property, r".\PreEnabled\ThermalManagement");
        assert_eq!(config.shell, "powershell.exe");
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load(Some(&dir.path().join("nope.toml"))).unwrap();
        assert_eq!(config.poll_interval_secs, 300);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "poll_interval_secs = 60\n").unwrap();

        let config = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(config.poll_interval_secs, 60);
        assert_eq!(config.shell, "powershell.exe");
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "poll_interval_secs = \"soon\"\n").unwrap();

        let err = AppConfig::load(Some(&path)).unwrap_err();
        assert!(matches!(err, ThermalTrayError::Config(_)));
    }
}
