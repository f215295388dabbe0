//! Run-at-login registration.
//!
//! A single boolean toggle, keyed by a fixed display name and pointing at
//! this process's own executable. On Windows this is a logon-triggered
//! scheduled task (the provider needs elevation, which a plain Run key
//! would not grant); elsewhere it is an XDG autostart desktop entry.

#[cfg(not(windows))]
use std::path::PathBuf;

use tracing::info;

use crate::error::ThermalTrayError;

/// Display name of the login-task entry.
pub const TASK_NAME: &str = "Dell XPS Thermal Tray";

/// Whether a login-launch registration currently exists.
pub fn is_enabled() -> Result<bool, ThermalTrayError> {
    platform::is_enabled()
}

/// Register this executable to launch at the current user's logon.
pub fn enable() -> Result<(), ThermalTrayError> {
    let exe = std::env::current_exe()
        .map_err(|e| ThermalTrayError::Autostart(format!("Cannot resolve own path: {}", e)))?;
    platform::enable(&exe)?;
    info!("Registered {:?} to run at login", exe);
    Ok(())
}

/// Remove the login-launch registration if present.
pub fn disable() -> Result<(), ThermalTrayError> {
    platform::disable()?;
    info!("Removed run-at-login registration");
    Ok(())
}

#[cfg(windows)]
mod platform {
    use std::path::Path;
    use std::process::Command;

    use super::TASK_NAME;
    use crate::error::ThermalTrayError;

    pub fn is_enabled() -> Result<bool, ThermalTrayError> {
        let output = Command::new("schtasks")
            .args(["/Query", "/TN", TASK_NAME])
            .output()
            .map_err(|e| ThermalTrayError::Autostart(format!("Failed to run schtasks: {}", e)))?;
        // schtasks exits non-zero when the task does not exist.
        Ok(output.status.success())
    }

    pub fn enable(exe: &Path) -> Result<(), ThermalTrayError> {
        let output = Command::new("schtasks")
            .args(["/Create", "/F", "/SC", "ONLOGON", "/RL", "HIGHEST", "/TN", TASK_NAME, "/TR"])
            .arg(exe)
            .output()
            .map_err(|e| ThermalTrayError::Autostart(format!("Failed to run schtasks: {}", e)))?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ThermalTrayError::Autostart(format!(
                "schtasks /Create failed: {}",
                stderr.trim()
            )));
        }
        Ok(())
    }

    pub fn disable() -> Result<(), ThermalTrayError> {
        let output = Command::new("schtasks")
            .args(["/Delete", "/F", "/TN", TASK_NAME])
            .output()
            .map_err(|e| ThermalTrayError::Autostart(format!("Failed to run schtasks: {}", e)))?;
        // Deleting a missing task is a no-op from the toggle's viewpoint.
        if !output.status.success() && is_enabled()? {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ThermalTrayError::Autostart(format!(
                "schtasks /Delete failed: {}",
                stderr.trim()
            )));
        }
        Ok(())
    }
}

#[cfg(not(windows))]
mod platform {
    use std::path::Path;

    use super::{desktop_entry_path, entry_contents};
    use crate::error::ThermalTrayError;

    pub fn is_enabled() -> Result<bool, ThermalTrayError> {
        Ok(desktop_entry_path()?.exists())
    }

    pub fn enable(exe: &Path) -> Result<(), ThermalTrayError> {
        let path = desktop_entry_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| ThermalTrayError::Autostart(format!("Cannot create {:?}: {}", parent, e)))?;
        }
        std::fs::write(&path, entry_contents(exe))
            .map_err(|e| ThermalTrayError::Autostart(format!("Cannot write {:?}: {}", path, e)))
    }

    pub fn disable() -> Result<(), ThermalTrayError> {
        let path = desktop_entry_path()?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ThermalTrayError::Autostart(format!(
                "Cannot remove {:?}: {}",
                path, e
            ))),
        }
    }
}

#[cfg(not(windows))]
fn desktop_entry_path() -> Result<PathBuf, ThermalTrayError> {
    let config = dirs::config_dir()
        .ok_or_else(|| ThermalTrayError::Autostart("No user config directory".to_string()))?;
    Ok(config.join("autostart").join("xps-thermal-tray.desktop"))
}

#[cfg(not(windows))]
fn entry_contents(exe: &std::path::Path) -> String {
    format!(
        "[Desktop Entry]\n\
         Type=Application\n\
         Name={}\n\
         Exec={} watch\n\
         X-GNOME-Autostart-enabled=true\n",
        TASK_NAME,
        exe.display()
    )
}

#[cfg(all(test, not(windows)))]
mod tests {
    use super::*;

    #[test]
    fn test_entry_points_watch_at_own_binary() {
        let contents = entry_contents(std::path::Path::new("/usr/bin/xps-thermal-tray"));
        assert!(contents.starts_with("[Desktop Entry]\n"));
        assert!(contents.contains("Name=Dell XPS Thermal Tray\n"));
        assert!(contents.contains("Exec=/usr/bin/xps-thermal-tray watch\n"));
    }
}
