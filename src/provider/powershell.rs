use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, info};

use crate::error::ThermalTrayError;
use crate::provider::SettingsProvider;

/// Default shell binary. `powershell.exe` rather than `pwsh` because the
/// DellBIOSProvider module ships for Windows PowerShell.
pub const DEFAULT_SHELL: &str = "powershell.exe";

/// Settings provider backed by the vendor's `DellBIOSProvider` PowerShell
/// module, mounted as the `dellsmbios:` virtual drive.
pub struct PowerShellProvider {
    shell: String,
}

impl PowerShellProvider {
    pub fn new(shell: impl Into<String>) -> Self {
        Self { shell: shell.into() }
    }

    /// Prefix `body` with the provider session setup the module requires
    /// before it will accept get/set commands: a process-scoped execution
    /// policy, the module import, and a change into the virtual drive.
    fn session_script(body: &str) -> String {
        format!(
            "$ErrorActionPreference = 'Stop'\n\
             Set-ExecutionPolicy -ExecutionPolicy RemoteSigned -Scope Process\n\
             Import-Module -Name DellBIOSProvider\n\
             Set-Location dellsmbios:\n\
             {body}"
        )
    }

    async fn run(&self, body: &str) -> Result<String, ThermalTrayError> {
        let script = Self::session_script(body);
        debug!("Invoking {}: {}", self.shell, body);

        let output = Command::new(&self.shell)
            .arg("-NoProfile")
            .arg("-NonInteractive")
            .arg("-Command")
            .arg(&script)
            .output()
            .await
            .map_err(|e| {
                ThermalTrayError::Provider(format!("Failed to launch {}: {}", self.shell, e))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ThermalTrayError::Provider(format!(
                "{} exited with {}: {}",
                self.shell,
                output.status,
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

impl Default for PowerShellProvider {
    fn default() -> Self {
        Self::new(DEFAULT_SHELL)
    }
}

#[async_trait]
impl SettingsProvider for PowerShellProvider {
    async fn read(&self, path: &str) -> Result<String, ThermalTrayError> {
        let value = self
            .run(&format!("(Get-Item '{path}').CurrentValue"))
            .await?;
        if value.is_empty() {
            return Err(ThermalTrayError::Provider(format!(
                "Provider returned no value for {path}"
            )));
        }
        Ok(value)
    }

    async fn write(&self, path: &str, value: &str) -> Result<(), ThermalTrayError> {
        self.run(&format!("Set-Item '{path}' '{value}'")).await?;
        info!("Wrote {} = {}", path, value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_preamble_precedes_command() {
        let script = PowerShellProvider::session_script("Get-Item '.\\X'");
        let lines: Vec<&str> = script.lines().collect();
        assert_eq!(lines[0], "$ErrorActionPreference = 'Stop'");
        assert!(lines[1].contains("Set-ExecutionPolicy"));
        assert!(lines[1].contains("-Scope Process"));
        assert!(lines[2].contains("DellBIOSProvider"));
        assert_eq!(lines[3], "Set-Location dellsmbios:");
        assert_eq!(lines[4], "Get-Item '.\\X'");
    }
}
