pub mod powershell;

use async_trait::async_trait;

use crate::error::ThermalTrayError;

pub use powershell::PowerShellProvider;

/// Virtual path of the one firmware setting this utility manages.
pub const MANAGED_PROPERTY: &str = r".\PreEnabled\ThermalManagement";

/// Narrow seam over the external settings channel.
///
/// The shipped implementation shells out to the vendor's PowerShell
/// provider; keeping the surface to two methods lets a direct SMBIOS
/// backend drop in without touching controller logic.
#[async_trait]
pub trait SettingsProvider: Send + Sync {
    /// Current string value of the property at `path`.
    async fn read(&self, path: &str) -> Result<String, ThermalTrayError>;

    /// Write `value` to the property at `path`. No read-back verification
    /// is performed; success means the channel reported none.
    async fn write(&self, path: &str, value: &str) -> Result<(), ThermalTrayError>;
}
