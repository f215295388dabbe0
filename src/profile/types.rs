use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ThermalTrayError;

/// The four thermal-management modes exposed by the XPS firmware.
///
/// Each variant corresponds 1:1 to the string the BIOS provider accepts and
/// returns for the managed property; the match is case-sensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ThermalProfile {
    UltraPerformance,
    Quiet,
    Cool,
    Optimized,
}

impl ThermalProfile {
    pub const ALL: [ThermalProfile; 4] = [
        ThermalProfile::UltraPerformance,
        ThermalProfile::Quiet,
        ThermalProfile::Cool,
        ThermalProfile::Optimized,
    ];

    /// The exact string the firmware provider uses for this profile.
    pub fn as_str(&self) -> &'static str {
        match self {
            ThermalProfile::UltraPerformance => "UltraPerformance",
            ThermalProfile::Quiet => "Quiet",
            ThermalProfile::Cool => "Cool",
            ThermalProfile::Optimized => "Optimized",
        }
    }
}

impl FromStr for ThermalProfile {
    type Err = ThermalTrayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "UltraPerformance" => Ok(ThermalProfile::UltraPerformance),
            "Quiet" => Ok(ThermalProfile::Quiet),
            "Cool" => Ok(ThermalProfile::Cool),
            "Optimized" => Ok(ThermalProfile::Optimized),
            other => Err(ThermalTrayError::InvalidProfile(other.to_string())),
        }
    }
}

impl fmt::Display for ThermalProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
