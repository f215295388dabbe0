use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::profile::ThermalProfile;

/// Thermal profile switcher for Dell XPS laptops
#[derive(Parser, Debug)]
#[command(name = "xps-thermal-tray")]
#[command(version, about = "Thermal profile switcher for Dell XPS laptops")]
pub struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the current thermal profile
    Get {
        /// Output format
        #[arg(long, default_value = "text")]
        format: OutputFormat,
    },

    /// Switch to a thermal profile
    Set {
        /// Profile to apply
        profile: ProfileArg,
    },

    /// Poll the firmware periodically and reflect profile changes
    /// (default when no command is given)
    Watch,

    /// Manage the run-at-login registration
    Autostart {
        #[command(subcommand)]
        action: AutostartAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum AutostartAction {
    /// Register this executable to launch at logon
    Enable,
    /// Remove the logon registration
    Disable,
    /// Show whether the logon registration exists
    Status,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum OutputFormat {
    Text,
    Json,
}

/// CLI spelling of the four profiles.
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum ProfileArg {
    UltraPerformance,
    Quiet,
    Cool,
    Optimized,
}

impl From<ProfileArg> for ThermalProfile {
    fn from(arg: ProfileArg) -> Self {
        match arg {
            ProfileArg::UltraPerformance => ThermalProfile::UltraPerformance,
            ProfileArg::Quiet => ThermalProfile::Quiet,
            ProfileArg::Cool => ThermalProfile::Cool,
            ProfileArg::Optimized => ThermalProfile::Optimized,
        }
    }
}
