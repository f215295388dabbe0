pub mod autostart;
pub mod cli;
pub mod config;
pub mod controller;
pub mod crashlog;
pub mod elevation;
pub mod error;
pub mod poller;
pub mod profile;
pub mod provider;

pub use controller::{ProfileController, ProfileObserver};
pub use error::ThermalTrayError;
pub use profile::{MarkState, ThermalProfile, TrayMenu};
pub use provider::{PowerShellProvider, SettingsProvider, MANAGED_PROPERTY};

/// Initialize tracing. `RUST_LOG` wins; otherwise the verbosity flag
/// picks the default level.
pub fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default)),
        )
        .init();
}
