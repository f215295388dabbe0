use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use xps_thermal_tray::cli::{AutostartAction, Cli, Commands, OutputFormat};
use xps_thermal_tray::config::AppConfig;
use xps_thermal_tray::{autostart, crashlog, elevation, init_tracing, poller};
use xps_thermal_tray::{PowerShellProvider, ProfileController, ThermalProfile, TrayMenu};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    crashlog::install_panic_hook();

    let config = AppConfig::load(cli.config.as_deref())?;

    // The BIOS provider rejects non-elevated callers, so gate everything
    // up front, before any provider interaction. Exit code 0 matches the
    // original utility's behavior on this path.
    if let Err(e) = elevation::ensure_elevated() {
        eprintln!("{}. Closing...", e);
        std::process::exit(0);
    }

    match cli.command.unwrap_or(Commands::Watch) {
        Commands::Get { format } => get(&config, format).await,
        Commands::Set { profile } => set(&config, profile.into()).await,
        Commands::Watch => watch(&config).await,
        Commands::Autostart { action } => run_autostart(action),
    }
}

fn build_controller(config: &AppConfig, menu: Arc<TrayMenu>) -> ProfileController {
    let provider = Arc::new(PowerShellProvider::new(config.shell.clone()));
    ProfileController::new(provider, menu, config.managed_property.clone())
}

async fn get(config: &AppConfig, format: OutputFormat) -> anyhow::Result<()> {
    let controller = build_controller(config, Arc::new(TrayMenu::new()));
    let profile = controller
        .get_current_profile()
        .await
        .context("Failed to read the current thermal profile")?;

    match format {
        OutputFormat::Text => println!("{}", profile),
        OutputFormat::Json => println!("{}", serde_json::json!({ "profile": profile })),
    }
    Ok(())
}

async fn set(config: &AppConfig, profile: ThermalProfile) -> anyhow::Result<()> {
    let menu = Arc::new(TrayMenu::new());
    let controller = build_controller(config, menu.clone());

    menu.mark_pending(profile);
    controller
        .set_current_profile(profile)
        .await
        .with_context(|| format!("Failed to switch to {}", profile))?;

    println!("Thermal profile set to {}", profile);
    Ok(())
}

async fn watch(config: &AppConfig) -> anyhow::Result<()> {
    let menu = Arc::new(TrayMenu::new());
    let controller = Arc::new(build_controller(config, menu));
    let interval = Duration::from_secs(config.poll_interval_secs);

    let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
    let handle = poller::spawn(controller, interval, shutdown_rx);

    info!(
        "Watching thermal profile every {}s, Ctrl-C to stop",
        interval.as_secs()
    );
    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for Ctrl-C")?;

    shutdown_tx.send(true).ok();
    handle.await.context("Poll task panicked")?;
    Ok(())
}

fn run_autostart(action: AutostartAction) -> anyhow::Result<()> {
    match action {
        AutostartAction::Enable => {
            autostart::enable()?;
            println!("Run-at-login enabled");
        }
        AutostartAction::Disable => {
            autostart::disable()?;
            println!("Run-at-login disabled");
        }
        AutostartAction::Status => {
            let enabled = autostart::is_enabled()?;
            println!(
                "Run-at-login is {}",
                if enabled { "enabled" } else { "disabled" }
            );
        }
    }
    Ok(())
}
