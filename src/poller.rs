use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::controller::ProfileController;

/// Default refresh cadence, matching the original utility's 5-minute timer.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(300);

/// Spawn the periodic refresh task.
///
/// The first tick fires immediately, covering the startup refresh; after
/// that the controller is asked to refresh every `interval` until
/// `shutdown` flips to `true`. Overlap with an in-flight refresh or write
/// is the controller's problem (it coalesces), not the timer's.
pub fn spawn(
    controller: Arc<ProfileController>,
    interval: Duration,
    mut shutdown: watch::Receiver<bool>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    debug!("Poll tick");
                    controller.refresh_and_reflect().await;
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        info!("Poller shutting down");
                        break;
                    }
                }
            }
        }
    })
}
