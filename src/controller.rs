use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use tracing::{info, warn};

use crate::error::ThermalTrayError;
use crate::profile::ThermalProfile;
use crate::provider::SettingsProvider;

/// Receives the controller's reflection callbacks.
///
/// The tray menu model implements this; anything else that wants to mirror
/// profile state (the watch loop, a future real tray) can too.
pub trait ProfileObserver: Send + Sync {
    /// A read resolved the current profile, or failed trying.
    fn on_profile_resolved(&self, outcome: Result<ThermalProfile, String>);

    /// A requested profile change failed to apply.
    fn on_write_failed(&self, profile: ThermalProfile, error: String);
}

/// Owns the in-memory notion of the current thermal profile and all
/// traffic to the settings provider.
///
/// Provider traffic is single-flighted: writes take the flight lock
/// outright, and a refresh arriving while the lock is held queues exactly
/// one rerun instead of overlapping. That rerun re-reads firmware truth,
/// so a timer tick landing mid-write can never leave a stale profile on
/// screen.
pub struct ProfileController {
    provider: Arc<dyn SettingsProvider>,
    observer: Arc<dyn ProfileObserver>,
    property: String,
    current: Mutex<Option<ThermalProfile>>,
    flight: tokio::sync::Mutex<()>,
    refresh_queued: AtomicBool,
}

impl ProfileController {
    pub fn new(
        provider: Arc<dyn SettingsProvider>,
        observer: Arc<dyn ProfileObserver>,
        property: impl Into<String>,
    ) -> Self {
        Self {
            provider,
            observer,
            property: property.into(),
            current: Mutex::new(None),
            flight: tokio::sync::Mutex::new(()),
            refresh_queued: AtomicBool::new(false),
        }
    }

    /// The profile last confirmed by a successful read or write. `None`
    /// until the first successful provider interaction, and again after a
    /// failed read.
    pub fn current(&self) -> Option<ThermalProfile> {
        *self.current.lock().unwrap()
    }

    /// Query the provider and parse the result against the four known
    /// profile names. No retries; failures surface immediately.
    pub async fn get_current_profile(&self) -> Result<ThermalProfile, ThermalTrayError> {
        let raw = self.provider.read(&self.property).await?;
        raw.parse()
    }

    /// Write `profile` to the managed property. Success is assumed if the
    /// provider call does not fail; there is no read-back verification.
    pub async fn set_current_profile(
        &self,
        profile: ThermalProfile,
    ) -> Result<(), ThermalTrayError> {
        let flight = self.flight.lock().await;

        let result = match self.provider.write(&self.property, profile.as_str()).await {
            Ok(()) => {
                info!("Thermal profile set to {}", profile);
                *self.current.lock().unwrap() = Some(profile);
                self.observer.on_profile_resolved(Ok(profile));
                Ok(())
            }
            Err(e) => {
                self.observer.on_write_failed(profile, e.to_string());
                Err(e)
            }
        };

        // Drain any refresh that queued up behind this write.
        self.release_and_drain(flight).await;

        result
    }

    /// Read the current profile and reflect it through the observer.
    ///
    /// Invoked at startup and on every poll tick. If a refresh or write
    /// is already in flight, this queues a single rerun and returns
    /// instead of overlapping it; consecutive queued requests coalesce.
    pub async fn refresh_and_reflect(&self) {
        match self.flight.try_lock() {
            Ok(flight) => {
                self.refresh_locked().await;
                self.release_and_drain(flight).await;
            }
            Err(_) => {
                self.refresh_queued.store(true, Ordering::SeqCst);
                // The holder may have released between the failed try_lock
                // and the store, in which case nobody would run the queued
                // request until the next tick. Re-check so it cannot strand.
                if let Ok(flight) = self.flight.try_lock() {
                    self.release_and_drain(flight).await;
                }
            }
        }
    }

    /// Run queued refresh requests, release the flight lock, then close
    /// the window where a request lands between the last queue check and
    /// the release: re-check after dropping the guard and either take the
    /// rerun back or leave it to whoever holds the lock now (they drain
    /// the queue on their way out through this same path).
    async fn release_and_drain(&self, mut flight: tokio::sync::MutexGuard<'_, ()>) {
        loop {
            while self.refresh_queued.swap(false, Ordering::SeqCst) {
                self.refresh_locked().await;
            }
            drop(flight);
            if !self.refresh_queued.load(Ordering::SeqCst) {
                return;
            }
            match self.flight.try_lock() {
                Ok(guard) => flight = guard,
                Err(_) => return,
            }
        }
    }

    async fn refresh_locked(&self) {
        match self.get_current_profile().await {
            Ok(profile) => {
                *self.current.lock().unwrap() = Some(profile);
                self.observer.on_profile_resolved(Ok(profile));
            }
            Err(e) => {
                warn!("Profile refresh failed: {}", e);
                *self.current.lock().unwrap() = None;
                self.observer.on_profile_resolved(Err(e.to_string()));
            }
        }
    }
}
