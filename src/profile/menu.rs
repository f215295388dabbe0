use std::sync::Mutex;

use tracing::{info, warn};

use crate::controller::ProfileObserver;
use crate::profile::ThermalProfile;

/// Fixed menu positions for the four profile items, matching the tray
/// layout of the original utility (header, autostart toggle and a
/// separator occupy slots 0..=2).
pub const PROFILE_SLOTS: [(ThermalProfile, usize); 4] = [
    (ThermalProfile::Cool, 3),
    (ThermalProfile::Optimized, 4),
    (ThermalProfile::Quiet, 5),
    (ThermalProfile::UltraPerformance, 6),
];

const FIRST_SLOT: usize = 3;

/// UI position index for a profile.
pub fn slot_for_profile(profile: ThermalProfile) -> usize {
    PROFILE_SLOTS
        .iter()
        .find(|(p, _)| *p == profile)
        .map(|(_, slot)| *slot)
        .unwrap_or_else(|| unreachable!("every profile has a slot"))
}

/// Inverse of [`slot_for_profile`]; `None` for indices outside 3..=6.
pub fn profile_at_slot(slot: usize) -> Option<ThermalProfile> {
    PROFILE_SLOTS
        .iter()
        .find(|(_, s)| *s == slot)
        .map(|(p, _)| *p)
}

/// Visual state of one profile menu item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkState {
    /// No marker.
    Unmarked,
    /// Provisional marker while a requested change is in flight.
    Pending,
    /// The active marker; at most one slot holds it.
    Confirmed,
    /// The last requested change failed to apply.
    Failed,
}

/// In-process model of the four profile menu slots.
///
/// Stands in for the tray context menu, which is window chrome and out of
/// scope here. All mutation goes through the marking methods so the
/// "exactly one confirmed slot" rule cannot be violated from outside.
pub struct TrayMenu {
    slots: Mutex<[MarkState; 4]>,
}

impl TrayMenu {
    pub fn new() -> Self {
        Self {
            slots: Mutex::new([MarkState::Unmarked; 4]),
        }
    }

    /// Mark a requested-but-unconfirmed change.
    pub fn mark_pending(&self, profile: ThermalProfile) {
        let mut slots = self.slots.lock().unwrap();
        slots[slot_for_profile(profile) - FIRST_SLOT] = MarkState::Pending;
    }

    /// Mark the active profile; all sibling slots are cleared.
    pub fn mark_confirmed(&self, profile: ThermalProfile) {
        let mut slots = self.slots.lock().unwrap();
        *slots = [MarkState::Unmarked; 4];
        slots[slot_for_profile(profile) - FIRST_SLOT] = MarkState::Confirmed;
    }

    /// Mark a failed change on one slot, leaving the others untouched so a
    /// previously confirmed profile stays visible.
    pub fn mark_failed(&self, profile: ThermalProfile) {
        let mut slots = self.slots.lock().unwrap();
        slots[slot_for_profile(profile) - FIRST_SLOT] = MarkState::Failed;
    }

    /// Clear every marker (the "current profile unknown" rendering).
    pub fn clear(&self) {
        *self.slots.lock().unwrap() = [MarkState::Unmarked; 4];
    }

    pub fn state_at(&self, slot: usize) -> Option<MarkState> {
        let profile_idx = slot.checked_sub(FIRST_SLOT)?;
        self.slots.lock().unwrap().get(profile_idx).copied()
    }

    /// The profile currently carrying the active marker, if any.
    pub fn confirmed(&self) -> Option<ThermalProfile> {
        let slots = self.slots.lock().unwrap();
        PROFILE_SLOTS
            .iter()
            .find(|(_, slot)| slots[slot - FIRST_SLOT] == MarkState::Confirmed)
            .map(|(p, _)| *p)
    }
}

impl Default for TrayMenu {
    fn default() -> Self {
        Self::new()
    }
}

impl ProfileObserver for TrayMenu {
    fn on_profile_resolved(&self, outcome: Result<ThermalProfile, String>) {
        match outcome {
            Ok(profile) => {
                info!("Active thermal profile: {}", profile);
                self.mark_confirmed(profile);
            }
            Err(e) => {
                warn!("Could not resolve thermal profile: {}", e);
                self.clear();
            }
        }
    }

    fn on_write_failed(&self, profile: ThermalProfile, error: String) {
        warn!("Switch to {} failed: {}", profile, error);
        self.mark_failed(profile);
    }
}
