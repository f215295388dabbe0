pub mod menu;
pub mod types;

pub use menu::{profile_at_slot, slot_for_profile, MarkState, TrayMenu, PROFILE_SLOTS};
pub use types::ThermalProfile;
