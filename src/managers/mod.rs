// autoplay-sync state managers
// Managers own process lifecycle and the host's view of open tabs.

pub mod lifecycle_manager;
pub mod tab_registry;
