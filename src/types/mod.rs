// autoplay-sync shared type definitions
// Each submodule defines types used across the background.

pub mod cookie;
pub mod errors;
pub mod install;
pub mod message;
pub mod preference;
pub mod settings;
pub mod tab;
