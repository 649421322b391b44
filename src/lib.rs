//! autoplay-sync: keeps the YouTube autoplay preference in sync between the
//! site's preference cookie, extension storage and open YouTube tabs.
//!
//! This library crate exposes all modules for use by the host binary and integration tests.

pub mod app;
pub mod browser;
pub mod database;
pub mod host;
pub mod managers;
pub mod platform;
pub mod services;
pub mod types;
