// autoplay-sync platform abstraction
// Platform-specific paths, plus the platform description reported to
// extension pages through the `getPlatform` message.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::types::settings::TargetEnv;

#[cfg(target_os = "linux")]
mod linux;

#[cfg(target_os = "macos")]
mod macos;

#[cfg(target_os = "windows")]
mod windows;

pub(crate) const APP_DIR_NAME: &str = "autoplay-sync";

/// Returns the platform-specific configuration directory.
pub fn get_config_dir() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        linux::get_config_dir()
    }
    #[cfg(target_os = "macos")]
    {
        macos::get_config_dir()
    }
    #[cfg(target_os = "windows")]
    {
        windows::get_config_dir()
    }
    #[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
    {
        std::env::temp_dir().join(APP_DIR_NAME)
    }
}

/// Returns the platform-specific data directory (storage database lives here).
pub fn get_data_dir() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        linux::get_data_dir()
    }
    #[cfg(target_os = "macos")]
    {
        macos::get_data_dir()
    }
    #[cfg(target_os = "windows")]
    {
        windows::get_data_dir()
    }
    #[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
    {
        std::env::temp_dir().join(APP_DIR_NAME)
    }
}

/// Operating system and architecture in the browser's `PlatformInfo` vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformInfo {
    pub os: String,
    pub arch: String,
    pub target_env: TargetEnv,
}

/// Describes the platform this process runs on.
pub fn current_platform(target_env: TargetEnv) -> PlatformInfo {
    PlatformInfo {
        os: browser_os_name(std::env::consts::OS).to_string(),
        arch: browser_arch_name(std::env::consts::ARCH).to_string(),
        target_env,
    }
}

fn browser_os_name(os: &str) -> &str {
    match os {
        "macos" => "mac",
        "windows" => "win",
        "freebsd" | "netbsd" | "dragonfly" => "openbsd",
        other => other,
    }
}

fn browser_arch_name(arch: &str) -> &str {
    match arch {
        "x86_64" => "x86-64",
        "x86" => "x86-32",
        "aarch64" => "arm64",
        other => other,
    }
}
