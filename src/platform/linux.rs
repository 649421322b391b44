// autoplay-sync platform paths for Linux
// Config: ~/.config/autoplay-sync
// Data:   ~/.local/share/autoplay-sync

use std::env;
use std::path::PathBuf;

use super::APP_DIR_NAME;

/// Uses `$XDG_CONFIG_HOME/autoplay-sync` if set, otherwise `~/.config/autoplay-sync`.
pub fn get_config_dir() -> PathBuf {
    if let Ok(xdg) = env::var("XDG_CONFIG_HOME") {
        PathBuf::from(xdg).join(APP_DIR_NAME)
    } else {
        let home = env::var("HOME").unwrap_or_else(|_| String::from("/tmp"));
        PathBuf::from(home).join(".config").join(APP_DIR_NAME)
    }
}

/// Uses `$XDG_DATA_HOME/autoplay-sync` if set, otherwise `~/.local/share/autoplay-sync`.
pub fn get_data_dir() -> PathBuf {
    if let Ok(xdg) = env::var("XDG_DATA_HOME") {
        PathBuf::from(xdg).join(APP_DIR_NAME)
    } else {
        let home = env::var("HOME").unwrap_or_else(|_| String::from("/tmp"));
        PathBuf::from(home)
            .join(".local")
            .join("share")
            .join(APP_DIR_NAME)
    }
}
