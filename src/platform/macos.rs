// autoplay-sync platform paths for macOS
// Config and data both live under ~/Library/Application Support/autoplay-sync

use std::env;
use std::path::PathBuf;

use super::APP_DIR_NAME;

fn application_support() -> PathBuf {
    PathBuf::from(env::var("HOME").unwrap_or_else(|_| String::from("/tmp")))
        .join("Library")
        .join("Application Support")
}

pub fn get_config_dir() -> PathBuf {
    application_support().join(APP_DIR_NAME)
}

pub fn get_data_dir() -> PathBuf {
    application_support().join(APP_DIR_NAME)
}
