//! Where the tool keeps its config file, logs and default region file.
//!
//! Debug builds and `cargo run` use the working directory. Release builds use
//! a `paint-polygon` folder under the platform config and data directories.

use std::path::PathBuf;

use crate::constants::DEFAULT_SAVE_FILE_NAME;

const APP_DIR_NAME: &str = "paint-polygon";

fn is_dev_mode() -> bool {
    std::env::var("CARGO").is_ok() || cfg!(debug_assertions)
}

/// `platform/paint-polygon`, or the working directory in dev mode or when
/// the platform has no such directory
fn app_dir(platform: fn() -> Option<PathBuf>) -> PathBuf {
    if is_dev_mode() {
        return PathBuf::from(".");
    }
    platform()
        .map(|dir| dir.join(APP_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from("."))
}

pub fn config_file() -> PathBuf {
    app_dir(dirs::config_dir).join("paint-polygon.json")
}

pub fn logs_dir() -> PathBuf {
    app_dir(dirs::data_dir).join("logs")
}

/// Where the painted region is saved when no path is given
pub fn default_save_file() -> PathBuf {
    app_dir(dirs::data_dir).join(DEFAULT_SAVE_FILE_NAME)
}

/// Create the config and log directories (no-op in dev mode)
pub fn ensure_directories() -> std::io::Result<()> {
    if is_dev_mode() {
        return Ok(());
    }
    std::fs::create_dir_all(app_dir(dirs::config_dir))?;
    std::fs::create_dir_all(logs_dir())
}
