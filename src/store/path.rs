use std::path::PathBuf;

use anyhow::{anyhow, Result};
use directories::BaseDirs;

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".personal-library-manager";
/// JSON document holding the whole library.
const LIBRARY_FILE_NAME: &str = "library.txt";
/// Log output; the terminal itself is owned by the UI.
const LOG_FILE_NAME: &str = "library-manager.log";

/// Resolve the application data directory inside the user's home.
fn data_dir() -> Result<PathBuf> {
    let base_dirs = BaseDirs::new().ok_or_else(|| anyhow!("could not locate home directory"))?;
    Ok(base_dirs.home_dir().join(DATA_DIR_NAME))
}

/// Absolute path of the persisted library file.
pub fn library_path() -> Result<PathBuf> {
    Ok(data_dir()?.join(LIBRARY_FILE_NAME))
}

/// Absolute path of the log file.
pub fn log_path() -> Result<PathBuf> {
    Ok(data_dir()?.join(LOG_FILE_NAME))
}
