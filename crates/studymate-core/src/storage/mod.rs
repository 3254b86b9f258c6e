mod config;
pub mod keys;
pub mod local_store;

pub use config::{Config, NotificationsConfig};
pub use local_store::LocalStore;

use std::path::PathBuf;

use crate::error::StorageError;

/// Returns the StudyMate data directory, creating it if needed.
///
/// `STUDYMATE_HOME` wins when set. Otherwise this is
/// `~/.config/studymate[-dev]/`, with the `-dev` suffix when
/// `STUDYMATE_ENV=dev`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, StorageError> {
    let dir = match std::env::var_os("STUDYMATE_HOME") {
        Some(home) => PathBuf::from(home),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("STUDYMATE_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("studymate-dev")
            } else {
                base_dir.join("studymate")
            }
        }
    };

    std::fs::create_dir_all(&dir).map_err(|e| StorageError::DataDir {
        path: dir.clone(),
        message: e.to_string(),
    })?;
    Ok(dir)
}
