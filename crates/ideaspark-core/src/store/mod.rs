mod config;
pub mod journal;
pub mod snapshot;

pub use config::Config;
pub use journal::Journal;
pub use snapshot::{AppState, SnapshotStore};

use std::path::PathBuf;

use crate::error::StorageError;

/// Returns `~/.config/ideaspark[-dev]/` based on IDEASPARK_ENV, or the
/// directory named by IDEASPARK_DATA_DIR when set.
///
/// Set IDEASPARK_ENV=dev to use a separate development data directory.
pub fn data_dir() -> Result<PathBuf, StorageError> {
    let dir = match std::env::var("IDEASPARK_DATA_DIR") {
        Ok(explicit) => PathBuf::from(explicit),
        Err(_) => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("IDEASPARK_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("ideaspark-dev")
            } else {
                base_dir.join("ideaspark")
            }
        }
    };

    std::fs::create_dir_all(&dir).map_err(|e| StorageError::DataDir(e.to_string()))?;
    Ok(dir)
}
