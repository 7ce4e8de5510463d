mod config;
pub mod database;
mod kv;
pub mod persistence;

pub use config::{Config, DisplayConfig, LogConfig, RefreshConfig};
pub use database::Database;
pub use kv::{KvStore, MemoryStore};
pub use persistence::{Persistence, ACTIVE_TIMERS_KEY, HISTORY_KEY};

use std::path::PathBuf;

use crate::error::Result;

/// Returns the data directory, creating it if needed.
///
/// `MULTITIMER_DATA_DIR` overrides the location outright. Otherwise this is
/// `~/.config/multitimer[-dev]/`, with the `-dev` suffix when
/// `MULTITIMER_ENV=dev`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let dir = match std::env::var_os("MULTITIMER_DATA_DIR") {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("MULTITIMER_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("multitimer-dev")
            } else {
                base_dir.join("multitimer")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
