mod config;
pub mod database;
pub mod migrations;

pub use config::Config;
pub use database::{SqliteStore, UserRecord};

use std::path::PathBuf;

/// Returns the data directory, creating it if needed.
///
/// `LIFTQUEST_DATA_DIR` wins when set; otherwise `~/.config/liftquest`, or
/// `~/.config/liftquest-dev` when `LIFTQUEST_ENV=dev`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> std::io::Result<PathBuf> {
    let dir = match std::env::var_os("LIFTQUEST_DATA_DIR") {
        Some(custom) if !custom.is_empty() => PathBuf::from(custom),
        _ => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("LIFTQUEST_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("liftquest-dev")
            } else {
                base_dir.join("liftquest")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
