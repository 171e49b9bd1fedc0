//! Configuration management for statify.
//!
//! This module handles loading and accessing configuration values from environment
//! variables and `.env` files. It provides a centralized way to manage the backend
//! location, the local login callback address and the credential storage path.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults

use std::{env, path::PathBuf, time::Duration};

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_CALLBACK_ADDRESS: &str = "127.0.0.1:5173";
pub const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 600;
pub const DEFAULT_SEARCH_LIMIT: u32 = 10;

const APP_DIR: &str = "statify";

/// Loads environment variables from a `.env` file in the local data directory.
///
/// The file lives under `statify/.env` in the platform-specific local data
/// directory:
/// - Linux: `~/.local/share/statify/.env`
/// - macOS: `~/Library/Application Support/statify/.env`
/// - Windows: `%LOCALAPPDATA%/statify/.env`
///
/// A missing file is not an error since every setting has a default. A file
/// that exists but cannot be parsed is.
pub async fn load_env() -> Result<(), String> {
    let path = app_dir().join(".env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    match dotenv::from_path(&path) {
        Ok(()) => Ok(()),
        Err(dotenv::Error::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(format!("{}: {}", path.display(), e)),
    }
}

/// Base URL of the token-brokering backend, without a trailing slash.
pub fn api_url() -> String {
    env::var("STATIFY_API_URL")
        .map(|url| url.trim_end_matches('/').to_string())
        .unwrap_or_else(|_| DEFAULT_API_URL.to_string())
}

/// Address the local login callback server listens on.
pub fn callback_addr() -> String {
    env::var("STATIFY_CALLBACK_ADDRESS").unwrap_or_else(|_| DEFAULT_CALLBACK_ADDRESS.to_string())
}

/// Period of the background credential refresher.
pub fn refresh_interval() -> Duration {
    let secs = env::var("STATIFY_REFRESH_INTERVAL_SECS")
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .filter(|secs| *secs > 0)
        .unwrap_or(DEFAULT_REFRESH_INTERVAL_SECS);
    Duration::from_secs(secs)
}

/// Default number of results per category for `statify search`.
pub fn search_limit() -> u32 {
    env::var("STATIFY_SEARCH_LIMIT")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(DEFAULT_SEARCH_LIMIT)
}

/// Location of the persisted key-value store holding the credentials.
pub fn storage_path() -> PathBuf {
    match env::var("STATIFY_STORAGE_PATH") {
        Ok(path) if !path.is_empty() => PathBuf::from(path),
        _ => app_dir().join("storage.json"),
    }
}

fn app_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push(APP_DIR);
    path
}
