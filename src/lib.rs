//! Spotify Listening Statistics CLI Library
//!
//! This library provides the building blocks for browsing your own Spotify
//! listening statistics through a token-brokering backend. The backend owns the
//! OAuth flow with Spotify; this crate stores the issued credentials, attaches
//! them to every protected call, and renews them when the backend rejects them.
//!
//! # Modules
//!
//! - `api` - HTTP endpoints for the local login callback server
//! - `backend` - Authenticated request client and backend resource wrappers
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `error` - Error types shared across the crate
//! - `management` - Credential store and cached profile snapshot
//! - `server` - Local HTTP server receiving the login redirect
//! - `types` - Data structures and type definitions
//! - `utils` - Formatting helpers
//!
//! # Example
//!
//! ```
//! use statify::{config, cli};
//!
//! #[tokio::main]
//! async fn main() {
//!     if config::load_env().await.is_ok() {
//!         cli::status().await;
//!     }
//! }
//! ```

pub mod api;
pub mod backend;
pub mod cli;
pub mod config;
pub mod error;
pub mod management;
pub mod server;
pub mod types;
pub mod utils;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Fetching top tracks...");
/// info!("Found {} artists", count);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only the CLI layer uses this macro. Library code returns errors instead so
/// callers can decide how to present them.
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for recoverable issues, e.g. a failed write of the credential file or
/// a rejected credential renewal.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
