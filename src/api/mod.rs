//! # API Module
//!
//! HTTP endpoints served by the local login callback server.
//!
//! - [`callback`] - Receives the browser redirect that carries the freshly issued
//!   `access_token` and `refresh_token` and hands them to the waiting login flow.
//! - [`health`] - Returns application status and version.
//!
//! ```rust,ignore
//! use axum::{Router, routing::get};
//! use statify::api::{callback, health};
//!
//! let app = Router::new()
//!     .route("/health", get(health))
//!     .fallback(callback);
//! ```

mod callback;
mod health;

pub use callback::callback;
pub use health::health;
