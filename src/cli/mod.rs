//! # CLI Module
//!
//! Command implementations for statify. Each command is a thin view over the
//! backend: it builds the shared [`BackendApi`], calls one resource, and renders
//! the result as a table or a few status lines.
//!
//! ## Commands
//!
//! ### Session
//! - [`login`] - Runs the browser login and stores the issued tokens
//! - [`logout`] - Clears tokens and the cached profile
//! - [`status`] - Shows the login state and the cached profile
//! - [`keepalive`] - Renews the access token periodically until interrupted
//!
//! ### Statistics
//! - [`profile`] - Fetches and shows the profile
//! - [`top_tracks`] / [`top_artists`] - Top lists for a listening period
//! - [`search`] - Searches artists, albums and tracks
//! - [`track`] / [`album`] / [`artist`] - Detail views
//!
//! ## Error Presentation
//!
//! - Missing token: asks the user to run `statify login`
//! - Expired session: the tokens are already cleared; asks to log in again
//! - Any other backend error: prints the backend's message
//!
//! ```bash
//! statify login
//! statify top-tracks --time-range short_term
//! statify search "daft punk" --category albums
//! ```

mod auth;
mod detail;
mod profile;
mod search;
mod top;

pub use auth::keepalive;
pub use auth::login;
pub use auth::logout;
pub use auth::status;
pub use detail::album;
pub use detail::artist;
pub use detail::track;
pub use profile::profile;
pub use search::search;
pub use top::top_artists;
pub use top::top_tracks;

use std::sync::Arc;

use crate::{
    backend::{AuthenticatedRequestClient, BackendApi},
    config, error,
    error::{BackendError, RequestError},
    management::{CredentialManager, FileStore},
};

/// Opens the persisted store and wraps it for credential access.
async fn credentials() -> CredentialManager {
    match FileStore::open_default().await {
        Ok(store) => CredentialManager::new(Arc::new(store)),
        Err(e) => error!(
            "Cannot open credential storage at {}. Err: {}",
            config::storage_path().display(),
            e
        ),
    }
}

/// Backend resources over the persisted credentials.
async fn backend() -> BackendApi {
    let api_url = config::api_url();
    let client = AuthenticatedRequestClient::new(credentials().await, &api_url);
    BackendApi::new(Arc::new(client), &api_url)
}

/// Prints `err` in user terms and exits.
fn fail(context: &str, err: BackendError) -> ! {
    if !err.requires_login() {
        error!("{}. Err: {}", context, err);
    }

    match err {
        BackendError::Request(RequestError::NoCredential) => {
            error!("Not logged in. Please run statify login")
        }
        _ => error!("Session expired. Please log in again with statify login"),
    }
}
