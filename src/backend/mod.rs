//! # Backend Integration Module
//!
//! Everything that talks to the token-brokering backend. The backend wraps the
//! Spotify Web API and owns the OAuth flow; this crate only ever sees the
//! issued access and refresh tokens.
//!
//! ```text
//! CLI Layer (views)
//!      ↓
//! BackendApi (typed resources)
//!      ↓
//! AuthenticatedRequestClient (bearer token, renewal on 401)
//!      ↓                         ↓
//! Protected resources      /refresh-access-token
//! ```
//!
//! ## Modules
//!
//! - [`client`] - [`AuthenticatedRequestClient`] and [`RequestOptions`]
//! - [`auth`] - Credential renewal, login flow and the background refresher
//! - [`resources`] - [`BackendApi`] wrappers for profile, top lists, search and
//!   track/album/artist detail
//!
//! ## Renewal Protocol
//!
//! 1. Attach `Authorization: Bearer <access token>` and send
//! 2. Anything but 401 goes back to the caller unmodified
//! 3. On 401, exchange the stored refresh token at `/refresh-access-token`
//! 4. On success store the new token(s) and re-send once; the retried
//!    response is returned whatever its status
//! 5. On failure clear both tokens and report an expired session
//!
//! ## Endpoints
//!
//! - `GET /login-url` - provider login url (unauthenticated)
//! - `GET /refresh-access-token?refresh_token=` - renewal (unauthenticated)
//! - `GET /user-profile`
//! - `GET /top-tracks?time_range=`
//! - `GET /top-artists?time_range=`
//! - `GET /search?q=&type=artist,album,track&limit=`
//! - `GET /track/{id}`, `GET /album/{id}`, `GET /artist/{id}`

pub mod auth;
pub mod client;
pub mod resources;

pub use client::AuthenticatedRequestClient;
pub use client::RequestOptions;
pub use resources::BackendApi;
