use axum::{Extension, Router, routing::get};
use std::sync::Arc;
use tokio::{net::TcpListener, sync::Mutex, task::JoinHandle};

use crate::{api, types::Credentials, warning};

/// Router of the local callback server.
///
/// The backend may redirect to any path of the application (`/`,
/// `/top-tracks`, ...), so every path except `/health` is the callback.
pub fn callback_router(state: Arc<Mutex<Option<Credentials>>>) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .fallback(api::callback)
        .layer(Extension(state))
}

/// Binds `addr` and serves the callback router in a background task.
///
/// Binding happens before returning so an occupied port is reported to the
/// caller instead of failing silently inside the task.
pub async fn start_callback_server(
    addr: &str,
    state: Arc<Mutex<Option<Credentials>>>,
) -> std::io::Result<JoinHandle<()>> {
    let listener = TcpListener::bind(addr).await?;
    let app = callback_router(state);

    Ok(tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            warning!("Callback server stopped: {}", e);
        }
    }))
}
