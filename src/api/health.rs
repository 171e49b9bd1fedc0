use std::sync::Arc;

use axum::{Extension, response::Json};
use serde_json::{Value, json};
use tokio::sync::Mutex;

use crate::types::Credentials;

/// Liveness of the callback server and whether the login redirect arrived.
pub async fn health(
    Extension(shared_state): Extension<Arc<Mutex<Option<Credentials>>>>,
) -> Json<Value> {
    let login_received = shared_state.lock().await.is_some();

    Json(json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "login_received": login_received,
    }))
}
