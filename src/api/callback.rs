use std::{collections::HashMap, sync::Arc};

use axum::{Extension, extract::Query, response::Html};
use tokio::sync::Mutex;

use crate::types::Credentials;

/// Receives the browser after the backend finished the provider login.
///
/// The backend redirects to the application root with `access_token` and
/// `refresh_token` in the query string. Both are required; the pair is handed
/// to the waiting login flow through the shared state.
pub async fn callback(
    Query(params): Query<HashMap<String, String>>,
    Extension(shared_state): Extension<Arc<Mutex<Option<Credentials>>>>,
) -> Html<&'static str> {
    let access_token = params.get("access_token").filter(|t| !t.is_empty());
    let refresh_token = params.get("refresh_token").filter(|t| !t.is_empty());

    let (Some(access_token), Some(refresh_token)) = (access_token, refresh_token) else {
        return Html("<h4>Missing access or refresh token.</h4>");
    };

    let mut state = shared_state.lock().await;
    *state = Some(Credentials {
        access_token: access_token.clone(),
        refresh_token: refresh_token.clone(),
    });

    Html("<h2>Login successful.</h2><p>You can close this browser window.</p>")
}
