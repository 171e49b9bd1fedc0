#![allow(dead_code)]

use std::{
    collections::{HashMap, HashSet},
    net::SocketAddr,
    sync::{Arc, Mutex},
};

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::json;
use statify::{
    backend::AuthenticatedRequestClient,
    management::{ACCESS_TOKEN_KEY, CredentialManager, MemoryStore, REFRESH_TOKEN_KEY},
};
use tokio::{net::TcpListener, task::JoinHandle};

/// What the fake `/refresh-access-token` answers.
#[derive(Debug, Clone)]
pub enum Renewal {
    Issue {
        access_token: String,
        refresh_token: Option<String>,
    },
    Reject(StatusCode),
    Malformed,
}

/// One request seen by a protected route.
#[derive(Debug, Clone)]
pub struct ResourceCall {
    pub path: String,
    pub authorization: Vec<String>,
    pub query: HashMap<String, String>,
}

pub struct BackendState {
    pub valid_tokens: Mutex<HashSet<String>>,
    pub renewal: Mutex<Renewal>,
    pub resource_calls: Mutex<Vec<ResourceCall>>,
    pub renewal_calls: Mutex<Vec<String>>,
    pub login_url_calls: Mutex<usize>,
}

impl BackendState {
    fn authorized(&self, headers: &HeaderMap) -> bool {
        let valid = self.valid_tokens.lock().unwrap();
        headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .is_some_and(|token| valid.contains(token))
    }

    fn record(&self, path: &str, headers: &HeaderMap, query: HashMap<String, String>) {
        let authorization = headers
            .get_all(AUTHORIZATION)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .map(str::to_string)
            .collect();
        self.resource_calls.lock().unwrap().push(ResourceCall {
            path: path.to_string(),
            authorization,
            query,
        });
    }
}

/// In-process stand-in for the token-brokering backend.
pub struct FakeBackend {
    pub addr: SocketAddr,
    pub state: Arc<BackendState>,
    server: JoinHandle<()>,
}

impl FakeBackend {
    /// Starts a backend accepting `valid_tokens` and renewing as `renewal`.
    pub async fn start(valid_tokens: &[&str], renewal: Renewal) -> Self {
        let state = Arc::new(BackendState {
            valid_tokens: Mutex::new(valid_tokens.iter().map(|t| t.to_string()).collect()),
            renewal: Mutex::new(renewal),
            resource_calls: Mutex::new(Vec::new()),
            renewal_calls: Mutex::new(Vec::new()),
            login_url_calls: Mutex::new(0),
        });

        let app = Router::new()
            .route("/login-url", get(login_url))
            .route("/refresh-access-token", get(refresh_access_token))
            .route("/user-profile", get(user_profile))
            .route("/top-tracks", get(top_tracks))
            .route("/top-artists", get(top_artists))
            .route("/search", get(search))
            .route("/track/{id}", get(track))
            .route("/server-error", get(server_error))
            .route("/echo", post(echo))
            .with_state(Arc::clone(&state));

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            addr,
            state,
            server,
        }
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn resource_url(&self, path: &str) -> String {
        format!("{}{}", self.url(), path)
    }

    pub fn resource_calls(&self) -> Vec<ResourceCall> {
        self.state.resource_calls.lock().unwrap().clone()
    }

    pub fn renewal_calls(&self) -> Vec<String> {
        self.state.renewal_calls.lock().unwrap().clone()
    }

    pub fn accept(&self, token: &str) {
        self.state
            .valid_tokens
            .lock()
            .unwrap()
            .insert(token.to_string());
    }
}

impl Drop for FakeBackend {
    fn drop(&mut self) {
        self.server.abort();
    }
}

/// Store holding the given access and refresh tokens.
pub fn store_with(access: Option<&str>, refresh: Option<&str>) -> Arc<MemoryStore> {
    let mut entries = Vec::new();
    if let Some(access) = access {
        entries.push((ACCESS_TOKEN_KEY, access));
    }
    if let Some(refresh) = refresh {
        entries.push((REFRESH_TOKEN_KEY, refresh));
    }
    Arc::new(MemoryStore::with_entries(entries))
}

pub fn client_for(backend: &FakeBackend, store: &Arc<MemoryStore>) -> AuthenticatedRequestClient {
    AuthenticatedRequestClient::new(CredentialManager::new(store.clone()), &backend.url())
}

/// An address nothing listens on.
pub async fn dead_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "error": "The access token expired" })),
    )
        .into_response()
}

async fn login_url(State(state): State<Arc<BackendState>>) -> Response {
    *state.login_url_calls.lock().unwrap() += 1;
    Json(json!({ "url": "https://accounts.example.com/authorize?client_id=abc" })).into_response()
}

async fn refresh_access_token(
    State(state): State<Arc<BackendState>>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    state
        .renewal_calls
        .lock()
        .unwrap()
        .push(query.get("refresh_token").cloned().unwrap_or_default());

    let renewal = state.renewal.lock().unwrap().clone();
    match renewal {
        Renewal::Issue {
            access_token,
            refresh_token,
        } => {
            let body = match refresh_token {
                Some(refresh_token) => {
                    json!({ "access_token": access_token, "refresh_token": refresh_token })
                }
                None => json!({ "access_token": access_token }),
            };
            Json(body).into_response()
        }
        Renewal::Reject(status) => {
            (status, Json(json!({ "error": "invalid_grant" }))).into_response()
        }
        Renewal::Malformed => (StatusCode::OK, "not json").into_response(),
    }
}

async fn user_profile(State(state): State<Arc<BackendState>>, headers: HeaderMap) -> Response {
    state.record("/user-profile", &headers, HashMap::new());
    if !state.authorized(&headers) {
        return unauthorized();
    }
    Json(json!({
        "username": "Ada Lovelace",
        "email": "ada@example.com",
        "followers": 1815,
        "image": "https://img.example.com/ada.png",
        "country": "GB"
    }))
    .into_response()
}

async fn top_tracks(
    State(state): State<Arc<BackendState>>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    state.record("/top-tracks", &headers, query);
    if !state.authorized(&headers) {
        return unauthorized();
    }
    Json(json!([
        {
            "id": "t1",
            "name": "Harder, Better, Faster, Stronger",
            "artists": [{ "id": "a1", "name": "Daft Punk" }],
            "album": { "id": "al1", "name": "Discovery" },
            "albumImage": "https://img.example.com/discovery.png",
            "explicit": false,
            "duration_ms": 224693,
            "popularity": 80
        },
        {
            "id": "t2",
            "name": "Around the World",
            "artists": [{ "id": "a1", "name": "Daft Punk" }],
            "explicit": false,
            "duration_ms": 429533,
            "popularity": 75
        }
    ]))
    .into_response()
}

async fn top_artists(
    State(state): State<Arc<BackendState>>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    state.record("/top-artists", &headers, query);
    if !state.authorized(&headers) {
        return unauthorized();
    }
    Json(json!([
        {
            "id": "a1",
            "name": "Daft Punk",
            "genres": ["french house", "electro"],
            "image": "",
            "followers": 9000000,
            "popularity": 82
        }
    ]))
    .into_response()
}

async fn search(
    State(state): State<Arc<BackendState>>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    state.record("/search", &headers, query);
    if !state.authorized(&headers) {
        return unauthorized();
    }
    Json(json!({
        "artists": [{ "id": "a1", "name": "Daft Punk", "genres": [], "followers": 1, "popularity": 2 }],
        "albums": [],
        "tracks": [{ "id": "t1", "name": "One More Time", "duration_ms": 320357 }]
    }))
    .into_response()
}

async fn track(
    State(state): State<Arc<BackendState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    state.record(&format!("/track/{}", id), &headers, HashMap::new());
    if !state.authorized(&headers) {
        return unauthorized();
    }
    if id == "missing" {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Track not found" })),
        )
            .into_response();
    }
    Json(json!({
        "id": id,
        "name": "Digital Love",
        "artists": [{ "id": "a1", "name": "Daft Punk" }],
        "explicit": false,
        "duration_ms": 301000,
        "popularity": 70,
        "previewUrl": "https://p.example.com/digital-love.mp3"
    }))
    .into_response()
}

async fn server_error(State(state): State<Arc<BackendState>>, headers: HeaderMap) -> Response {
    state.record("/server-error", &headers, HashMap::new());
    (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded").into_response()
}

async fn echo(State(state): State<Arc<BackendState>>, headers: HeaderMap, body: String) -> Response {
    state.record("/echo", &headers, HashMap::new());
    if !state.authorized(&headers) {
        return unauthorized();
    }
    let content_type = headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    Json(json!({ "body": body, "content_type": content_type })).into_response()
}
