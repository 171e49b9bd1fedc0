use std::sync::Arc;

use reqwest::{Response, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{
    backend::AuthenticatedRequestClient,
    error::BackendError,
    types::{Album, Artist, SearchResults, TimeRange, Track, User},
};

/// Types searched by [`BackendApi::search`].
const SEARCH_TYPES: &str = "artist,album,track";

/// Typed access to the protected backend resources.
///
/// Every call goes through the shared [`AuthenticatedRequestClient`], so the
/// renewal protocol applies uniformly. Non-success statuses are turned into
/// [`BackendError::Status`] carrying the backend's `error` message.
#[derive(Clone)]
pub struct BackendApi {
    client: Arc<AuthenticatedRequestClient>,
    api_url: String,
}

impl BackendApi {
    pub fn new(client: Arc<AuthenticatedRequestClient>, api_url: &str) -> Self {
        Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn client(&self) -> &AuthenticatedRequestClient {
        &self.client
    }

    /// Fetches the profile of the logged-in user and caches the snapshot.
    pub async fn user_profile(&self) -> Result<User, BackendError> {
        let user: User = self
            .get_json(&self.endpoint("/user-profile")?, "Failed to fetch user profile.")
            .await?;
        self.client.credentials().cache_profile(&user).await;
        Ok(user)
    }

    pub async fn top_tracks(&self, time_range: TimeRange) -> Result<Vec<Track>, BackendError> {
        let url = self.endpoint_with_params(
            "/top-tracks",
            &[("time_range", time_range.as_param())],
        )?;
        self.get_json(&url, "Failed to fetch top tracks.").await
    }

    pub async fn top_artists(&self, time_range: TimeRange) -> Result<Vec<Artist>, BackendError> {
        let url = self.endpoint_with_params(
            "/top-artists",
            &[("time_range", time_range.as_param())],
        )?;
        self.get_json(&url, "Failed to fetch top artists.").await
    }

    /// Searches artists, albums and tracks.
    ///
    /// A blank query yields empty results without contacting the backend.
    pub async fn search(&self, query: &str, limit: u32) -> Result<SearchResults, BackendError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(SearchResults::default());
        }

        let limit = limit.to_string();
        let url = self.endpoint_with_params(
            "/search",
            &[("q", query), ("type", SEARCH_TYPES), ("limit", &limit)],
        )?;
        self.get_json(&url, "Search failed").await
    }

    pub async fn track(&self, id: &str) -> Result<Track, BackendError> {
        let url = self.resource_endpoint("track", id)?;
        self.get_json(&url, "Failed to fetch track.").await
    }

    pub async fn album(&self, id: &str) -> Result<Album, BackendError> {
        let url = self.resource_endpoint("album", id)?;
        self.get_json(&url, "Failed to fetch album.").await
    }

    pub async fn artist(&self, id: &str) -> Result<Artist, BackendError> {
        let url = self.resource_endpoint("artist", id)?;
        self.get_json(&url, "Failed to fetch artist.").await
    }

    fn endpoint(&self, path: &str) -> Result<Url, BackendError> {
        let raw = format!("{}{}", self.api_url, path);
        Url::parse(&raw).map_err(|e| BackendError::InvalidUrl(format!("{}: {}", raw, e)))
    }

    /// `<api_url>/<kind>/<id>` with `id` as a single encoded path segment.
    fn resource_endpoint(&self, kind: &str, id: &str) -> Result<Url, BackendError> {
        if matches!(id, "" | "." | "..") {
            return Err(BackendError::InvalidUrl(format!("invalid {} id {:?}", kind, id)));
        }

        let mut url = self.endpoint("")?;
        url.path_segments_mut()
            .map_err(|()| BackendError::InvalidUrl(self.api_url.clone()))?
            .pop_if_empty()
            .push(kind)
            .push(id);
        Ok(url)
    }

    fn endpoint_with_params(&self, path: &str, params: &[(&str, &str)]) -> Result<Url, BackendError> {
        let mut url = self.endpoint(path)?;
        url.query_pairs_mut().extend_pairs(params);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &Url,
        fallback_message: &str,
    ) -> Result<T, BackendError> {
        let response = self.client.get(url.as_str()).await?;
        let response = check_status(response, fallback_message).await?;
        response.json::<T>().await.map_err(BackendError::Decode)
    }
}

/// Passes successful responses through, turns the rest into errors.
async fn check_status(response: Response, fallback_message: &str) -> Result<Response, BackendError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response
        .json::<Value>()
        .await
        .ok()
        .and_then(|body| body.get("error").and_then(Value::as_str).map(str::to_string))
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| fallback_message.to_string());

    Err(BackendError::Status { status, message })
}
