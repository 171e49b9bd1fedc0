use std::sync::Arc;

use crate::{
    management::KeyValueStore,
    types::{Credentials, RenewedCredentials, User},
    warning,
};

pub const ACCESS_TOKEN_KEY: &str = "spotify_access_token";
pub const REFRESH_TOKEN_KEY: &str = "spotify_refresh_token";
pub const PROFILE_KEY: &str = "userProfile";

/// Typed view over the persisted store.
///
/// The only place that knows the storage keys. Views and the request client
/// read and write credentials through this type instead of touching the store.
/// Cloning is cheap and every clone shares the same underlying store.
#[derive(Clone)]
pub struct CredentialManager {
    store: Arc<dyn KeyValueStore>,
}

impl CredentialManager {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        CredentialManager { store }
    }

    pub async fn access_token(&self) -> Option<String> {
        non_empty(self.store.get(ACCESS_TOKEN_KEY).await)
    }

    pub async fn refresh_token(&self) -> Option<String> {
        non_empty(self.store.get(REFRESH_TOKEN_KEY).await)
    }

    /// Logged in means an access credential is present.
    pub async fn is_logged_in(&self) -> bool {
        self.access_token().await.is_some()
    }

    /// Stores the credential pair delivered by a completed login.
    pub async fn set_tokens(&self, credentials: &Credentials) {
        self.store
            .set(ACCESS_TOKEN_KEY, &credentials.access_token)
            .await;
        self.store
            .set(REFRESH_TOKEN_KEY, &credentials.refresh_token)
            .await;
    }

    /// Stores the outcome of a successful renewal.
    ///
    /// The refresh credential is only overwritten when the backend rotated it.
    pub async fn store_renewed(&self, renewed: &RenewedCredentials) {
        self.store
            .set(ACCESS_TOKEN_KEY, &renewed.access_token)
            .await;
        if let Some(refresh_token) = renewed.refresh_token.as_deref() {
            if !refresh_token.is_empty() {
                self.store.set(REFRESH_TOKEN_KEY, refresh_token).await;
            }
        }
    }

    /// Drops both credentials, keeping the cached profile.
    pub async fn clear_tokens(&self) {
        self.store.delete(ACCESS_TOKEN_KEY).await;
        self.store.delete(REFRESH_TOKEN_KEY).await;
    }

    /// Full logout: credentials and the cached profile snapshot.
    ///
    /// Idempotent, and never fails locally.
    pub async fn logout(&self) {
        self.clear_tokens().await;
        self.store.delete(PROFILE_KEY).await;
    }

    /// Last profile fetched from the backend, if any.
    ///
    /// An unreadable snapshot is treated as absent.
    pub async fn cached_profile(&self) -> Option<User> {
        let raw = self.store.get(PROFILE_KEY).await?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                warning!("Ignoring unreadable cached profile: {}", e);
                None
            }
        }
    }

    pub async fn cache_profile(&self, user: &User) {
        match serde_json::to_string(user) {
            Ok(json) => self.store.set(PROFILE_KEY, &json).await,
            Err(e) => warning!("Failed to serialize profile: {}", e),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
