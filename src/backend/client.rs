//! Bearer-authenticated HTTP calls with a single renewal on credential expiry.

use reqwest::{
    Client, Method, Response, StatusCode,
    header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue},
};
use serde::Serialize;
use tokio::sync::Mutex;

use crate::{
    backend::auth::{renew_credentials, renewal_url},
    error::RequestError,
    management::CredentialManager,
    warning,
};

/// Method, headers and body of a protected call.
///
/// The body is kept as bytes so the request can be re-issued after a renewal.
#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub method: Method,
    pub headers: HeaderMap,
    pub body: Option<Vec<u8>>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            method: Method::GET,
            headers: HeaderMap::new(),
            body: None,
        }
    }
}

impl RequestOptions {
    pub fn get() -> Self {
        Self::default()
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    pub fn header(mut self, name: reqwest::header::HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Serializes `value` as the JSON body and sets the content type.
    pub fn json<T: Serialize + ?Sized>(mut self, value: &T) -> Result<Self, serde_json::Error> {
        self.body = Some(serde_json::to_vec(value)?);
        self.headers
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(self)
    }
}

/// Issues requests against protected backend resources.
///
/// Every request carries `Authorization: Bearer <access credential>`. A 401
/// answer triggers at most one renewal through the backend and one retry of
/// the original request; whatever the retry returns goes back to the caller.
/// All other statuses are returned untouched.
///
/// Renewals are single-flight per client: when several requests hit a 401 at
/// the same time, the first one renews and the others reuse its result.
pub struct AuthenticatedRequestClient {
    http: Client,
    credentials: CredentialManager,
    renewal_url: String,
    renewal_lock: Mutex<()>,
}

impl AuthenticatedRequestClient {
    /// Creates a client renewing credentials against `api_url`.
    pub fn new(credentials: CredentialManager, api_url: &str) -> Self {
        Self::with_http_client(Client::new(), credentials, api_url)
    }

    /// Same as [`AuthenticatedRequestClient::new`] with a caller-supplied
    /// `reqwest` client, sharing its connection pool.
    pub fn with_http_client(http: Client, credentials: CredentialManager, api_url: &str) -> Self {
        Self {
            http,
            credentials,
            renewal_url: renewal_url(api_url),
            renewal_lock: Mutex::new(()),
        }
    }

    pub fn credentials(&self) -> &CredentialManager {
        &self.credentials
    }

    /// Sends `options` to `url` with the stored access credential attached.
    ///
    /// # Errors
    ///
    /// - [`RequestError::NoCredential`] when no access credential is stored;
    ///   nothing is sent.
    /// - [`RequestError::SessionExpired`] when the credential was rejected and
    ///   no refresh credential is stored, or the renewal failed. Both cases
    ///   clear the stored credentials.
    /// - [`RequestError::Network`] when the resource could not be reached.
    pub async fn request(
        &self,
        url: &str,
        options: RequestOptions,
    ) -> Result<Response, RequestError> {
        let Some(access_token) = self.credentials.access_token().await else {
            return Err(RequestError::NoCredential);
        };

        let response = self.send(url, &options, &access_token).await?;
        if response.status() != StatusCode::UNAUTHORIZED {
            return Ok(response);
        }

        let renewed_token = self.renew_after_rejection(&access_token).await?;
        let retried = self.send(url, &options, &renewed_token).await?;
        Ok(retried)
    }

    /// Shorthand for a plain `GET`.
    pub async fn get(&self, url: &str) -> Result<Response, RequestError> {
        self.request(url, RequestOptions::get()).await
    }

    async fn send(
        &self,
        url: &str,
        options: &RequestOptions,
        access_token: &str,
    ) -> Result<Response, reqwest::Error> {
        let mut headers = options.headers.clone();
        headers.remove(AUTHORIZATION);

        let mut builder = self
            .http
            .request(options.method.clone(), url)
            .headers(headers)
            .bearer_auth(access_token);
        if let Some(body) = &options.body {
            builder = builder.body(body.clone());
        }

        builder.send().await
    }

    /// Obtains a credential to retry with after `rejected` got a 401.
    async fn renew_after_rejection(&self, rejected: &str) -> Result<String, RequestError> {
        let _guard = self.renewal_lock.lock().await;

        // Another request renewed while this one waited for the lock.
        if let Some(current) = self.credentials.access_token().await {
            if current != rejected {
                return Ok(current);
            }
        }

        let Some(refresh_token) = self.credentials.refresh_token().await else {
            self.credentials.clear_tokens().await;
            return Err(RequestError::SessionExpired);
        };

        match renew_credentials(&self.http, &self.renewal_url, &refresh_token).await {
            Ok(renewed) => {
                self.credentials.store_renewed(&renewed).await;
                Ok(renewed.access_token)
            }
            Err(e) => {
                warning!("Could not renew access token: {}", e);
                self.credentials.clear_tokens().await;
                Err(RequestError::SessionExpired)
            }
        }
    }
}
