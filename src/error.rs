use reqwest::StatusCode;
use thiserror::Error;

/// Failures of [`crate::backend::AuthenticatedRequestClient::request`].
///
/// Any HTTP status other than the renewal-triggering 401 is not an error here;
/// the response is handed back to the caller untouched.
#[derive(Error, Debug)]
pub enum RequestError {
    /// No access credential in the store. No network call was made.
    #[error("No access token available. Please run statify login")]
    NoCredential,

    /// The access credential was rejected and could not be renewed.
    #[error("Session expired. Please log in again.")]
    SessionExpired,

    /// The protected resource could not be reached at all.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

/// Failures of a single call to the credential renewal endpoint.
#[derive(Error, Debug)]
pub enum RenewalError {
    #[error("Renewal request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Renewal rejected with status {0}")]
    Rejected(StatusCode),

    #[error("Malformed renewal response: {0}")]
    Malformed(String),
}

/// Failures of the typed backend resource wrappers.
#[derive(Error, Debug)]
pub enum BackendError {
    #[error(transparent)]
    Request(#[from] RequestError),

    #[error("{message} (status {status})")]
    Status { status: StatusCode, message: String },

    #[error("Unexpected response from server: {0}")]
    Decode(reqwest::Error),

    #[error("Invalid backend url: {0}")]
    InvalidUrl(String),
}

impl BackendError {
    /// Whether the caller should drive the user back to the login prompt.
    pub fn requires_login(&self) -> bool {
        matches!(
            self,
            BackendError::Request(RequestError::NoCredential | RequestError::SessionExpired)
        )
    }
}

/// Failures while loading or writing the persisted key-value store.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage file is not valid JSON: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Failures of the interactive login flow.
#[derive(Error, Debug)]
pub enum LoginError {
    #[error("Could not fetch login url: {0}")]
    LoginUrl(#[from] reqwest::Error),

    #[error("Could not start callback server on {addr}: {source}")]
    CallbackServer {
        addr: String,
        source: std::io::Error,
    },

    #[error("Login failed or timed out.")]
    TimedOut,
}
