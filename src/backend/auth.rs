use std::{sync::Arc, time::Duration};

use chrono::Local;
use reqwest::{Client, StatusCode};
use tokio::{
    sync::Mutex,
    task::JoinHandle,
    time::{Instant, interval_at},
};

use crate::{
    error::{LoginError, RenewalError},
    info,
    management::CredentialManager,
    server::start_callback_server,
    types::{Credentials, LoginUrlResponse, RenewedCredentials},
    warning,
};

/// How long [`login`] waits for the browser to come back.
const LOGIN_TIMEOUT: Duration = Duration::from_secs(60);

/// Location of the credential renewal endpoint for a backend base url.
pub fn renewal_url(api_url: &str) -> String {
    format!("{}/refresh-access-token", api_url.trim_end_matches('/'))
}

/// Exchanges a refresh credential for a new access credential.
///
/// Only HTTP 200 with a JSON body carrying a non-empty `access_token` counts
/// as success. The body may also carry a rotated `refresh_token`.
pub async fn renew_credentials(
    http: &Client,
    renewal_url: &str,
    refresh_token: &str,
) -> Result<RenewedCredentials, RenewalError> {
    let res = http
        .get(renewal_url)
        .query(&[("refresh_token", refresh_token)])
        .send()
        .await?;

    if res.status() != StatusCode::OK {
        return Err(RenewalError::Rejected(res.status()));
    }

    let body = res.text().await?;
    let renewed: RenewedCredentials =
        serde_json::from_str(&body).map_err(|e| RenewalError::Malformed(e.to_string()))?;
    if renewed.access_token.is_empty() {
        return Err(RenewalError::Malformed("empty access_token".to_string()));
    }

    Ok(renewed)
}

/// Asks the backend where to send the browser to start the provider login.
pub async fn fetch_login_url(http: &Client, api_url: &str) -> Result<String, reqwest::Error> {
    let url = format!("{}/login-url", api_url.trim_end_matches('/'));
    let res = http.get(&url).send().await?.error_for_status()?;
    let body: LoginUrlResponse = res.json().await?;
    Ok(body.url)
}

/// Runs the interactive login flow and stores the resulting credentials.
///
/// 1. Fetches the provider login url from the backend
/// 2. Starts the local callback server on `callback_addr`
/// 3. Opens the login url in the browser
/// 4. Waits for the redirect carrying `access_token` and `refresh_token`
/// 5. Persists both credentials
pub async fn login(
    http: &Client,
    api_url: &str,
    callback_addr: &str,
    credentials: &CredentialManager,
) -> Result<Credentials, LoginError> {
    let login_url = fetch_login_url(http, api_url).await?;

    let shared_state: Arc<Mutex<Option<Credentials>>> = Arc::new(Mutex::new(None));
    let server = start_callback_server(callback_addr, Arc::clone(&shared_state))
        .await
        .map_err(|source| LoginError::CallbackServer {
            addr: callback_addr.to_string(),
            source,
        })?;

    if webbrowser::open(&login_url).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            login_url
        )
    }

    let received = wait_for_credentials(shared_state, LOGIN_TIMEOUT).await;
    server.abort();

    let received = received.ok_or(LoginError::TimedOut)?;
    credentials.set_tokens(&received).await;
    Ok(received)
}

/// Polls the shared state until the callback handler fills it in.
async fn wait_for_credentials(
    shared_state: Arc<Mutex<Option<Credentials>>>,
    max_wait: Duration,
) -> Option<Credentials> {
    let start = Instant::now();

    while start.elapsed() < max_wait {
        let lock = shared_state.lock().await;
        if let Some(credentials) = lock.as_ref() {
            return Some(credentials.clone());
        }
        drop(lock);
        tokio::time::sleep(Duration::from_millis(500)).await;
    }

    None
}

/// Result of one background renewal round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// No refresh credential stored, or it was replaced or removed while the
    /// renewal was in flight; nothing was written.
    Skipped,
    Renewed,
    /// The renewal failed and the credentials were cleared.
    LoggedOut,
}

/// Renews the stored credentials once, independently of any request.
pub async fn refresh_credentials_once(
    http: &Client,
    renewal_url: &str,
    credentials: &CredentialManager,
) -> RefreshOutcome {
    let Some(refresh_token) = credentials.refresh_token().await else {
        return RefreshOutcome::Skipped;
    };

    match renew_credentials(http, renewal_url, &refresh_token).await {
        Ok(renewed) => {
            // Another process logged out or logged in meanwhile.
            if credentials.refresh_token().await.as_deref() != Some(refresh_token.as_str()) {
                return RefreshOutcome::Skipped;
            }
            credentials.store_renewed(&renewed).await;
            RefreshOutcome::Renewed
        }
        Err(e) => {
            warning!("Failed to refresh token: {}", e);
            credentials.clear_tokens().await;
            RefreshOutcome::LoggedOut
        }
    }
}

/// Renews the stored credentials every `period` until the task is aborted.
///
/// The first renewal happens one full period after the call. Rounds without a
/// refresh credential are skipped, so the task can outlive a logout and pick
/// up a later login.
pub fn spawn_credential_refresher(
    http: Client,
    api_url: &str,
    credentials: CredentialManager,
    period: Duration,
) -> JoinHandle<()> {
    let renewal_url = renewal_url(api_url);

    tokio::spawn(async move {
        let mut ticker = interval_at(Instant::now() + period, period);
        loop {
            ticker.tick().await;
            if refresh_credentials_once(&http, &renewal_url, &credentials).await
                == RefreshOutcome::Renewed
            {
                info!(
                    "Access token renewed at {}",
                    Local::now().format("%H:%M:%S")
                );
            }
        }
    })
}
