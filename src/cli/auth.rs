use std::sync::Arc;

use reqwest::Client;
use tabled::Table;

use crate::{
    backend::auth::{self, spawn_credential_refresher},
    config, error, info,
    management::{CredentialManager, FileStore},
    success,
    types::DetailTableRow,
    utils, warning,
};

/// Logs in through the browser and caches the profile right away.
pub async fn login() {
    let credentials = super::credentials().await;
    if credentials.is_logged_in().await {
        info!("Already logged in. Run statify logout first to switch accounts.");
        return;
    }

    let api_url = config::api_url();
    let callback_addr = config::callback_addr();
    info!("Waiting for the browser login on http://{} ...", callback_addr);

    if let Err(e) = auth::login(&Client::new(), &api_url, &callback_addr, &credentials).await {
        error!("{}", e);
    }
    success!("Login successful!");

    match super::backend().await.user_profile().await {
        Ok(user) => info!("Logged in as {}", user.username),
        Err(e) => warning!("Failed to fetch user profile. Err: {}", e),
    }
}

/// Clears the session. Never fails; storage problems are only reported.
pub async fn logout() {
    match FileStore::open_default().await {
        Ok(store) => CredentialManager::new(Arc::new(store)).logout().await,
        Err(e) => warning!(
            "Cannot open credential storage at {}. Err: {}",
            config::storage_path().display(),
            e
        ),
    }
    success!("Logged out.");
}

/// Shows the login state and the last known profile without network access.
pub async fn status() {
    let credentials = super::credentials().await;
    if !credentials.is_logged_in().await {
        info!("Not logged in.");
        return;
    }

    info!("Logged in.");
    let Some(user) = credentials.cached_profile().await else {
        info!("No cached profile yet. Run statify profile to fetch it.");
        return;
    };

    let rows = vec![
        DetailTableRow {
            field: "initials".to_string(),
            value: utils::initials(Some(&user.username)),
        },
        DetailTableRow {
            field: "username".to_string(),
            value: user.username,
        },
        DetailTableRow {
            field: "email".to_string(),
            value: user.email,
        },
    ];
    println!("{}", Table::new(rows));
}

/// Renews the access token every configured interval until Ctrl-C.
pub async fn keepalive() {
    let credentials = super::credentials().await;
    if credentials.refresh_token().await.is_none() {
        error!("Not logged in. Please run statify login");
    }

    let period = config::refresh_interval();
    info!(
        "Renewing the access token every {} seconds. Press Ctrl-C to stop.",
        period.as_secs()
    );

    let refresher =
        spawn_credential_refresher(Client::new(), &config::api_url(), credentials, period);
    if let Err(e) = tokio::signal::ctrl_c().await {
        warning!("Cannot listen for Ctrl-C. Err: {}", e);
    }
    refresher.abort();
    success!("Stopped.");
}
