use std::sync::Arc;

use statify::{
    error::StoreError,
    management::{
        ACCESS_TOKEN_KEY, CredentialManager, FileStore, KeyValueStore, MemoryStore, PROFILE_KEY,
        REFRESH_TOKEN_KEY,
    },
    types::{Credentials, RenewedCredentials, User},
};

fn ada() -> User {
    User {
        username: "Ada Lovelace".to_string(),
        email: "ada@example.com".to_string(),
        followers: 1815,
        image: String::new(),
        country: "GB".to_string(),
    }
}

fn logged_in_store() -> Arc<MemoryStore> {
    Arc::new(MemoryStore::with_entries([
        (ACCESS_TOKEN_KEY, "access-1"),
        (REFRESH_TOKEN_KEY, "refresh-1"),
        (PROFILE_KEY, r#"{"username":"Ada Lovelace","email":"ada@example.com"}"#),
    ]))
}

#[tokio::test]
async fn test_logout_twice_equals_logout_once() {
    let store = logged_in_store();
    let credentials = CredentialManager::new(store.clone());

    credentials.logout().await;
    let once = store.snapshot().await;
    credentials.logout().await;
    let twice = store.snapshot().await;

    assert!(once.is_empty());
    assert_eq!(once, twice);
    assert!(!credentials.is_logged_in().await);
}

#[tokio::test]
async fn test_logout_leaves_unrelated_keys() {
    let store = logged_in_store();
    store.set("theme", "dark").await;
    let credentials = CredentialManager::new(store.clone());

    credentials.logout().await;

    assert_eq!(store.len().await, 1);
    assert_eq!(store.get("theme").await.as_deref(), Some("dark"));
}

#[tokio::test]
async fn test_set_tokens_logs_in() {
    let store = Arc::new(MemoryStore::new());
    let credentials = CredentialManager::new(store.clone());
    assert!(!credentials.is_logged_in().await);

    credentials
        .set_tokens(&Credentials {
            access_token: "access-1".to_string(),
            refresh_token: "refresh-1".to_string(),
        })
        .await;

    assert!(credentials.is_logged_in().await);
    assert_eq!(credentials.access_token().await.as_deref(), Some("access-1"));
    assert_eq!(credentials.refresh_token().await.as_deref(), Some("refresh-1"));
}

#[tokio::test]
async fn test_store_renewed_without_rotation_keeps_refresh_token() {
    let store = logged_in_store();
    let credentials = CredentialManager::new(store.clone());

    credentials
        .store_renewed(&RenewedCredentials {
            access_token: "access-2".to_string(),
            refresh_token: None,
        })
        .await;

    assert_eq!(credentials.access_token().await.as_deref(), Some("access-2"));
    assert_eq!(credentials.refresh_token().await.as_deref(), Some("refresh-1"));
}

#[tokio::test]
async fn test_clear_tokens_keeps_profile() {
    let store = logged_in_store();
    let credentials = CredentialManager::new(store.clone());

    credentials.clear_tokens().await;

    assert!(!credentials.is_logged_in().await);
    assert_eq!(credentials.refresh_token().await, None);
    assert!(credentials.cached_profile().await.is_some());
}

#[tokio::test]
async fn test_profile_snapshot_roundtrip() {
    let credentials = CredentialManager::new(Arc::new(MemoryStore::new()));
    assert_eq!(credentials.cached_profile().await, None);

    credentials.cache_profile(&ada()).await;

    assert_eq!(credentials.cached_profile().await, Some(ada()));
}

#[tokio::test]
async fn test_unreadable_profile_snapshot_is_ignored() {
    let store = Arc::new(MemoryStore::with_entries([(PROFILE_KEY, "{not json")]));
    let credentials = CredentialManager::new(store);

    assert_eq!(credentials.cached_profile().await, None);
}

#[tokio::test]
async fn test_file_store_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("storage.json");

    let store = FileStore::open(path.clone()).await.unwrap();
    store.set(ACCESS_TOKEN_KEY, "access-1").await;
    store.set(REFRESH_TOKEN_KEY, "refresh-1").await;
    store.delete(REFRESH_TOKEN_KEY).await;

    let reopened = FileStore::open(path).await.unwrap();
    assert_eq!(reopened.get(ACCESS_TOKEN_KEY).await.as_deref(), Some("access-1"));
    assert_eq!(reopened.get(REFRESH_TOKEN_KEY).await, None);
}

#[tokio::test]
async fn test_file_store_missing_file_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");

    let store = FileStore::open(path.clone()).await.unwrap();
    assert_eq!(store.get(ACCESS_TOKEN_KEY).await, None);

    // Deleting an absent key does not create the file.
    store.delete(ACCESS_TOKEN_KEY).await;
    assert!(!path.exists());
}

#[tokio::test]
async fn test_file_store_treats_corrupt_file_as_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");
    std::fs::write(&path, "{\"spotify_access_token\": \"a\"").unwrap();

    let store = FileStore::open(path.clone()).await.unwrap();
    assert_eq!(store.get(ACCESS_TOKEN_KEY).await, None);

    // Logout rewrites the file even though no key was present.
    CredentialManager::new(Arc::new(store)).logout().await;

    let content = std::fs::read_to_string(&path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(parsed, serde_json::json!({}));
}

#[tokio::test]
async fn test_file_store_open_fails_on_directory() {
    let dir = tempfile::tempdir().unwrap();

    let result = FileStore::open(dir.path().to_path_buf()).await;

    assert!(matches!(result, Err(StoreError::Io(_))));
}

#[tokio::test]
async fn test_file_stores_sharing_a_path_see_each_other() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");
    let first = FileStore::open(path.clone()).await.unwrap();
    let second = FileStore::open(path.clone()).await.unwrap();

    first.set(ACCESS_TOKEN_KEY, "access-1").await;
    first.set(REFRESH_TOKEN_KEY, "refresh-1").await;
    assert_eq!(second.get(ACCESS_TOKEN_KEY).await.as_deref(), Some("access-1"));

    CredentialManager::new(Arc::new(second)).logout().await;
    assert_eq!(first.get(ACCESS_TOKEN_KEY).await, None);

    // A later write through the first store keeps the logout.
    first.set("theme", "dark").await;

    let reopened = FileStore::open(path.clone()).await.unwrap();
    assert_eq!(reopened.get(ACCESS_TOKEN_KEY).await, None);
    assert_eq!(reopened.get(REFRESH_TOKEN_KEY).await, None);
    assert_eq!(reopened.get("theme").await.as_deref(), Some("dark"));
    assert!(!dir.path().join("storage.json.tmp").exists());
}

#[tokio::test]
async fn test_file_store_logout_through_credentials() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");
    let credentials = CredentialManager::new(Arc::new(FileStore::open(path.clone()).await.unwrap()));

    credentials
        .set_tokens(&Credentials {
            access_token: "access-1".to_string(),
            refresh_token: "refresh-1".to_string(),
        })
        .await;
    credentials.cache_profile(&ada()).await;
    credentials.logout().await;
    credentials.logout().await;

    let reopened = FileStore::open(path).await.unwrap();
    assert_eq!(reopened.get(ACCESS_TOKEN_KEY).await, None);
    assert_eq!(reopened.get(REFRESH_TOKEN_KEY).await, None);
    assert_eq!(reopened.get(PROFILE_KEY).await, None);
}
