use std::{collections::HashMap, path::PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::{config, error::StoreError, management::KeyValueStore, warning};

/// Key-value store persisted as a JSON object on disk.
///
/// Nothing is cached: every read loads the file and every mutation is a
/// read-modify-write, so several processes sharing the file (a `keepalive`
/// next to a `logout`) see each other's changes. Writes go to a sibling
/// temporary file that is renamed over the store.
///
/// A file that is not valid JSON is treated as an empty store with a warning
/// and replaced on the next mutation.
pub struct FileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStore {
    /// Opens the store at `path`.
    ///
    /// A missing file yields an empty store; the file is created on the first
    /// write. Only I/O failures other than a missing file are errors.
    pub async fn open(path: PathBuf) -> Result<Self, StoreError> {
        let store = Self {
            path,
            write_lock: Mutex::new(()),
        };
        store.load_or_reset().await?;
        Ok(store)
    }

    /// Opens the store at the configured location.
    pub async fn open_default() -> Result<Self, StoreError> {
        Self::open(config::storage_path()).await
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    async fn load(&self) -> Result<HashMap<String, String>, StoreError> {
        match async_fs::read_to_string(&self.path).await {
            Ok(content) if content.trim().is_empty() => Ok(HashMap::new()),
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(StoreError::Io(e)),
        }
    }

    /// Current entries, and whether the file was unreadable JSON and needs
    /// rewriting.
    async fn load_or_reset(&self) -> Result<(HashMap<String, String>, bool), StoreError> {
        match self.load().await {
            Ok(entries) => Ok((entries, false)),
            Err(StoreError::Serde(e)) => {
                warning!(
                    "{} is not valid JSON, treating it as empty. Err: {}",
                    self.path.display(),
                    e
                );
                Ok((HashMap::new(), true))
            }
            Err(e) => Err(e),
        }
    }

    async fn persist(&self, entries: &HashMap<String, String>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            async_fs::create_dir_all(parent).await?;
        }

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        let json = serde_json::to_string_pretty(entries)?;
        async_fs::write(&tmp, json).await?;
        async_fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Option<String> {
        match self.load_or_reset().await {
            Ok((entries, _)) => entries.get(key).cloned(),
            Err(e) => {
                warning!("Failed to read {}: {}", self.path.display(), e);
                None
            }
        }
    }

    async fn set(&self, key: &str, value: &str) {
        let _guard = self.write_lock.lock().await;
        let mut entries = match self.load_or_reset().await {
            Ok((entries, _)) => entries,
            Err(e) => {
                warning!("Failed to read {}: {}", self.path.display(), e);
                return;
            }
        };

        entries.insert(key.to_string(), value.to_string());
        if let Err(e) = self.persist(&entries).await {
            warning!("Failed to write {}: {}", self.path.display(), e);
        }
    }

    async fn delete(&self, key: &str) {
        let _guard = self.write_lock.lock().await;
        let (mut entries, reset) = match self.load_or_reset().await {
            Ok(loaded) => loaded,
            Err(e) => {
                warning!("Failed to read {}: {}", self.path.display(), e);
                return;
            }
        };

        if entries.remove(key).is_none() && !reset {
            return;
        }
        if let Err(e) = self.persist(&entries).await {
            warning!("Failed to write {}: {}", self.path.display(), e);
        }
    }
}
