//! Persisted session storage
//!
//! A small key-value store that survives restarts. [`Session`] layers the
//! typed session lifecycle (login, refresh, logout) on top of it.

mod context;

pub use context::{
    Session, ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, ROLE_KEY, SESSION_KEYS, USER_KEY,
};

use crate::error::{SessionError, SessionResult};
use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use tokio::sync::{Mutex, RwLock};

/// Abstract key-value backend for session state
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Read the value stored under `key`
    async fn get(&self, key: &str) -> SessionResult<Option<String>>;

    /// Store `value` under `key`
    async fn set(&self, key: &str, value: String) -> SessionResult<()>;

    /// Remove `key`; removing a missing key is not an error
    async fn remove(&self, key: &str) -> SessionResult<()>;

    /// Store several entries as one operation
    async fn set_all(&self, entries: Vec<(&str, String)>) -> SessionResult<()> {
        for (key, value) in entries {
            self.set(key, value).await?;
        }
        Ok(())
    }

    /// Remove several keys as one operation
    async fn remove_all(&self, keys: &[&str]) -> SessionResult<()> {
        for key in keys {
            self.remove(key).await?;
        }
        Ok(())
    }
}

/// Session store backed by a JSON object on disk
pub struct FileSessionStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> SessionResult<BTreeMap<String, String>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(data) if data.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(data) => Ok(serde_json::from_str(&data)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// Write to a temp file then rename, so a crash never leaves a partial file
    async fn save(&self, values: &BTreeMap<String, String>) -> SessionResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let data = serde_json::to_string_pretty(values)
            .map_err(|e| SessionError::Backend(e.to_string()))?;
        let temp_path = self.path.with_extension("json.tmp");
        tokio::fs::write(&temp_path, data).await?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            tokio::fs::set_permissions(&temp_path, std::fs::Permissions::from_mode(0o600))
                .await?;
        }

        tokio::fs::rename(&temp_path, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn get(&self, key: &str) -> SessionResult<Option<String>> {
        let _guard = self.lock.lock().await;
        Ok(self.load().await?.remove(key))
    }

    async fn set(&self, key: &str, value: String) -> SessionResult<()> {
        let _guard = self.lock.lock().await;
        let mut values = self.load().await?;
        values.insert(key.to_string(), value);
        self.save(&values).await
    }

    async fn remove(&self, key: &str) -> SessionResult<()> {
        self.remove_all(&[key]).await
    }

    async fn set_all(&self, entries: Vec<(&str, String)>) -> SessionResult<()> {
        let _guard = self.lock.lock().await;
        let mut values = self.load().await?;
        for (key, value) in entries {
            values.insert(key.to_string(), value);
        }
        self.save(&values).await
    }

    async fn remove_all(&self, keys: &[&str]) -> SessionResult<()> {
        let _guard = self.lock.lock().await;
        // An unreadable file is replaced rather than blocking logout
        let mut values = match self.load().await {
            Ok(values) => values,
            Err(SessionError::Corrupt(reason)) => {
                tracing::warn!(path = %self.path.display(), %reason, "Replacing corrupt session file");
                BTreeMap::new()
            }
            Err(e) => return Err(e),
        };
        for key in keys {
            values.remove(*key);
        }
        self.save(&values).await
    }
}

/// In-memory session store (for testing and ephemeral sessions)
#[derive(Default)]
pub struct MemorySessionStore {
    data: RwLock<HashMap<String, String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn get(&self, key: &str) -> SessionResult<Option<String>> {
        Ok(self.data.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> SessionResult<()> {
        self.data.write().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> SessionResult<()> {
        self.data.write().await.remove(key);
        Ok(())
    }

    async fn set_all(&self, entries: Vec<(&str, String)>) -> SessionResult<()> {
        let mut data = self.data.write().await;
        for (key, value) in entries {
            data.insert(key.to_string(), value);
        }
        Ok(())
    }

    async fn remove_all(&self, keys: &[&str]) -> SessionResult<()> {
        let mut data = self.data.write().await;
        for key in keys {
            data.remove(*key);
        }
        Ok(())
    }
}
