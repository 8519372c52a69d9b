use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Named key-value storage for the session cookie.
///
/// `set` cannot fail from the caller's point of view: once it returns, `get`
/// on the same key yields the new value.
pub trait TokenStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: &str);
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredCookie {
    pub value: String,
    pub set_at: DateTime<Utc>,
}

/// Cookies keyed by origin, then by cookie name.
type JarContents = HashMap<String, HashMap<String, StoredCookie>>;

/// File-backed cookie jar scoped to a single origin.
///
/// Other origins found in the file are preserved on save.
pub struct CookieJar {
    path: PathBuf,
    origin: String,
    contents: Mutex<JarContents>,
}

impl CookieJar {
    /// Open the jar at `path`, loading any cookies already on disk.
    ///
    /// A missing file is an empty jar. An unreadable one is replaced on the
    /// next save.
    pub fn open(path: PathBuf, origin: impl Into<String>) -> Self {
        let origin = origin.into();
        let contents = match Self::load(&path) {
            Ok(contents) => contents,
            Err(e) => {
                warn!(error = %e, path = %path.display(), "Failed to load cookie jar, starting empty");
                JarContents::new()
            }
        };
        debug!(path = %path.display(), origin = %origin, "Cookie jar opened");
        Self {
            path,
            origin,
            contents: Mutex::new(contents),
        }
    }

    fn load(path: &Path) -> Result<JarContents> {
        if !path.exists() {
            return Ok(JarContents::new());
        }
        let contents = std::fs::read_to_string(path).context("Failed to read cookie jar")?;
        serde_json::from_str(&contents).context("Failed to parse cookie jar")
    }

    /// Write the jar to disk
    pub fn save(&self) -> Result<()> {
        let contents = serde_json::to_string_pretty(&*self.lock())?;
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, contents)?;
        Ok(())
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Full cookie record for `key` in this jar's origin
    pub fn cookie(&self, key: &str) -> Option<StoredCookie> {
        self.lock()
            .get(&self.origin)
            .and_then(|cookies| cookies.get(key))
            .cloned()
    }

    fn lock(&self) -> MutexGuard<'_, JarContents> {
        // A poisoned jar still holds a consistent map; every write is a single insert.
        self.contents.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl TokenStore for CookieJar {
    fn get(&self, key: &str) -> Option<String> {
        self.cookie(key).map(|c| c.value)
    }

    fn set(&self, key: &str, value: &str) {
        self.lock().entry(self.origin.clone()).or_default().insert(
            key.to_string(),
            StoredCookie {
                value: value.to_string(),
                set_at: Utc::now(),
            },
        );

        if let Err(e) = self.save() {
            warn!(error = %e, cookie = key, "Failed to persist cookie jar");
        }
    }
}

/// Process-local token store
#[derive(Default)]
pub struct MemoryTokenStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(key: &str, value: &str) -> Self {
        let store = Self::new();
        store.set(key, value);
        store
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.values.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self, key: &str) -> Option<String> {
        self.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.lock().insert(key.to_string(), value.to_string());
    }
}
