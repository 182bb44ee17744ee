//! Client id persistence.
//!
//! The tracker never touches ambient state directly: whatever stands in for
//! the browser cookie (an HTTP framework's jar, a file, a test double) is
//! passed in as a [`ClientIdStore`].

use crate::error::{GaError, Result};
use crate::types::now_secs;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

// ================================================================================================
// COOKIE
// ================================================================================================

/// A persisted name/value pair with cookie-style scope and lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cookie {
    pub name: String,
    pub value: String,
    pub path: String,
    pub max_age_secs: u64,
    /// Unix seconds
    pub expires_at: u64,
}

impl Cookie {
    /// Create a cookie that expires `max_age_secs` from now.
    pub fn new(
        name: impl Into<String>,
        value: impl Into<String>,
        path: impl Into<String>,
        max_age_secs: u64,
    ) -> Self {
        Cookie {
            name: name.into(),
            value: value.into(),
            path: path.into(),
            max_age_secs,
            expires_at: now_secs().saturating_add(max_age_secs),
        }
    }

    pub fn is_expired(&self, now: u64) -> bool {
        self.expires_at <= now
    }

    /// Value for a `Set-Cookie` response header.
    pub fn set_cookie_header(&self) -> String {
        format!(
            "{}={}; Max-Age={}; Path={}",
            self.name, self.value, self.max_age_secs, self.path
        )
    }
}

// ================================================================================================
// STORE CAPABILITY
// ================================================================================================

/// Storage for the client id.
pub trait ClientIdStore {
    /// Value stored under `name`, if present and not expired.
    fn load(&self, name: &str) -> Result<Option<String>>;

    /// Persist `cookie`, replacing any entry with the same name.
    fn save(&self, cookie: &Cookie) -> Result<()>;
}

impl<T: ClientIdStore + ?Sized> ClientIdStore for Arc<T> {
    fn load(&self, name: &str) -> Result<Option<String>> {
        (**self).load(name)
    }

    fn save(&self, cookie: &Cookie) -> Result<()> {
        (**self).save(cookie)
    }
}

impl<T: ClientIdStore + ?Sized> ClientIdStore for Box<T> {
    fn load(&self, name: &str) -> Result<Option<String>> {
        (**self).load(name)
    }

    fn save(&self, cookie: &Cookie) -> Result<()> {
        (**self).save(cookie)
    }
}

// ================================================================================================
// IN-MEMORY STORE
// ================================================================================================

/// Process-local cookie jar.
#[derive(Debug, Default)]
pub struct MemoryStore {
    cookies: Mutex<HashMap<String, Cookie>>,
    writes: Mutex<u64>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A jar that already holds `value` under `name`, as if sent by the client.
    pub fn with_value(name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        let cookie = Cookie::new(name.clone(), value, "/", u64::MAX / 2);
        let store = Self::default();
        store.cookies.lock().insert(name, cookie);
        store
    }

    /// Number of `save` calls so far.
    pub fn writes(&self) -> u64 {
        *self.writes.lock()
    }

    /// Snapshot of a stored cookie.
    pub fn cookie(&self, name: &str) -> Option<Cookie> {
        self.cookies.lock().get(name).cloned()
    }
}

impl ClientIdStore for MemoryStore {
    fn load(&self, name: &str) -> Result<Option<String>> {
        let now = now_secs();
        Ok(self
            .cookies
            .lock()
            .get(name)
            .filter(|c| !c.is_expired(now))
            .map(|c| c.value.clone()))
    }

    fn save(&self, cookie: &Cookie) -> Result<()> {
        self.cookies
            .lock()
            .insert(cookie.name.clone(), cookie.clone());
        *self.writes.lock() += 1;
        Ok(())
    }
}

// ================================================================================================
// FILE STORE
// ================================================================================================

/// Cookie jar kept as a JSON file, for command-line use across runs.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        FileStore {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_jar(&self) -> Result<HashMap<String, Cookie>> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }
        let raw = fs::read_to_string(&self.path).map_err(|e| {
            GaError::Store(format!("Failed to read {}: {}", self.path.display(), e))
        })?;
        if raw.trim().is_empty() {
            return Ok(HashMap::new());
        }
        serde_json::from_str(&raw).map_err(|e| {
            GaError::Store(format!("Corrupt cookie jar {}: {}", self.path.display(), e))
        })
    }

    fn write_jar(&self, jar: &HashMap<String, Cookie>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    GaError::Store(format!("Failed to create directory: {}", e))
                })?;
            }
        }
        let json = serde_json::to_string_pretty(jar)
            .map_err(|e| GaError::Store(format!("Failed to serialize cookie jar: {}", e)))?;
        fs::write(&self.path, json).map_err(|e| {
            GaError::Store(format!("Failed to write {}: {}", self.path.display(), e))
        })
    }
}

impl ClientIdStore for FileStore {
    fn load(&self, name: &str) -> Result<Option<String>> {
        let _guard = self.lock.lock();
        let now = now_secs();
        Ok(self
            .read_jar()?
            .remove(name)
            .filter(|c| !c.is_expired(now))
            .map(|c| c.value))
    }

    fn save(&self, cookie: &Cookie) -> Result<()> {
        let _guard = self.lock.lock();
        let mut jar = self.read_jar()?;
        jar.insert(cookie.name.clone(), cookie.clone());
        self.write_jar(&jar)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_set_cookie_header() {
        let cookie = Cookie::new("SimplePhpGa-cid", "abc", "/", 63_072_000);
        assert_eq!(
            cookie.set_cookie_header(),
            "SimplePhpGa-cid=abc; Max-Age=63072000; Path=/"
        );
        assert!(!cookie.is_expired(now_secs()));
        assert!(cookie.is_expired(cookie.expires_at));
    }

    #[test]
    fn test_memory_store_roundtrip_and_write_count() {
        let store = MemoryStore::new();
        assert_eq!(store.load("cid").unwrap(), None);

        store.save(&Cookie::new("cid", "v1", "/", 60)).unwrap();
        assert_eq!(store.load("cid").unwrap().as_deref(), Some("v1"));
        assert_eq!(store.writes(), 1);
    }

    #[test]
    fn test_memory_store_expired_reads_as_absent() {
        let store = MemoryStore::new();
        let mut cookie = Cookie::new("cid", "old", "/", 60);
        cookie.expires_at = 1;
        store.save(&cookie).unwrap();
        assert_eq!(store.load("cid").unwrap(), None);
    }

    #[test]
    fn test_file_store_persists_across_instances() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("jar.json");

        let store = FileStore::new(&path);
        assert_eq!(store.load("cid").unwrap(), None);
        store.save(&Cookie::new("cid", "persisted", "/", 60)).unwrap();

        let reopened = FileStore::new(&path);
        assert_eq!(reopened.load("cid").unwrap().as_deref(), Some("persisted"));
    }

    #[test]
    fn test_file_store_corrupt_jar_is_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("jar.json");
        std::fs::write(&path, "{not json").unwrap();

        let store = FileStore::new(&path);
        assert!(matches!(store.load("cid"), Err(GaError::Store(_))));
    }
}
