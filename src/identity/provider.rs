//! Resolves the client id for a tracker: read it back, or create and persist it.

use super::client_id::ClientId;
use super::store::{ClientIdStore, Cookie};
use crate::config::ClientConfig;
use crate::error::Result;
use log::{debug, info};
use parking_lot::Mutex;

/// Client id source bound to one store.
///
/// The first successful call to [`ensure_client_id`](Self::ensure_client_id)
/// caches the id; later calls never touch the store again.
pub struct IdentityProvider<S> {
    store: S,
    cookie_name: String,
    cookie_path: String,
    max_age_secs: u64,
    cached: Mutex<Option<ClientId>>,
}

impl<S: ClientIdStore> IdentityProvider<S> {
    pub fn new(store: S, config: &ClientConfig) -> Self {
        IdentityProvider {
            store,
            cookie_name: config.cookie_name.clone(),
            cookie_path: config.cookie_path.clone(),
            max_age_secs: config.cookie_max_age_secs,
            cached: Mutex::new(None),
        }
    }

    /// Return the stored id, generating and saving one if none exists.
    pub fn ensure_client_id(&self) -> Result<ClientId> {
        let mut cached = self.cached.lock();
        if let Some(id) = cached.as_ref() {
            return Ok(id.clone());
        }

        let id = match self.store.load(&self.cookie_name)? {
            Some(stored) => {
                debug!("Reusing stored client id from '{}'", self.cookie_name);
                ClientId::from_stored(stored)
            }
            None => {
                let id = ClientId::generate();
                let cookie = Cookie::new(
                    self.cookie_name.clone(),
                    id.as_str(),
                    self.cookie_path.clone(),
                    self.max_age_secs,
                );
                self.store.save(&cookie)?;
                info!("Generated new client id and stored it as '{}'", self.cookie_name);
                id
            }
        };

        *cached = Some(id.clone());
        Ok(id)
    }

    /// Cached id, if one has been resolved.
    pub fn cached(&self) -> Option<ClientId> {
        self.cached.lock().clone()
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::store::MemoryStore;
    use std::sync::Arc;

    #[test]
    fn test_generates_once_when_absent() {
        let store = Arc::new(MemoryStore::new());
        let provider = IdentityProvider::new(store.clone(), &ClientConfig::default());

        let first = provider.ensure_client_id().unwrap();
        let second = provider.ensure_client_id().unwrap();

        assert_eq!(first, second);
        assert!(first.is_valid_v4());
        assert_eq!(store.writes(), 1);

        let cookie = store.cookie("SimplePhpGa-cid").unwrap();
        assert_eq!(cookie.value, first.as_str());
        assert_eq!(cookie.path, "/");
        assert_eq!(cookie.max_age_secs, 63_072_000);
    }

    #[test]
    fn test_existing_value_returned_unchanged() {
        let store = Arc::new(MemoryStore::with_value("SimplePhpGa-cid", "stored-value"));
        let provider = IdentityProvider::new(store.clone(), &ClientConfig::default());

        assert_eq!(provider.ensure_client_id().unwrap().as_str(), "stored-value");
        assert_eq!(provider.ensure_client_id().unwrap().as_str(), "stored-value");
        assert_eq!(store.writes(), 0);
    }

    #[test]
    fn test_custom_cookie_name() {
        let config = ClientConfig::default().with_cookie_name("my-cid");
        let store = Arc::new(MemoryStore::with_value("my-cid", "abc"));
        let provider = IdentityProvider::new(store, &config);
        assert_eq!(provider.ensure_client_id().unwrap().as_str(), "abc");
        assert_eq!(provider.cached().unwrap().as_str(), "abc");
    }
}
