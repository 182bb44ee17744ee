//! # Tracker
//!
//! The client context: one configuration, one client id store, one transport.
//!
//! ```rust,no_run
//! use simple_ga::{HitOptions, HitType, Tracker};
//!
//! let tracker = Tracker::with_defaults(true)?;
//! let ok = tracker.send(
//!     &HitOptions::new()
//!         .tid("UA-XXXXX-Y")
//!         .hit_type(HitType::Pageview)
//!         .document_path("test-path"),
//! )?;
//! assert!(ok);
//! # Ok::<(), simple_ga::GaError>(())
//! ```

use crate::config::ClientConfig;
use crate::error::{GaError, Result};
use crate::hit::{self, DebugHit, HitOptions, TrackingParameters};
use crate::identity::{ClientId, ClientIdStore, IdentityProvider, MemoryStore};
use crate::transport::{HttpTransport, Transport, TransportResponse};
use log::{debug, info, warn};
use std::panic::Location;

/// Which collection path a hit goes to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Endpoint {
    /// Accepts hits for processing
    Collect,
    /// Validates hits and answers with JSON
    Debug,
}

/// Outcome of [`Tracker::execute`].
#[derive(Clone, Debug, PartialEq)]
pub enum HitResult {
    /// Production endpoint accepted the request. This says nothing about
    /// whether the hit itself was valid.
    Accepted(bool),
    /// Parsed body from the debug endpoint.
    Validation(serde_json::Value),
}

impl HitResult {
    pub fn is_accepted(&self) -> bool {
        match self {
            HitResult::Accepted(accepted) => *accepted,
            HitResult::Validation(_) => true,
        }
    }
}

/// Measurement Protocol client.
pub struct Tracker<S = MemoryStore, T = HttpTransport> {
    config: ClientConfig,
    defaults: TrackingParameters,
    identity: IdentityProvider<S>,
    transport: T,
}

impl Tracker<MemoryStore, HttpTransport> {
    /// Environment config, an in-memory store and the HTTP transport.
    pub fn with_defaults(auto_generate_cid: bool) -> Result<Self> {
        let config = ClientConfig::from_env()?.with_auto_generate_cid(auto_generate_cid);
        let transport = HttpTransport::from_config(&config)?;
        Tracker::new(config, MemoryStore::new(), transport)
    }
}

impl<S: ClientIdStore, T: Transport> Tracker<S, T> {
    /// Build a tracker. With id generation enabled the client id is resolved
    /// here, which may write to `store`.
    pub fn new(config: ClientConfig, store: S, transport: T) -> Result<Self> {
        config.validate()?;

        let identity = IdentityProvider::new(store, &config);
        if config.auto_generate_cid {
            identity.ensure_client_id()?;
        }

        Ok(Tracker {
            config,
            defaults: TrackingParameters::defaults(),
            identity,
            transport,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Client id attached to every hit, when generation is enabled.
    pub fn client_id(&self) -> Option<ClientId> {
        self.identity.cached()
    }

    pub fn store(&self) -> &S {
        self.identity.store()
    }

    /// Validate `options` and produce the encoded form body.
    pub fn prepare(&self, options: &HitOptions) -> Result<String> {
        let client_id = self.identity.cached();
        let payload = hit::prepare(&self.defaults, client_id.as_ref(), options)?;
        debug!("Prepared hit payload: {}", payload);
        Ok(payload)
    }

    /// POST `payload` to `endpoint`. Only HTTP 200 counts as success.
    pub fn execute(&self, payload: &str, endpoint: Endpoint) -> Result<HitResult> {
        match endpoint {
            Endpoint::Collect => {
                let uri = self.post(payload, endpoint)?.0;
                info!("Hit accepted by {}", uri);
                Ok(HitResult::Accepted(true))
            }
            Endpoint::Debug => self.validate(payload).map(HitResult::Validation),
        }
    }

    /// Prepare and send a hit to the production endpoint.
    pub fn send(&self, options: &HitOptions) -> Result<bool> {
        let payload = self.prepare(options)?;
        Ok(self.execute(&payload, Endpoint::Collect)?.is_accepted())
    }

    /// Prepare and send a hit to the validation endpoint.
    #[track_caller]
    pub fn debug(&self, options: &HitOptions) -> Result<DebugHit> {
        let caller = Location::caller();
        let caller_location = format!("{}:{}", caller.file(), caller.line());

        let payload = self.prepare(options)?;
        let response = self.validate(&payload)?;

        Ok(DebugHit {
            payload,
            caller_location,
            response,
        })
    }

    /// Send to the debug endpoint and parse the JSON verdict.
    fn validate(&self, payload: &str) -> Result<serde_json::Value> {
        let (uri, response) = self.post(payload, Endpoint::Debug)?;
        let value: serde_json::Value =
            serde_json::from_str(&response.body).map_err(|source| GaError::DecodeResponse {
                uri: uri.clone(),
                source,
            })?;
        debug!("Validation response from {}: {}", uri, value);
        Ok(value)
    }

    /// One POST; anything but 200 becomes a transport error.
    fn post(&self, payload: &str, endpoint: Endpoint) -> Result<(String, TransportResponse)> {
        let uri = match endpoint {
            Endpoint::Collect => self.config.collect_uri(),
            Endpoint::Debug => self.config.debug_uri(),
        };

        let response = self.transport.post_form(&uri, payload)?;
        if !response.is_ok() {
            warn!("Hit rejected by {}: {}", uri, response.status_line);
            return Err(GaError::Transport {
                status_line: response.status_line,
                uri,
            });
        }
        Ok((uri, response))
    }
}
