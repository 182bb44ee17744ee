//! # Simple GA
//!
//! Minimal Measurement Protocol client. A hit is assembled from protocol
//! defaults, an anonymous client id and caller options, form-encoded, and
//! POSTed once to the collect (or debug collect) endpoint.
//!
//! - [`identity`]: client id generation and injected persistence
//! - [`hit`]: options, parameter merging, payload encoding, debug responses
//! - [`transport`]: the outbound POST
//! - [`Tracker`]: ties them together (`send`, `debug`)

pub mod config;
pub mod error;
pub mod hit;
pub mod identity;
pub mod tracker;
pub mod transport;
pub mod types;

pub use config::ClientConfig;
pub use error::{GaError, Result};
pub use hit::{DebugHit, DebugResponse, HitOptions, HitType, TrackingParameters};
pub use identity::{ClientId, ClientIdStore, Cookie, FileStore, IdentityProvider, MemoryStore};
pub use tracker::{Endpoint, HitResult, Tracker};
pub use transport::{HttpTransport, Transport, TransportResponse};
