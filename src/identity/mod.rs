//! Client identity - the anonymous `cid` and where it lives.
//!
//! - **ClientId**: random v4 UUID, or a value read back from storage
//! - **ClientIdStore**: injected persistence (memory or JSON file)
//! - **IdentityProvider**: read-once, generate-if-absent resolution

pub mod client_id;
pub mod provider;
pub mod store;

pub use client_id::ClientId;
pub use provider::IdentityProvider;
pub use store::{ClientIdStore, Cookie, FileStore, MemoryStore};
