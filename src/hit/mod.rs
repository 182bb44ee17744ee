//! Hit construction.
//!
//! Caller options are flattened to [`TrackingParameters`], validated, laid
//! over the protocol defaults and form-encoded by [`prepare`].

pub mod options;
pub mod params;
pub mod payload;
pub mod response;

pub use options::{HitOptions, HitType};
pub use params::TrackingParameters;
pub use payload::prepare;
pub use response::{DebugHit, DebugResponse, HitParsingResult, ParserMessage};
