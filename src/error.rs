//! Error types for hit preparation and dispatch.

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, GaError>;

/// Everything that can go wrong between building a hit and reading the reply.
#[derive(Debug, Error)]
pub enum GaError {
    /// A field the collect endpoint requires was not supplied.
    ///
    /// `field` is `tid`, or `cid|uid` when neither identifier was given.
    #[error("required parameter {field} not provided in options. {hint}")]
    MissingRequiredField {
        field: &'static str,
        hint: &'static str,
    },

    /// The endpoint answered with something other than 200, or the request never completed.
    #[error("invalid response ({status_line}) while requesting {uri}")]
    Transport { status_line: String, uri: String },

    /// The debug endpoint returned a body that is not JSON.
    #[error("failed to decode debug response from {uri}: {source}")]
    DecodeResponse {
        uri: String,
        #[source]
        source: serde_json::Error,
    },

    /// The merged parameters could not be form-encoded.
    #[error("failed to encode hit payload: {0}")]
    Encode(#[from] serde_urlencoded::ser::Error),

    /// The client id store failed to read or write.
    #[error("client id store: {0}")]
    Store(String),

    /// Invalid configuration value.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl GaError {
    pub(crate) fn missing_tid() -> Self {
        GaError::MissingRequiredField {
            field: "tid",
            hint: "Your tracking ID should look like: UA-XXXXX-Y.",
        }
    }

    pub(crate) fn missing_identity() -> Self {
        GaError::MissingRequiredField {
            field: "cid|uid",
            hint: "Provide \"cid\" or \"uid\", or enable client id generation.",
        }
    }

    /// True for [`GaError::MissingRequiredField`].
    pub fn is_missing_field(&self) -> bool {
        matches!(self, GaError::MissingRequiredField { .. })
    }

    /// True for [`GaError::Transport`].
    pub fn is_transport(&self) -> bool {
        matches!(self, GaError::Transport { .. })
    }
}
