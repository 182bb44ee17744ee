//! Client configuration.
//!
//! Defaults target the public collection host. A handful of fields can be
//! overridden from the environment:
//!
//! - `SIMPLE_GA_HOST`: scheme and host, e.g. `http://localhost:8080`
//! - `SIMPLE_GA_AUTO_CID`: `true`/`false`/`1`/`0`
//! - `SIMPLE_GA_COOKIE_NAME`: name of the persisted client id entry

use crate::error::{GaError, Result};
use crate::types::{
    CID_COOKIE_MAX_AGE_SECS, CID_COOKIE_NAME, CID_COOKIE_PATH, COLLECT_ENDPOINT, DEBUG_ENDPOINT,
    DEFAULT_HOST,
};

/// Configuration for a [`Tracker`](crate::Tracker).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Scheme and host of the collection service
    pub host: String,

    /// Path hits are accepted on
    pub collect_endpoint: String,

    /// Path hits are validated on
    pub debug_endpoint: String,

    /// Generate and persist a client id when the caller supplies none
    pub auto_generate_cid: bool,

    /// Storage key for the client id
    pub cookie_name: String,

    /// Lifetime of the stored client id
    pub cookie_max_age_secs: u64,

    /// Path scope of the stored client id
    pub cookie_path: String,

    /// Optional `User-Agent` header for outgoing requests
    pub user_agent: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            host: DEFAULT_HOST.to_string(),
            collect_endpoint: COLLECT_ENDPOINT.to_string(),
            debug_endpoint: DEBUG_ENDPOINT.to_string(),
            auto_generate_cid: true,
            cookie_name: CID_COOKIE_NAME.to_string(),
            cookie_max_age_secs: CID_COOKIE_MAX_AGE_SECS,
            cookie_path: CID_COOKIE_PATH.to_string(),
            user_agent: None,
        }
    }
}

impl ClientConfig {
    /// Defaults with environment overrides applied.
    pub fn from_env() -> Result<Self> {
        let mut config = ClientConfig::default();

        if let Ok(host) = std::env::var("SIMPLE_GA_HOST") {
            config.host = host;
        }
        if let Ok(raw) = std::env::var("SIMPLE_GA_AUTO_CID") {
            config.auto_generate_cid = parse_bool(&raw)?;
        }
        if let Ok(name) = std::env::var("SIMPLE_GA_COOKIE_NAME") {
            config.cookie_name = name;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn with_auto_generate_cid(mut self, enabled: bool) -> Self {
        self.auto_generate_cid = enabled;
        self
    }

    pub fn with_cookie_name(mut self, name: impl Into<String>) -> Self {
        self.cookie_name = name.into();
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Reject values that would produce a malformed request URI or cookie.
    pub fn validate(&self) -> Result<()> {
        if !(self.host.starts_with("http://") || self.host.starts_with("https://")) {
            return Err(GaError::Config(format!(
                "host must start with http:// or https://, got {:?}",
                self.host
            )));
        }
        if self.cookie_name.is_empty() {
            return Err(GaError::Config("cookie name must not be empty".to_string()));
        }
        Ok(())
    }

    /// Full URI of the production endpoint.
    pub fn collect_uri(&self) -> String {
        join_uri(&self.host, &self.collect_endpoint)
    }

    /// Full URI of the validation endpoint.
    pub fn debug_uri(&self) -> String {
        join_uri(&self.host, &self.debug_endpoint)
    }
}

fn join_uri(host: &str, endpoint: &str) -> String {
    format!("{}{}", host.trim_end_matches('/'), endpoint)
}

fn parse_bool(raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(GaError::Config(format!(
            "SIMPLE_GA_AUTO_CID must be a boolean, got {:?}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_uris() {
        let config = ClientConfig::default();
        assert_eq!(config.collect_uri(), "https://www.google-analytics.com/collect");
        assert_eq!(
            config.debug_uri(),
            "https://www.google-analytics.com/debug/collect"
        );
        assert!(config.auto_generate_cid);
        assert_eq!(config.cookie_name, "SimplePhpGa-cid");
    }

    #[test]
    fn test_trailing_slash_on_host() {
        let config = ClientConfig::default().with_host("http://127.0.0.1:9000/");
        assert_eq!(config.collect_uri(), "http://127.0.0.1:9000/collect");
    }

    #[test]
    fn test_validate_rejects_bad_host() {
        let config = ClientConfig::default().with_host("ftp://example.com");
        assert!(matches!(config.validate(), Err(GaError::Config(_))));
    }

    #[test]
    fn test_parse_bool() {
        assert!(parse_bool("TRUE").unwrap());
        assert!(!parse_bool(" 0 ").unwrap());
        assert!(parse_bool("maybe").is_err());
    }
}
