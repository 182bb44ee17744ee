//! Blocking HTTP transport over reqwest (rustls).

use super::{Transport, TransportResponse};
use crate::config::ClientConfig;
use crate::error::{GaError, Result};
use crate::types::FORM_CONTENT_TYPE;
use log::debug;
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;

/// Synchronous HTTP client for the collect endpoints.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Client with reqwest's default timeouts.
    pub fn new() -> Result<Self> {
        Self::build(None)
    }

    /// Client carrying the configured `User-Agent`, if any.
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        Self::build(config.user_agent.as_deref())
    }

    fn build(user_agent: Option<&str>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(ua) = user_agent {
            builder = builder.user_agent(ua.to_string());
        }
        let client = builder
            .build()
            .map_err(|e| GaError::Config(format!("Failed to build HTTP client: {}", e)))?;
        Ok(HttpTransport { client })
    }
}

impl Transport for HttpTransport {
    fn post_form(&self, uri: &str, body: &str) -> Result<TransportResponse> {
        let failed = |e: reqwest::Error| GaError::Transport {
            status_line: format!("request failed: {}", e),
            uri: uri.to_string(),
        };

        debug!("POST {} ({} bytes)", uri, body.len());
        let response = self
            .client
            .post(uri)
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .body(body.to_string())
            .send()
            .map_err(failed)?;

        let status = response.status();
        let status_line = format!("{:?} {}", response.version(), status);
        let body = response.text().map_err(failed)?;
        debug!("{} answered {}", uri, status_line);

        Ok(TransportResponse {
            status: status.as_u16(),
            status_line,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builds_with_user_agent() {
        let config = ClientConfig::default().with_user_agent("simple-ga-test/1.0");
        assert!(HttpTransport::from_config(&config).is_ok());
        assert!(HttpTransport::new().is_ok());
    }

    #[test]
    fn test_connection_refused_is_transport_error() {
        // Port 9 (discard) on loopback is essentially never listening.
        let transport = HttpTransport::new().unwrap();
        let err = transport
            .post_form("http://127.0.0.1:9/collect", "v=1")
            .unwrap_err();
        assert!(err.is_transport());
        assert!(err.to_string().contains("http://127.0.0.1:9/collect"));
    }
}
