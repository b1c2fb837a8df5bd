//! HTTP transport with tracing and domain allowlist.
//!
//! The transport performs exactly one physical request. Timeouts, retries
//! and cancellation belong to [`ResilientClient`](crate::client::ResilientClient),
//! which wraps whichever transport it is given.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

use crate::error::TransportError;

/// Safety-net timeout; per-attempt timeouts are enforced by the client.
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Connect timeout for new connections.
const CONNECT_TIMEOUT_SECS: u64 = 10;

/// User agent string for VoicePrice.
const USER_AGENT: &str = concat!("VoicePrice/", env!("CARGO_PKG_VERSION"));

// ============================================================================
// Transport Trait
// ============================================================================

/// Raw response of one physical request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body.
    pub body: Vec<u8>,
}

impl TransportResponse {
    /// Returns true for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Returns the body as lossy UTF-8, for diagnostics.
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// One physical HTTP exchange with the backend.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Performs a POST request with a JSON body.
    async fn post_json(
        &self,
        url: &str,
        body: &serde_json::Value,
    ) -> Result<TransportResponse, TransportError>;

    /// Performs a HEAD request.
    async fn head(&self, url: &str) -> Result<TransportResponse, TransportError>;
}

// ============================================================================
// Reqwest Transport
// ============================================================================

/// Production transport backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    inner: Client,
    allowed_domains: Option<Vec<String>>,
}

impl ReqwestTransport {
    /// Creates a new transport with default settings.
    pub fn new() -> Result<Self, TransportError> {
        Self::with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Creates a new transport with a custom overall timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            inner: client,
            allowed_domains: None,
        })
    }

    /// Restricts requests to the given domains and their subdomains.
    pub fn with_allowed_domains(mut self, domains: Vec<String>) -> Self {
        self.allowed_domains = Some(domains);
        self
    }

    /// Checks if a URL's domain is allowed.
    fn is_domain_allowed(&self, url: &str) -> Result<(), TransportError> {
        let Some(ref allowed) = self.allowed_domains else {
            return Ok(()); // No restrictions
        };

        let parsed =
            Url::parse(url).map_err(|e| TransportError::InvalidRequest(e.to_string()))?;

        let host = parsed
            .host_str()
            .ok_or_else(|| TransportError::InvalidRequest("No host in URL".to_string()))?;

        let allowed = allowed
            .iter()
            .any(|domain| host == domain || host.ends_with(&format!(".{domain}")));

        if allowed {
            Ok(())
        } else {
            Err(TransportError::DomainNotAllowed(host.to_string()))
        }
    }

    async fn read(response: reqwest::Response) -> Result<TransportResponse, TransportError> {
        let status = response.status().as_u16();
        debug!(status, "Response received");
        let body = response.bytes().await?.to_vec();
        Ok(TransportResponse { status, body })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    #[instrument(skip(self, body), fields(url = %url))]
    async fn post_json(
        &self,
        url: &str,
        body: &serde_json::Value,
    ) -> Result<TransportResponse, TransportError> {
        self.is_domain_allowed(url)?;
        debug!("POST request with JSON");

        let response = self.inner.post(url).json(body).send().await?;
        Self::read(response).await
    }

    #[instrument(skip(self), fields(url = %url))]
    async fn head(&self, url: &str) -> Result<TransportResponse, TransportError> {
        self.is_domain_allowed(url)?;
        debug!("HEAD request");

        let response = self.inner.head(url).send().await?;
        Self::read(response).await
    }
}

// ============================================================================
// Tests
// ============================================================================
