//! JSON output formatting.

use anyhow::Result;
use serde::Serialize;
use voiceprice_core::{Quote, ServiceKind};

// ============================================================================
// Output Types
// ============================================================================

/// JSON output for a quote. Keeps the field names of [`Quote`].
#[derive(Debug, Serialize)]
pub struct QuoteOutput<'a> {
    #[serde(flatten)]
    pub quote: &'a Quote,
    pub price_text: String,
}

/// JSON output for a rejected or failed operation.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorOutput<'a> {
    pub error: &'a str,
    pub retryable: bool,
}

/// JSON output for a service.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceOutput {
    pub id: &'static str,
    pub title: &'static str,
    pub unit: String,
    pub accepts_documents: bool,
    pub placeholder: &'static str,
}

/// JSON output for a ping.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PingOutput<'a> {
    pub base_url: &'a str,
    pub reachable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    pub elapsed_ms: u128,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

// ============================================================================
// Formatter
// ============================================================================

/// JSON formatter.
#[derive(Debug, Clone, Copy)]
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    /// Creates a new JSON formatter.
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    /// Formats any serializable value.
    pub fn format<T: Serialize>(&self, data: &T) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(data)?
        } else {
            serde_json::to_string(data)?
        };
        Ok(json)
    }

    /// Formats a quote.
    pub fn format_quote(&self, quote: &Quote) -> Result<String> {
        self.format(&QuoteOutput {
            quote,
            price_text: quote.price_line(),
        })
    }

    /// Formats an error.
    pub fn format_error(&self, message: &str, retryable: bool) -> Result<String> {
        self.format(&ErrorOutput {
            error: message,
            retryable,
        })
    }

    /// Formats the service list.
    pub fn format_services(&self, services: &[ServiceKind]) -> Result<String> {
        let outputs: Vec<ServiceOutput> = services
            .iter()
            .map(|service| ServiceOutput {
                id: service.wire_name(),
                title: service.title(),
                unit: format!("{:?}", service.unit()).to_lowercase(),
                accepts_documents: service.accepts_documents(),
                placeholder: service.placeholder(),
            })
            .collect();

        self.format(&outputs)
    }
}
