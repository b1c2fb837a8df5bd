//! Wire types exchanged with the pricing backend.

use serde::{Deserialize, Serialize};

use super::service::{Quantity, QuantityUnit, ServiceKind};
use crate::error::CoreError;

// ============================================================================
// Calculation Request
// ============================================================================

/// One price lookup, built from the calculator state at calculation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalculationRequest {
    /// Selected service.
    pub service: ServiceKind,
    /// Words, minutes or characters depending on the service.
    pub quantity: Quantity,
    /// Whether the urgent surcharge applies.
    pub urgent: bool,
}

impl CalculationRequest {
    /// Creates a new request.
    pub fn new(service: ServiceKind, quantity: Quantity, urgent: bool) -> Self {
        Self {
            service,
            quantity,
            urgent,
        }
    }

    /// The payload used to keep the backend warm.
    pub fn warm_up() -> Self {
        Self {
            service: ServiceKind::VoiceText,
            quantity: Quantity(1),
            urgent: false,
        }
    }

    /// Returns the JSON body for `POST /calculate`.
    pub fn to_payload(&self) -> CalculationPayload {
        CalculationPayload {
            service: self.service,
            text: self.quantity.get().to_string(),
            is_urgent: self.urgent,
        }
    }
}

/// JSON body of `POST /calculate`.
///
/// The backend expects the quantity as a string under `text`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationPayload {
    /// Service wire name.
    pub service: ServiceKind,
    /// Stringified quantity.
    pub text: String,
    /// Urgent flag.
    pub is_urgent: bool,
}

// ============================================================================
// Calculation Result
// ============================================================================

/// Response of `POST /calculate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    /// Word count echoed back for word-based services.
    #[serde(default)]
    pub word_count: Option<u64>,
    /// Regular deadline, e.g. `"3 days (до 01.01.2025 включительно)"`.
    pub deadline: String,
    /// Deadline with the urgent surcharge.
    pub deadline_urgent: String,
    /// Regular price in roubles.
    pub price_rub: f64,
    /// Urgent price in roubles.
    pub price_rub_urgent: f64,
}

impl CalculationResult {
    /// Returns the deadline matching the urgency of the request.
    pub fn deadline_for(&self, urgent: bool) -> &str {
        if urgent {
            &self.deadline_urgent
        } else {
            &self.deadline
        }
    }
}

// ============================================================================
// Counting
// ============================================================================

/// JSON body of `POST /count_words` and `POST /count_chars`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountRequest<'a> {
    /// Extracted document text.
    pub text: &'a str,
    /// Service wire name.
    pub service: ServiceKind,
}

/// Response of the counting endpoints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountResponse {
    /// Present on `count_words` responses.
    #[serde(default)]
    pub words: Option<u64>,
    /// Present on `count_chars` responses.
    #[serde(default)]
    pub chars: Option<u64>,
}

impl CountResponse {
    /// Reads the count for the given unit.
    pub fn count_for(&self, unit: QuantityUnit) -> Result<u64, CoreError> {
        let value = match unit {
            QuantityUnit::Words => self.words,
            QuantityUnit::Characters => self.chars,
            QuantityUnit::Minutes => None,
        };
        value.ok_or_else(|| {
            CoreError::InvalidData(format!("count response has no value for {unit:?}"))
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
