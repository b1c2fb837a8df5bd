//! Domain models for VoicePrice.
//!
//! ## Submodules
//!
//! - [`service`] - Service types (ServiceKind, QuantityUnit, Quantity)
//! - [`calculation`] - Wire types for the pricing backend
//! - [`deadline`] - Deadline string parsing
//! - [`quote`] - Presentation model and formatting helpers

pub mod calculation;
pub mod deadline;
pub mod quote;
pub mod service;

// Re-export everything at the models level
pub use calculation::{
    CalculationPayload, CalculationRequest, CalculationResult, CountRequest, CountResponse,
};
pub use deadline::Deadline;
pub use quote::{Quote, QuoteVolume, format_rub, max_minutes, optimal_timing, seconds_to_time};
pub use service::{Quantity, QuantityUnit, ServiceKind};
