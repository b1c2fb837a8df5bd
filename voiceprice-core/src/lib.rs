// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # `VoicePrice` Core
//!
//! Core types and models for the `VoicePrice` calculator.
//!
//! This crate provides the foundational abstractions used across all other
//! `VoicePrice` crates:
//!
//! - Service catalogue and quantity validation
//! - Wire types for the pricing backend
//! - Deadline parsing and quote presentation
//! - Error types
//!
//! ## Key Types
//!
//! ### Services
//! - [`ServiceKind`] - Enum of all quotable services
//! - [`QuantityUnit`] - Words, minutes or characters
//! - [`Quantity`] - Validated positive quantity
//!
//! ### Backend Exchange
//! - [`CalculationRequest`] - One price lookup
//! - [`CalculationResult`] - Backend answer to a price lookup
//! - [`CountResponse`] - Backend answer to a counting call
//!
//! ### Presentation
//! - [`Quote`] - What the result area shows
//! - [`Deadline`] - Turnaround label and date

pub mod error;
pub mod models;

// Re-export error types
pub use error::CoreError;

// Re-export all model types
pub use models::{
    // Services
    Quantity,
    QuantityUnit,
    ServiceKind,
    // Backend exchange
    CalculationPayload,
    CalculationRequest,
    CalculationResult,
    CountRequest,
    CountResponse,
    // Presentation
    Deadline,
    Quote,
    QuoteVolume,
    format_rub,
    max_minutes,
    optimal_timing,
    seconds_to_time,
};
