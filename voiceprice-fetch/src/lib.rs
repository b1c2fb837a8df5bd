// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # VoicePrice Fetch
//!
//! Resilient HTTP calls against the pricing backend.
//!
//! The backend sleeps when idle and takes several seconds to wake up, so
//! every logical call goes through [`ResilientClient`]:
//!
//! - escalating per-attempt timeouts (short first attempt, longer retries)
//! - a short fixed pause after a first-attempt timeout (cold start)
//! - capped backoff after other failures
//! - cooperative cancellation via [`CancellationToken`](tokio_util::sync::CancellationToken)
//!
//! ## Layers
//!
//! - [`host::http`] - One physical request ([`HttpTransport`])
//! - [`client`] - Retries, timeouts and cancellation ([`ResilientClient`])
//! - [`api`] - Typed counting and pricing calls ([`PricingApi`])
//!
//! ## Example
//!
//! ```ignore
//! use voiceprice_fetch::{PricingApi, RetryPolicy, DEFAULT_BASE_URL};
//! use tokio_util::sync::CancellationToken;
//!
//! let api = PricingApi::connect(DEFAULT_BASE_URL, RetryPolicy::default())?;
//! let result = api.calculate(&request, &CancellationToken::new()).await?;
//! ```

// Core modules
pub mod api;
pub mod client;
pub mod endpoints;
pub mod error;
pub mod host;
pub mod retry;

// Re-export key types at crate root

// Errors
pub use error::{FetchError, TransportError};

// Transport
pub use host::http::{HttpTransport, ReqwestTransport, TransportResponse};
#[cfg(any(test, feature = "test-util"))]
pub use host::scripted::{RecordedCall, Reply, ScriptedTransport};

// Client & API
pub use api::PricingApi;
pub use client::{FetchAttempt, FetchOutcome, ResilientClient};
pub use endpoints::{DEFAULT_BASE_URL, Endpoints};
pub use retry::RetryPolicy;
