// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # VoicePrice Session
//!
//! Orchestration of one calculator session.
//!
//! This crate provides:
//!
//! - **OperationGuard**: at most one upload or calculation at a time, released
//!   by dropping its permit
//! - **RequestSupersession**: only the newest calculation may render
//! - **KeepWarm**: background warm-up pings against a sleeping backend
//! - **CalculatorSession**: input state, file uploads and calculations,
//!   rendered through a [`QuoteView`]
//! - **SessionConfig**: JSON configuration with defaults
//!
//! ## Usage
//!
//! ```ignore
//! use std::sync::Arc;
//! use voiceprice_session::{CalculatorSession, SessionConfig};
//!
//! let session = CalculatorSession::from_config(SessionConfig::load()?, Arc::new(view))?;
//! session.start_keep_warm();
//!
//! session.set_quantity_input("240");
//! let status = session.calculate().await;
//! ```

pub mod config;
pub mod error;
pub mod guard;
pub mod keepwarm;
pub mod session;
pub mod supersession;
pub mod view;

pub use config::{KeepWarmConfig, RetryConfig, SessionConfig};
pub use error::SessionError;
pub use guard::{OperationGuard, OperationPermit};
pub use keepwarm::{DEFAULT_KEEP_WARM_INTERVAL, KeepWarm, KeepWarmHandle};
pub use session::{
    COUNT_FAILED_MESSAGE, CalcStatus, CalculatorSession, EMPTY_DOCUMENT_MESSAGE, IngestStatus,
};
pub use supersession::{RequestSupersession, RequestToken};
pub use view::{LOADING_MESSAGE, QuoteView, error_message};
