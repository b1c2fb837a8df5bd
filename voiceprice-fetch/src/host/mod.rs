//! Host APIs for VoicePrice fetching.
//!
//! - [`http`] - HTTP transport trait and the reqwest implementation
//! - [`scripted`] - Scripted transport for tests (`test-util` feature)

pub mod http;
#[cfg(any(test, feature = "test-util"))]
pub mod scripted;

// Re-export key types
pub use http::{HttpTransport, ReqwestTransport, TransportResponse};
