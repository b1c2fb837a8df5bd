//! Resilient HTTP client.
//!
//! One logical call becomes up to [`RetryPolicy::max_attempts`] physical
//! attempts. Attempts run strictly one after another; each races its own
//! timeout and the caller's cancellation token.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument, warn};

use crate::error::FetchError;
use crate::host::http::{HttpTransport, TransportResponse};
use crate::retry::RetryPolicy;

// ============================================================================
// Fetch Attempt
// ============================================================================

/// Record of a single physical attempt.
#[derive(Debug, Clone)]
pub struct FetchAttempt {
    /// Attempt index, starting at 1.
    pub attempt: u32,
    /// Timeout the attempt ran under.
    pub timeout: Duration,
    /// How long the attempt took.
    pub elapsed: Duration,
    /// Error if the attempt failed.
    pub error: Option<String>,
}

// ============================================================================
// Fetch Outcome
// ============================================================================

/// The outcome of one logical call.
#[derive(Debug)]
pub struct FetchOutcome<T> {
    /// The parsed value or the terminal error.
    pub result: Result<T, FetchError>,
    /// All attempts made.
    pub attempts: Vec<FetchAttempt>,
    /// Total duration including pauses.
    pub duration: Duration,
}

impl<T> FetchOutcome<T> {
    /// Returns true if the call succeeded.
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }

    /// Returns the number of physical attempts.
    pub fn attempts_count(&self) -> usize {
        self.attempts.len()
    }

    /// Returns all intermediate and final attempt errors.
    pub fn errors(&self) -> Vec<&str> {
        self.attempts
            .iter()
            .filter_map(|a| a.error.as_deref())
            .collect()
    }
}

enum Method {
    Post(serde_json::Value),
    Head,
}

// ============================================================================
// Resilient Client
// ============================================================================

/// HTTP client with retries, escalating timeouts and cancellation.
#[derive(Clone)]
pub struct ResilientClient {
    transport: Arc<dyn HttpTransport>,
    policy: RetryPolicy,
}

impl ResilientClient {
    /// Creates a client over the given transport with the default policy.
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            transport,
            policy: RetryPolicy::default(),
        }
    }

    /// Sets the retry policy for this client.
    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Returns the retry policy.
    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// POSTs a JSON body and parses the JSON response.
    pub async fn post_json<B, T>(
        &self,
        url: &str,
        body: &B,
        cancel: &CancellationToken,
    ) -> Result<T, FetchError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.execute_post(url, body, cancel).await.result
    }

    /// Like [`post_json`](Self::post_json), but reports every attempt.
    pub async fn execute_post<B, T>(
        &self,
        url: &str,
        body: &B,
        cancel: &CancellationToken,
    ) -> FetchOutcome<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = match serde_json::to_value(body) {
            Ok(body) => body,
            Err(e) => {
                return FetchOutcome {
                    result: Err(e.into()),
                    attempts: Vec::new(),
                    duration: Duration::ZERO,
                };
            }
        };

        let outcome = self.execute(url, Method::Post(body), cancel).await;
        FetchOutcome {
            result: outcome.result.and_then(|response| parse_json(&response)),
            attempts: outcome.attempts,
            duration: outcome.duration,
        }
    }

    /// Sends a HEAD request and returns the status code.
    pub async fn head(&self, url: &str, cancel: &CancellationToken) -> Result<u16, FetchError> {
        self.execute(url, Method::Head, cancel)
            .await
            .result
            .map(|response| response.status)
    }

    #[instrument(skip(self, method, cancel), fields(url = %url))]
    async fn execute(
        &self,
        url: &str,
        method: Method,
        cancel: &CancellationToken,
    ) -> FetchOutcome<TransportResponse> {
        let start = Instant::now();
        let max_attempts = self.policy.attempts();
        let mut attempts = Vec::with_capacity(max_attempts as usize);

        let finish = |result: Result<TransportResponse, FetchError>,
                      attempts: Vec<FetchAttempt>| FetchOutcome {
            result,
            attempts,
            duration: start.elapsed(),
        };

        for attempt in 1..=max_attempts {
            if cancel.is_cancelled() {
                return finish(Err(FetchError::Cancelled), attempts);
            }

            let timeout = self.policy.timeout_for_attempt(attempt);
            debug!(attempt, max_attempts, timeout_ms = timeout.as_millis(), "Sending request");

            let attempt_start = Instant::now();
            let request = async {
                match &method {
                    Method::Post(body) => self.transport.post_json(url, body).await,
                    Method::Head => self.transport.head(url).await,
                }
            };

            let result = tokio::select! {
                biased;
                () = cancel.cancelled() => Err(FetchError::Cancelled),
                res = tokio::time::timeout(timeout, request) => match res {
                    Err(_) => Err(FetchError::Timeout { attempt, after: timeout }),
                    Ok(Err(e)) => Err(FetchError::Transport(e)),
                    Ok(Ok(response)) if response.is_success() => Ok(response),
                    Ok(Ok(response)) => Err(FetchError::Status {
                        status: response.status,
                        body: response.body_text(),
                    }),
                },
            };
            let elapsed = attempt_start.elapsed();

            let error = match result {
                Ok(response) => {
                    debug!(attempt, status = response.status, "Request succeeded");
                    attempts.push(FetchAttempt {
                        attempt,
                        timeout,
                        elapsed,
                        error: None,
                    });
                    return finish(Ok(response), attempts);
                }
                Err(error) => error,
            };

            attempts.push(FetchAttempt {
                attempt,
                timeout,
                elapsed,
                error: Some(error.to_string()),
            });

            if error.is_cancelled() {
                debug!(attempt, "Request cancelled");
                return finish(Err(error), attempts);
            }

            if !error.is_retryable() {
                warn!(attempt, error = %error, "Request failed, not retrying");
                return finish(Err(error), attempts);
            }

            if attempt == max_attempts {
                warn!(attempt, error = %error, "Request failed, no attempts left");
                return finish(
                    Err(FetchError::Exhausted {
                        attempts: attempt,
                        last: Box::new(error),
                    }),
                    attempts,
                );
            }

            let pause = self.policy.pause_after(attempt, error.is_timeout());
            warn!(
                attempt,
                error = %error,
                pause_ms = pause.as_millis(),
                "Request failed, retrying"
            );

            tokio::select! {
                biased;
                () = cancel.cancelled() => return finish(Err(FetchError::Cancelled), attempts),
                () = tokio::time::sleep(pause) => {}
            }
        }

        // The loop always returns; an empty range is impossible since
        // `attempts()` is at least 1.
        finish(Err(FetchError::Cancelled), attempts)
    }
}

impl std::fmt::Debug for ResilientClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResilientClient")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

fn parse_json<T: DeserializeOwned>(response: &TransportResponse) -> Result<T, FetchError> {
    serde_json::from_slice(&response.body).map_err(|e| {
        warn!(error = %e, "Failed to parse response JSON");
        FetchError::InvalidResponse(format!("Invalid JSON: {e}"))
    })
}

// ============================================================================
// Tests
// ============================================================================
