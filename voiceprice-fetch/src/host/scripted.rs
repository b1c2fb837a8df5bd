//! Scripted transport for tests.
//!
//! Replies are queued per endpoint (the last path segment of the URL, e.g.
//! `"calculate"`). A route can also carry a sticky reply used once its
//! queue is empty. Every call is recorded.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use super::http::{HttpTransport, TransportResponse};
use crate::error::TransportError;

/// A scripted reply.
#[derive(Debug, Clone)]
pub enum Reply {
    /// JSON body with a status code.
    Json {
        /// HTTP status.
        status: u16,
        /// Body.
        body: serde_json::Value,
    },
    /// Raw body with a status code.
    Raw {
        /// HTTP status.
        status: u16,
        /// Body.
        body: Vec<u8>,
    },
    /// Connection refused.
    ConnectError,
    /// Never completes.
    Hang,
    /// Waits, then answers with the inner reply.
    Delayed(Duration, Box<Reply>),
}

impl Reply {
    /// 200 with the given JSON body.
    pub fn ok(body: serde_json::Value) -> Self {
        Self::Json { status: 200, body }
    }

    /// Error status with a plain-text body.
    pub fn status(status: u16) -> Self {
        Self::Raw {
            status,
            body: format!("status {status}").into_bytes(),
        }
    }

    /// Delays this reply.
    pub fn after(self, delay: Duration) -> Self {
        Self::Delayed(delay, Box::new(self))
    }
}

/// A recorded call.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    /// HTTP method.
    pub method: &'static str,
    /// Full URL.
    pub url: String,
    /// JSON body for POST requests.
    pub body: Option<serde_json::Value>,
}

impl RecordedCall {
    /// Returns the endpoint name (last path segment).
    pub fn endpoint(&self) -> &str {
        endpoint_of(&self.url)
    }
}

#[derive(Default)]
struct Route {
    queue: VecDeque<Reply>,
    sticky: Option<Reply>,
}

/// Transport answering from a script.
#[derive(Default)]
pub struct ScriptedTransport {
    routes: Mutex<HashMap<String, Route>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedTransport {
    /// Creates an empty script; unscripted calls fail to connect.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a one-shot reply for an endpoint.
    pub fn push(&self, endpoint: &str, reply: Reply) -> &Self {
        self.with_route(endpoint, |route| route.queue.push_back(reply));
        self
    }

    /// Sets the reply used whenever the endpoint's queue is empty.
    pub fn always(&self, endpoint: &str, reply: Reply) -> &Self {
        self.with_route(endpoint, |route| route.sticky = Some(reply));
        self
    }

    /// Returns every call made so far.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    /// Returns how many calls hit an endpoint.
    pub fn calls_to(&self, endpoint: &str) -> usize {
        self.calls()
            .iter()
            .filter(|c| c.endpoint() == endpoint)
            .count()
    }

    fn with_route(&self, endpoint: &str, f: impl FnOnce(&mut Route)) {
        if let Ok(mut routes) = self.routes.lock() {
            f(routes.entry(endpoint.to_string()).or_default());
        }
    }

    fn next_reply(&self, call: RecordedCall) -> Option<Reply> {
        let endpoint = call.endpoint().to_string();
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }

        let mut routes = self.routes.lock().ok()?;
        let route = routes.get_mut(&endpoint)?;
        route.queue.pop_front().or_else(|| route.sticky.clone())
    }

    async fn respond(reply: Option<Reply>) -> Result<TransportResponse, TransportError> {
        let Some(mut reply) = reply else {
            return Err(TransportError::Connect("no scripted reply".to_string()));
        };

        loop {
            match reply {
                Reply::Delayed(delay, inner) => {
                    tokio::time::sleep(delay).await;
                    reply = *inner;
                }
                Reply::Hang => return std::future::pending().await,
                Reply::ConnectError => {
                    return Err(TransportError::Connect("connection refused".to_string()));
                }
                Reply::Json { status, body } => {
                    return Ok(TransportResponse {
                        status,
                        body: body.to_string().into_bytes(),
                    });
                }
                Reply::Raw { status, body } => return Ok(TransportResponse { status, body }),
            }
        }
    }
}

fn endpoint_of(url: &str) -> &str {
    url.trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or(url)
}

#[async_trait]
impl HttpTransport for ScriptedTransport {
    async fn post_json(
        &self,
        url: &str,
        body: &serde_json::Value,
    ) -> Result<TransportResponse, TransportError> {
        let reply = self.next_reply(RecordedCall {
            method: "POST",
            url: url.to_string(),
            body: Some(body.clone()),
        });
        Self::respond(reply).await
    }

    async fn head(&self, url: &str) -> Result<TransportResponse, TransportError> {
        let reply = self.next_reply(RecordedCall {
            method: "HEAD",
            url: url.to_string(),
            body: None,
        });
        Self::respond(reply).await
    }
}
