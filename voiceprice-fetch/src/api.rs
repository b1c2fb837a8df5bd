//! Typed client for the pricing backend.

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument};
use voiceprice_core::{
    CalculationRequest, CalculationResult, CountRequest, CountResponse, CoreError, ServiceKind,
};

use crate::client::ResilientClient;
use crate::endpoints::Endpoints;
use crate::error::FetchError;
use crate::host::http::{HttpTransport, ReqwestTransport};
use crate::retry::RetryPolicy;

/// Timeout of the fire-and-forget warm-up call.
const WARM_UP_TIMEOUT: Duration = Duration::from_secs(15);

/// Counting and pricing calls against the backend.
#[derive(Debug, Clone)]
pub struct PricingApi {
    client: ResilientClient,
    endpoints: Endpoints,
}

impl PricingApi {
    /// Creates an API client from its parts.
    pub fn new(client: ResilientClient, endpoints: Endpoints) -> Self {
        Self { client, endpoints }
    }

    /// Creates an API client over `reqwest` for the given base URL.
    pub fn connect(base_url: &str, policy: RetryPolicy) -> Result<Self, FetchError> {
        let transport: Arc<dyn HttpTransport> = Arc::new(ReqwestTransport::new()?);
        Ok(Self::new(
            ResilientClient::new(transport).with_policy(policy),
            Endpoints::new(base_url)?,
        ))
    }

    /// Returns the endpoints.
    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Returns the underlying resilient client.
    pub fn client(&self) -> &ResilientClient {
        &self.client
    }

    /// Counts words or characters of a text, depending on the service.
    #[instrument(skip(self, text, service, cancel), fields(service = %service, len = text.len()))]
    pub async fn count(
        &self,
        text: &str,
        service: ServiceKind,
        cancel: &CancellationToken,
    ) -> Result<u64, FetchError> {
        let unit = service.unit();
        let url = self.endpoints.count_for(unit).ok_or_else(|| {
            CoreError::InvalidData(format!("{service} quantities cannot be counted"))
        })?;

        let response: CountResponse = self
            .client
            .post_json(&url, &CountRequest { text, service }, cancel)
            .await?;
        let count = response.count_for(unit)?;

        debug!(count, "Counted document");
        Ok(count)
    }

    /// Looks up price and deadline for a request.
    #[instrument(skip(self, request, cancel), fields(service = %request.service, quantity = %request.quantity))]
    pub async fn calculate(
        &self,
        request: &CalculationRequest,
        cancel: &CancellationToken,
    ) -> Result<CalculationResult, FetchError> {
        self.client
            .post_json(&self.endpoints.calculate(), &request.to_payload(), cancel)
            .await
    }

    /// Sends a canned calculation to wake the backend up.
    ///
    /// Single attempt; every failure is swallowed. Returns whether the
    /// backend answered successfully.
    pub async fn warm_up(&self, cancel: &CancellationToken) -> bool {
        let client = self
            .client
            .clone()
            .with_policy(RetryPolicy::single_attempt(WARM_UP_TIMEOUT));

        let result: Result<serde_json::Value, FetchError> = client
            .post_json(
                &self.endpoints.calculate(),
                &CalculationRequest::warm_up().to_payload(),
                cancel,
            )
            .await;

        match result {
            Ok(_) => {
                debug!("Backend is warm");
                true
            }
            Err(e) => {
                debug!(error = %e, "Warm-up call failed");
                false
            }
        }
    }

    /// `HEAD /calculate`, best effort. Returns the status code.
    pub async fn ping(&self, timeout: Duration) -> Result<u16, FetchError> {
        let status = self
            .client
            .clone()
            .with_policy(RetryPolicy::single_attempt(timeout))
            .head(&self.endpoints.calculate(), &CancellationToken::new())
            .await?;
        info!(status, "Backend answered ping");
        Ok(status)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::scripted::{Reply, ScriptedTransport};
    use serde_json::json;
    use voiceprice_core::Quantity;

    fn api(transport: &Arc<ScriptedTransport>) -> PricingApi {
        PricingApi::new(
            ResilientClient::new(transport.clone()),
            Endpoints::new("https://backend.test").unwrap(),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn test_count_words_for_voice_services() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.push("count_words", Reply::ok(json!({"words": 321})));

        let count = api(&transport)
            .count("раз два три", ServiceKind::VoiceCamera, &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(count, 321);
        let call = &transport.calls()[0];
        assert_eq!(call.endpoint(), "count_words");
        assert_eq!(
            call.body,
            Some(json!({"text": "раз два три", "service": "voice_camera"}))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_count_chars_for_translation() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.push("count_chars", Reply::ok(json!({"chars": 1024})));

        let count = api(&transport)
            .count("текст", ServiceKind::TranslateText, &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(count, 1024);
    }

    #[tokio::test(start_paused = true)]
    async fn test_count_rejects_minute_services() {
        let transport = Arc::new(ScriptedTransport::new());

        let result = api(&transport)
            .count("text", ServiceKind::VoiceVideo, &CancellationToken::new())
            .await;

        assert!(matches!(result, Err(FetchError::Core(_))));
        assert!(transport.calls().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_calculate_sends_payload() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.push(
            "calculate",
            Reply::ok(json!({
                "word_count": 240,
                "deadline": "2 days (до 03.01.2025 включительно)",
                "deadline_urgent": "1 day (до 02.01.2025 включительно)",
                "price_rub": 960,
                "price_rub_urgent": 1440
            })),
        );

        let request =
            CalculationRequest::new(ServiceKind::VoiceText, Quantity::new(240).unwrap(), true);
        let result = api(&transport)
            .calculate(&request, &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(result.word_count, Some(240));
        assert_eq!(
            transport.calls()[0].body,
            Some(json!({"service": "voice_text", "text": "240", "is_urgent": true}))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_warm_up_swallows_errors_and_never_retries() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.always("calculate", Reply::status(503));

        assert!(!api(&transport).warm_up(&CancellationToken::new()).await);
        assert_eq!(transport.calls_to("calculate"), 1);

        transport.push("calculate", Reply::ok(json!({})));
        assert!(api(&transport).warm_up(&CancellationToken::new()).await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_ping_uses_head() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.push("calculate", Reply::status(405));

        let result = api(&transport).ping(Duration::from_secs(5)).await;

        // 405 is not a success status; the ping reports it as a failure.
        assert_eq!(result.unwrap_err().status(), Some(405));
        assert_eq!(transport.calls()[0].method, "HEAD");
    }
}
