//! The calculator session.
//!
//! A session owns everything one visitor interaction needs: the backend
//! client, the operation guard, the supersession controller and the
//! current input. It is created when the calculator opens and shut down
//! when it closes; nothing survives it.

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};
use voiceprice_core::{CalculationRequest, Quantity, Quote, ServiceKind};
use voiceprice_fetch::PricingApi;
use voiceprice_ingest::{DocumentKind, IngestError, Ingestor};

use crate::config::SessionConfig;
use crate::error::SessionError;
use crate::guard::{OperationGuard, OperationPermit};
use crate::keepwarm::{KeepWarm, KeepWarmHandle};
use crate::supersession::{RequestSupersession, RequestToken};
use crate::view::{QuoteView, error_message};

/// Shown when a document counts to zero.
pub const EMPTY_DOCUMENT_MESSAGE: &str = "Файл не содержит слов!";

/// Shown when the backend could not count a document.
pub const COUNT_FAILED_MESSAGE: &str = "Ошибка при подсчёте слов. Проверь файл.";

// ============================================================================
// Status
// ============================================================================

/// How a calculation ended.
#[derive(Debug, Clone, PartialEq)]
pub enum CalcStatus {
    /// The quote was rendered.
    Rendered(Quote),
    /// Another operation was running; nothing happened.
    Busy,
    /// The input was rejected before any network call.
    Invalid,
    /// A newer calculation took over; nothing was rendered.
    Superseded,
    /// The calculation was cancelled; nothing was rendered.
    Cancelled,
    /// The backend call failed; the error was rendered.
    Failed(String),
}

impl CalcStatus {
    /// Returns the rendered quote, if any.
    pub fn quote(&self) -> Option<&Quote> {
        match self {
            Self::Rendered(quote) => Some(quote),
            _ => None,
        }
    }
}

/// How a file upload ended.
#[derive(Debug, Clone, PartialEq)]
pub enum IngestStatus {
    /// The document was counted and a calculation followed.
    Counted {
        /// Counted words or characters.
        quantity: u64,
        /// Outcome of the follow-up calculation.
        calculation: CalcStatus,
    },
    /// The document counted to zero.
    Empty,
    /// Another operation was running; nothing happened.
    Busy,
    /// The file type is not supported.
    Rejected(String),
    /// Reading, extraction or counting failed; the error was rendered.
    Failed(String),
    /// Newer input arrived during the upload; its count was discarded.
    Superseded,
    /// The session shut down during the upload.
    Cancelled,
}

// ============================================================================
// Session
// ============================================================================

#[derive(Debug, Default)]
struct InputState {
    service: ServiceKind,
    urgent: bool,
    quantity_input: String,
    revision: u64,
}

/// Orchestrates one calculator session.
pub struct CalculatorSession {
    config: SessionConfig,
    api: PricingApi,
    ingestor: Ingestor,
    view: Arc<dyn QuoteView>,
    guard: OperationGuard,
    supersession: RequestSupersession,
    shutdown: CancellationToken,
    input: Mutex<InputState>,
    keep_warm: Mutex<Option<KeepWarmHandle>>,
}

impl CalculatorSession {
    /// Creates a session over an existing API client.
    pub fn new(config: SessionConfig, api: PricingApi, view: Arc<dyn QuoteView>) -> Self {
        let shutdown = CancellationToken::new();
        Self {
            config,
            api,
            ingestor: Ingestor::new(),
            view,
            guard: OperationGuard::new(),
            supersession: RequestSupersession::new(shutdown.clone()),
            shutdown,
            input: Mutex::new(InputState::default()),
            keep_warm: Mutex::new(None),
        }
    }

    /// Creates a session talking to the backend named in the config.
    pub fn from_config(config: SessionConfig, view: Arc<dyn QuoteView>) -> Result<Self, SessionError> {
        config.validate()?;
        let api = PricingApi::connect(&config.base_url, config.retry.to_policy())?;
        Ok(Self::new(config, api, view))
    }

    /// Replaces the document ingestor.
    #[must_use]
    pub fn with_ingestor(mut self, ingestor: Ingestor) -> Self {
        self.ingestor = ingestor;
        self
    }

    fn input(&self) -> MutexGuard<'_, InputState> {
        self.input.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Returns the configuration.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Returns the backend client.
    pub fn api(&self) -> &PricingApi {
        &self.api
    }

    /// Selected service.
    pub fn service(&self) -> ServiceKind {
        self.input().service
    }

    /// Whether the urgent surcharge is selected.
    pub fn is_urgent(&self) -> bool {
        self.input().urgent
    }

    /// Raw content of the quantity field.
    pub fn quantity_input(&self) -> String {
        self.input().quantity_input.clone()
    }

    /// Whether a calculation or upload is running.
    pub fn is_busy(&self) -> bool {
        self.guard.is_busy()
    }

    /// Whether the session has been shut down.
    pub fn is_shut_down(&self) -> bool {
        self.shutdown.is_cancelled()
    }

    // ========================================================================
    // Input
    // ========================================================================

    /// Selects a service. Clears the quantity field and drops any running
    /// calculation, whose result would belong to the previous service.
    pub fn select_service(&self, service: ServiceKind) {
        {
            let mut input = self.input();
            input.service = service;
            input.quantity_input.clear();
            input.revision += 1;
        }
        self.supersession.cancel_all();
        debug!(%service, "Service selected");
    }

    /// Replaces the content of the quantity field.
    pub fn set_quantity_input(&self, input: impl Into<String>) {
        let mut state = self.input();
        state.quantity_input = input.into();
        state.revision += 1;
    }

    /// Sets the urgent flag without recalculating.
    pub fn set_urgent(&self, urgent: bool) {
        self.input().urgent = urgent;
    }

    /// Flips the urgent flag. Recalculates when the quantity field holds a
    /// positive number.
    pub async fn toggle_urgent(&self) -> Option<CalcStatus> {
        let has_quantity = {
            let mut input = self.input();
            input.urgent = !input.urgent;
            debug!(urgent = input.urgent, "Urgency toggled");
            Quantity::parse_input(&input.quantity_input).is_ok()
        };

        if has_quantity {
            Some(self.recalculate().await)
        } else {
            None
        }
    }

    // ========================================================================
    // Calculation
    // ========================================================================

    /// Calculates the price for the current input.
    ///
    /// Returns [`CalcStatus::Busy`] without doing anything while another
    /// operation runs.
    #[instrument(skip(self))]
    pub async fn calculate(&self) -> CalcStatus {
        let Some(permit) = self.guard.try_enter() else {
            debug!("Operation already running, ignoring trigger");
            return CalcStatus::Busy;
        };
        let token = self.supersession.start_new();
        self.run_calculation(permit, token).await
    }

    /// Calculates for input that changed under a running calculation.
    ///
    /// The running calculation is cancelled and its result discarded; this
    /// one starts as soon as the guard is free.
    #[instrument(skip(self))]
    pub async fn recalculate(&self) -> CalcStatus {
        let token = self.supersession.start_new();
        let Some(permit) = self.guard.enter(token.cancellation()).await else {
            return self.stale_status();
        };
        if !self.supersession.is_current(&token) {
            return self.stale_status();
        }
        self.run_calculation(permit, token).await
    }

    /// Re-invokes the calculation after a rendered failure.
    pub async fn retry(&self) -> CalcStatus {
        info!("Retrying calculation");
        self.calculate().await
    }

    fn stale_status(&self) -> CalcStatus {
        if self.shutdown.is_cancelled() {
            CalcStatus::Cancelled
        } else {
            CalcStatus::Superseded
        }
    }

    async fn run_calculation(&self, _permit: OperationPermit, token: RequestToken) -> CalcStatus {
        let (service, urgent, raw) = {
            let input = self.input();
            (input.service, input.urgent, input.quantity_input.clone())
        };

        let quantity = match Quantity::parse_input(&raw) {
            Ok(quantity) => quantity,
            Err(e) => {
                self.supersession.clear(&token);
                debug!(input = %raw, "Rejected quantity");
                self.view.show_validation(&e.to_string());
                return CalcStatus::Invalid;
            }
        };

        self.view.show_loading();
        let request = CalculationRequest::new(service, quantity, urgent);
        let result = self.api.calculate(&request, token.cancellation()).await;

        let status = match result {
            Ok(result) if self.supersession.is_current(&token) => {
                let quote = Quote::build(&request, &result);
                self.view.show_quote(&quote);
                info!(%service, quantity = %quantity, urgent, "Rendered quote");
                CalcStatus::Rendered(quote)
            }
            Ok(_) => {
                debug!(generation = token.generation(), "Discarding stale result");
                self.stale_status()
            }
            Err(e) if e.is_cancelled() => {
                debug!(generation = token.generation(), "Calculation cancelled");
                self.stale_status()
            }
            Err(e) if !self.supersession.is_current(&token) => {
                debug!(error = %e, "Discarding stale failure");
                self.stale_status()
            }
            Err(e) => {
                warn!(error = %e, "Calculation failed");
                let message = e.to_string();
                self.view.show_error(&error_message(&message));
                CalcStatus::Failed(message)
            }
        };

        self.supersession.clear(&token);
        status
    }

    // ========================================================================
    // Documents
    // ========================================================================

    /// Counts an uploaded document, fills in the quantity and calculates.
    ///
    /// Selecting a document while a minute-based service is active switches
    /// to text narration first. Input typed or a calculation started while
    /// the document is being counted wins: the count is then discarded.
    pub async fn ingest_file(&self, path: &Path) -> IngestStatus {
        self.ingest_file_as(path, None).await
    }

    /// Like [`ingest_file`](Self::ingest_file), for uploads that declare
    /// their MIME type. A declared type takes precedence over the extension.
    #[instrument(skip(self), fields(path = %path.display()))]
    pub async fn ingest_file_as(&self, path: &Path, declared_mime: Option<&str>) -> IngestStatus {
        let Some(permit) = self.guard.try_enter() else {
            debug!("Operation already running, ignoring file");
            return IngestStatus::Busy;
        };

        if DocumentKind::detect(path, declared_mime).is_none() {
            let err = IngestError::UnsupportedType(path.display().to_string());
            self.view.show_validation(err.user_message());
            return IngestStatus::Rejected(err.user_message().to_string());
        }

        if !self.service().accepts_documents() {
            self.select_service(ServiceKind::VoiceText);
            self.view.set_service(ServiceKind::VoiceText);
        }

        let token = self.supersession.start_new();
        let revision = self.input().revision;

        self.view.set_file_busy(true);
        let counted = self.count_file(path, declared_mime, &token).await;
        self.view.set_file_busy(false);

        let counted = match counted {
            Ok(_) if !self.upload_is_current(&token, revision) => {
                debug!(generation = token.generation(), "Discarding stale document count");
                Err(self.stale_upload_status())
            }
            other => other,
        };

        match counted {
            Ok(0) => {
                self.supersession.clear(&token);
                self.set_quantity_input("0");
                self.view.set_quantity(0);
                self.view.show_validation(EMPTY_DOCUMENT_MESSAGE);
                IngestStatus::Empty
            }
            Ok(quantity) => {
                self.set_quantity_input(quantity.to_string());
                self.view.set_quantity(quantity);
                IngestStatus::Counted {
                    quantity,
                    calculation: self.run_calculation(permit, token).await,
                }
            }
            Err(status) => {
                self.supersession.clear(&token);
                status
            }
        }
    }

    fn upload_is_current(&self, token: &RequestToken, revision: u64) -> bool {
        self.supersession.is_current(token) && self.input().revision == revision
    }

    fn stale_upload_status(&self) -> IngestStatus {
        if self.shutdown.is_cancelled() {
            IngestStatus::Cancelled
        } else {
            IngestStatus::Superseded
        }
    }

    async fn count_file(
        &self,
        path: &Path,
        declared_mime: Option<&str>,
        token: &RequestToken,
    ) -> Result<u64, IngestStatus> {
        let ingested = match self.ingestor.ingest_path_as(path, declared_mime).await {
            Ok(ingested) => ingested,
            Err(e) => {
                warn!(error = %e, "Could not read document");
                self.view.show_error(e.user_message());
                return Err(IngestStatus::Failed(e.user_message().to_string()));
            }
        };
        if !ingested.has_content() {
            debug!(kind = %ingested.kind, "Document has no text");
        }

        match self
            .api
            .count(&ingested.text, self.service(), token.cancellation())
            .await
        {
            Ok(count) => Ok(count),
            Err(e) if e.is_cancelled() => Err(self.stale_upload_status()),
            Err(e) if !self.supersession.is_current(token) => {
                debug!(error = %e, "Discarding stale counting failure");
                Err(self.stale_upload_status())
            }
            Err(e) => {
                warn!(error = %e, "Counting failed");
                self.view.show_error(COUNT_FAILED_MESSAGE);
                Err(IngestStatus::Failed(COUNT_FAILED_MESSAGE.to_string()))
            }
        }
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Starts background warm-up pings unless disabled or already running.
    ///
    /// Returns whether pings are running afterwards.
    pub fn start_keep_warm(&self) -> bool {
        if !self.config.keep_warm.enabled || self.shutdown.is_cancelled() {
            return false;
        }

        let mut slot = self.keep_warm.lock().unwrap_or_else(PoisonError::into_inner);
        if slot.as_ref().is_some_and(KeepWarmHandle::is_running) {
            return true;
        }
        *slot = Some(KeepWarm::spawn(
            self.api.clone(),
            self.config.keep_warm.interval(),
            &self.shutdown,
        ));
        true
    }

    /// Cancels every running call and stops background pings.
    pub fn shutdown(&self) {
        if self.shutdown.is_cancelled() {
            return;
        }
        info!("Shutting down calculator session");
        self.supersession.cancel_all();
        self.shutdown.cancel();
        if let Some(handle) = self
            .keep_warm
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            handle.stop();
        }
    }
}

impl Drop for CalculatorSession {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

impl std::fmt::Debug for CalculatorSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CalculatorSession")
            .field("base_url", &self.config.base_url)
            .field("busy", &self.guard.is_busy())
            .field("shut_down", &self.shutdown.is_cancelled())
            .finish_non_exhaustive()
    }
}
