//! Presentation seam of the calculator.

use voiceprice_core::{Quote, ServiceKind};

/// Message shown while a calculation runs.
pub const LOADING_MESSAGE: &str = "Считаем стоимость...";

/// Renders calculator state.
///
/// Implementations only draw; every decision is made by the session.
pub trait QuoteView: Send + Sync {
    /// A calculation has started.
    fn show_loading(&self);

    /// A calculation finished and is still current.
    fn show_quote(&self, quote: &Quote);

    /// A calculation or count failed. The view offers a way to retry,
    /// which re-invokes the calculation.
    fn show_error(&self, message: &str);

    /// The input was rejected before any network call.
    fn show_validation(&self, message: &str);

    /// The quantity field was filled in by the session.
    fn set_quantity(&self, quantity: u64);

    /// A file is being processed.
    fn set_file_busy(&self, busy: bool);

    /// The selected service was changed by the session.
    fn set_service(&self, _service: ServiceKind) {}
}

/// Formats an error for the result area.
pub fn error_message(detail: &str) -> String {
    format!("Ошибка: {detail}")
}
