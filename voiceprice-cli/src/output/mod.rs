//! Output formatting for CLI.
//!
//! The views render session events as they happen: [`TextView`] for
//! people, [`JsonView`] for scripts.

mod json;
mod text;

use std::io::Write;

use voiceprice_core::{Quote, ServiceKind};
use voiceprice_session::{LOADING_MESSAGE, QuoteView};

pub use json::{JsonFormatter, PingOutput};
pub use text::TextFormatter;

/// Renders session events as colored text.
#[derive(Debug)]
pub struct TextView {
    formatter: TextFormatter,
    interactive: bool,
    quiet: bool,
}

impl TextView {
    /// Creates a text view. Interactive views offer `retry` after failures.
    pub fn new(formatter: TextFormatter, interactive: bool, quiet: bool) -> Self {
        Self {
            formatter,
            interactive,
            quiet,
        }
    }
}

impl QuoteView for TextView {
    fn show_loading(&self) {
        if !self.quiet {
            eprintln!("{}", self.formatter.format_loading(LOADING_MESSAGE));
        }
    }

    fn show_quote(&self, quote: &Quote) {
        println!("{}", self.formatter.format_quote(quote));
        if self.interactive {
            println!();
        }
    }

    fn show_error(&self, message: &str) {
        eprintln!("{}", self.formatter.format_error(message, self.interactive));
    }

    fn show_validation(&self, message: &str) {
        eprintln!("{}", self.formatter.format_validation(message));
    }

    fn set_quantity(&self, quantity: u64) {
        if !self.quiet {
            eprintln!("Количество: {quantity}");
        }
    }

    fn set_file_busy(&self, busy: bool) {
        if busy && !self.quiet {
            eprint!("Обрабатываем файл... ");
            let _ = std::io::stderr().flush();
        } else if !busy && !self.quiet {
            eprintln!("готово");
        }
    }

    fn set_service(&self, service: ServiceKind) {
        if !self.quiet {
            eprintln!("Услуга: {}", service.title());
        }
    }
}

/// Renders quotes and failures as JSON documents on stdout.
#[derive(Debug)]
pub struct JsonView {
    formatter: JsonFormatter,
}

impl JsonView {
    /// Creates a JSON view.
    pub fn new(formatter: JsonFormatter) -> Self {
        Self { formatter }
    }

    fn emit(&self, json: anyhow::Result<String>) {
        match json {
            Ok(json) => println!("{json}"),
            Err(e) => tracing::warn!(error = %e, "Failed to serialize output"),
        }
    }
}

impl QuoteView for JsonView {
    fn show_loading(&self) {}

    fn show_quote(&self, quote: &Quote) {
        self.emit(self.formatter.format_quote(quote));
    }

    fn show_error(&self, message: &str) {
        self.emit(self.formatter.format_error(message, true));
    }

    fn show_validation(&self, message: &str) {
        self.emit(self.formatter.format_error(message, false));
    }

    fn set_quantity(&self, _quantity: u64) {}

    fn set_file_busy(&self, _busy: bool) {}
}

#[cfg(test)]
mod tests;
