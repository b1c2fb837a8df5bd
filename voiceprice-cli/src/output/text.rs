//! Text output formatting with colors.

use voiceprice_core::{Quote, QuoteVolume, ServiceKind};

// ============================================================================
// ANSI Colors
// ============================================================================

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";
const CYAN: &str = "\x1b[36m";

/// Width of the label column in quote output.
const LABEL_WIDTH: usize = 26;

/// Text formatter with optional colors.
#[derive(Debug, Clone, Copy)]
pub struct TextFormatter {
    use_colors: bool,
}

impl TextFormatter {
    /// Creates a new text formatter.
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    /// Formats a rendered quote, one row per line.
    pub fn format_quote(&self, quote: &Quote) -> String {
        let mut lines = vec![self.row("📦", "Услуга:", &self.bold(&quote.service_line()))];

        match &quote.volume {
            QuoteVolume::Words {
                words,
                max_minutes,
                optimal_timing,
            } => {
                lines.push(self.row("📄", "Слов:", &words.to_string()));
                lines.push(self.row("🕑", "До:", &format!("{max_minutes} минут")));
                lines.push(self.row("🎯", "Оптимальный хронометраж:", optimal_timing));
            }
            QuoteVolume::Minutes { minutes } => {
                lines.push(self.row("🕑", "До:", &format!("{minutes} минут")));
            }
            QuoteVolume::Characters { chars } => {
                lines.push(self.row("📝", "Знаков без пробелов:", &chars.to_string()));
            }
        }

        lines.push(self.row("⏰", "Срок выполнения:", &quote.deadline.days));
        lines.push(self.row("📅", "Дедлайн:", &quote.deadline.date));
        lines.push(self.row("💰", "Стоимость:", &self.green(&quote.price_line())));

        lines.join("\n")
    }

    fn row(&self, icon: &str, label: &str, value: &str) -> String {
        let padding = LABEL_WIDTH.saturating_sub(label.chars().count());
        format!("{icon} {label}{} {value}", " ".repeat(padding))
    }

    /// Formats a failure, with the hint to retry when `retry_hint` is set.
    pub fn format_error(&self, message: &str, retry_hint: bool) -> String {
        let mut out = self.red(message);
        if retry_hint {
            out.push('\n');
            out.push_str(&self.dim("Введите retry, чтобы попробовать ещё раз."));
        }
        out
    }

    /// Formats a rejected input.
    pub fn format_validation(&self, message: &str) -> String {
        self.yellow(message)
    }

    /// Formats the progress line of a running calculation.
    pub fn format_loading(&self, message: &str) -> String {
        self.dim(message)
    }

    /// Formats service list header.
    pub fn format_services_header(&self) -> String {
        format!(
            "{:<17} {:<26} {:<11} {}",
            self.bold("Service"),
            self.bold("Title"),
            self.bold("Unit"),
            self.bold("Files")
        )
    }

    /// Formats a single service line.
    pub fn format_service_line(&self, service: ServiceKind) -> String {
        let files = if service.accepts_documents() {
            self.green("✓")
        } else {
            self.dim("−")
        };

        format!(
            "{:<17} {:<26} {:<11} {}",
            self.cyan(service.wire_name()),
            service.title(),
            format!("{:?}", service.unit()).to_lowercase(),
            files
        )
    }

    /// Formats the placeholder and tip of a service.
    pub fn format_service_hint(&self, service: ServiceKind) -> String {
        format!(
            "{}\n{}",
            self.bold(service.placeholder()),
            self.dim(service.tip())
        )
    }

    /// Formats the ping result.
    pub fn format_ping(&self, base_url: &str, status: Option<u16>, elapsed_ms: u128) -> String {
        match status {
            Some(status) if (200..300).contains(&status) => format!(
                "{} {base_url} answered HTTP {status} in {elapsed_ms} ms",
                self.green("✓")
            ),
            Some(status) => format!(
                "{} {base_url} is awake but answered HTTP {status} in {elapsed_ms} ms",
                self.yellow("!")
            ),
            None => format!(
                "{} {base_url} did not answer within {elapsed_ms} ms",
                self.red("✗")
            ),
        }
    }

    // ========================================================================
    // Color/style helpers
    // ========================================================================

    fn paint(&self, code: &str, text: &str) -> String {
        if self.use_colors {
            format!("{code}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn bold(&self, text: &str) -> String {
        self.paint(BOLD, text)
    }

    fn dim(&self, text: &str) -> String {
        self.paint(DIM, text)
    }

    fn green(&self, text: &str) -> String {
        self.paint(GREEN, text)
    }

    fn yellow(&self, text: &str) -> String {
        self.paint(YELLOW, text)
    }

    fn red(&self, text: &str) -> String {
        self.paint(RED, text)
    }

    fn cyan(&self, text: &str) -> String {
        self.paint(CYAN, text)
    }
}
