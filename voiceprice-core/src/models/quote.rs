//! Presentation model for a computed price.
//!
//! A [`Quote`] combines the request the visitor made with the backend's
//! [`CalculationResult`] into exactly what the result area shows.

use serde::{Deserialize, Serialize};

use super::calculation::{CalculationRequest, CalculationResult};
use super::deadline::Deadline;
use super::service::{QuantityUnit, ServiceKind};

/// Narration speed used for the upper bound on minutes.
pub const MAX_WORDS_PER_MINUTE: u64 = 120;

/// Narration speed used for the optimal timing.
pub const OPTIMAL_WORDS_PER_MINUTE: u64 = 133;

// ============================================================================
// Quote
// ============================================================================

/// A rendered price quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    /// Quoted service.
    pub service: ServiceKind,
    /// Human-readable service title.
    pub title: String,
    /// Whether the urgent surcharge was requested.
    pub urgent: bool,
    /// Volume rows, depending on the service unit.
    pub volume: QuoteVolume,
    /// Turnaround and deadline date.
    pub deadline: Deadline,
    /// Regular price in roubles.
    pub price_rub: f64,
    /// Urgent price in roubles, present only for urgent quotes.
    pub price_rub_urgent: Option<f64>,
}

/// Volume information shown for a quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "unit", rename_all = "snake_case")]
pub enum QuoteVolume {
    /// Text narration.
    Words {
        /// Word count.
        words: u64,
        /// Upper bound on the recording length in minutes.
        max_minutes: u64,
        /// Optimal recording length as `M:SS`.
        optimal_timing: String,
    },
    /// Video work.
    Minutes {
        /// Video length in minutes.
        minutes: u64,
    },
    /// Text translation.
    Characters {
        /// Characters without spaces.
        chars: u64,
    },
}

impl Quote {
    /// Builds a quote from the request and the backend result.
    ///
    /// For word-based services the word count echoed by the backend wins;
    /// the requested quantity is used when the backend omits it.
    pub fn build(request: &CalculationRequest, result: &CalculationResult) -> Self {
        let quantity = request.quantity.get();

        let volume = match request.service.unit() {
            QuantityUnit::Words => {
                let words = result.word_count.unwrap_or(quantity);
                QuoteVolume::Words {
                    words,
                    max_minutes: max_minutes(words),
                    optimal_timing: optimal_timing(words),
                }
            }
            QuantityUnit::Minutes => QuoteVolume::Minutes { minutes: quantity },
            QuantityUnit::Characters => QuoteVolume::Characters { chars: quantity },
        };

        Self {
            service: request.service,
            title: request.service.title().to_string(),
            urgent: request.urgent,
            volume,
            deadline: Deadline::parse(result.deadline_for(request.urgent)),
            price_rub: result.price_rub,
            price_rub_urgent: request.urgent.then_some(result.price_rub_urgent),
        }
    }

    /// Returns the service line, e.g. `"Озвучка текста (СРОЧНО)"`.
    pub fn service_line(&self) -> String {
        if self.urgent {
            format!("{} (СРОЧНО)", self.title)
        } else {
            self.title.clone()
        }
    }

    /// Returns the price line, showing the surcharge for urgent quotes.
    pub fn price_line(&self) -> String {
        match self.price_rub_urgent {
            Some(urgent) => format!(
                "{} ₽ ➡️ {} ₽",
                format_rub(self.price_rub),
                format_rub(urgent)
            ),
            None => format!("{} ₽", format_rub(self.price_rub)),
        }
    }
}

// ============================================================================
// Formatting Helpers
// ============================================================================

/// Upper bound on narration minutes: `ceil(words / 120)`.
pub fn max_minutes(words: u64) -> u64 {
    words.div_ceil(MAX_WORDS_PER_MINUTE)
}

/// Optimal narration timing: `round(words * 60 / 133)` seconds as `M:SS`.
pub fn optimal_timing(words: u64) -> String {
    #[allow(clippy::cast_precision_loss)]
    let seconds = (words as f64 * 60.0 / OPTIMAL_WORDS_PER_MINUTE as f64).round();
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let seconds = seconds as u64;
    seconds_to_time(seconds)
}

/// Formats seconds as `M:SS`.
pub fn seconds_to_time(seconds: u64) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Formats a rouble amount the way the `ru-RU` locale does.
///
/// Thousands are separated by a no-break space, the decimal separator is a
/// comma and at most three fraction digits are kept.
pub fn format_rub(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let scaled = (value.abs() * 1000.0).round() as u64;
    let integer = scaled / 1000;
    let fraction = scaled % 1000;

    let digits = integer.to_string();
    let mut out = String::with_capacity(digits.len() + 8);
    if value < 0.0 && scaled > 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('\u{a0}');
        }
        out.push(ch);
    }

    if fraction > 0 {
        let fraction = format!("{fraction:03}");
        out.push(',');
        out.push_str(fraction.trim_end_matches('0'));
    }

    out
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::service::Quantity;

    fn result(word_count: Option<u64>) -> CalculationResult {
        CalculationResult {
            word_count,
            deadline: "3 days (до 01.01.2025 включительно)".to_string(),
            deadline_urgent: "1 day (до 30.12.2024 включительно)".to_string(),
            price_rub: 1200.0,
            price_rub_urgent: 1800.5,
        }
    }

    #[test]
    fn test_voice_text_quote() {
        let request =
            CalculationRequest::new(ServiceKind::VoiceText, Quantity::new(240).unwrap(), false);
        let quote = Quote::build(&request, &result(Some(240)));

        assert_eq!(
            quote.volume,
            QuoteVolume::Words {
                words: 240,
                max_minutes: 2,
                optimal_timing: "1:48".to_string(),
            }
        );
        assert_eq!(quote.deadline.days, "до 3 дней");
        assert_eq!(quote.deadline.date, "01.01.2025");
        assert_eq!(quote.service_line(), "Озвучка текста");
        assert_eq!(quote.price_line(), "1\u{a0}200 ₽");
    }

    #[test]
    fn test_urgent_quote_uses_urgent_deadline() {
        let request =
            CalculationRequest::new(ServiceKind::VoiceCamera, Quantity::new(10).unwrap(), true);
        let quote = Quote::build(&request, &result(None));

        assert_eq!(quote.deadline.days, "1 день");
        assert_eq!(quote.service_line(), "Озвучка текста на камеру (СРОЧНО)");
        assert_eq!(quote.price_line(), "1\u{a0}200 ₽ ➡️ 1\u{a0}800,5 ₽");
        // Falls back to the requested quantity without an echoed word count.
        assert!(matches!(quote.volume, QuoteVolume::Words { words: 10, .. }));
    }

    #[test]
    fn test_minutes_and_characters() {
        let video =
            CalculationRequest::new(ServiceKind::VoiceVideo, Quantity::new(7).unwrap(), false);
        assert_eq!(
            Quote::build(&video, &result(None)).volume,
            QuoteVolume::Minutes { minutes: 7 }
        );

        let translate =
            CalculationRequest::new(ServiceKind::TranslateText, Quantity::new(1800).unwrap(), false);
        assert_eq!(
            Quote::build(&translate, &result(None)).volume,
            QuoteVolume::Characters { chars: 1800 }
        );
    }

    #[test]
    fn test_seconds_to_time() {
        assert_eq!(seconds_to_time(0), "0:00");
        assert_eq!(seconds_to_time(59), "0:59");
        assert_eq!(seconds_to_time(108), "1:48");
        assert_eq!(seconds_to_time(3605), "60:05");
    }

    #[test]
    fn test_max_minutes() {
        assert_eq!(max_minutes(1), 1);
        assert_eq!(max_minutes(120), 1);
        assert_eq!(max_minutes(121), 2);
        assert_eq!(max_minutes(240), 2);
    }

    #[test]
    fn test_format_rub() {
        assert_eq!(format_rub(0.0), "0");
        assert_eq!(format_rub(950.0), "950");
        assert_eq!(format_rub(1234567.0), "1\u{a0}234\u{a0}567");
        assert_eq!(format_rub(1500.25), "1\u{a0}500,25");
        assert_eq!(format_rub(0.12345), "0,123");
        assert_eq!(format_rub(-2500.0), "-2\u{a0}500");
    }
}
