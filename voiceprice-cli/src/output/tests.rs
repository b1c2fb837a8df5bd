//! CLI output formatting tests.
//!
//! These tests verify that quotes, failures and service listings are
//! formatted correctly in both text and JSON output modes.

use voiceprice_core::{Deadline, Quote, QuoteVolume, ServiceKind};

fn narration_quote(urgent: bool) -> Quote {
    Quote {
        service: ServiceKind::VoiceText,
        title: ServiceKind::VoiceText.title().to_string(),
        urgent,
        volume: QuoteVolume::Words {
            words: 240,
            max_minutes: 2,
            optimal_timing: "1:48".to_string(),
        },
        deadline: Deadline {
            days: "до 2 дней".to_string(),
            date: "21.10.2026".to_string(),
        },
        price_rub: 900.0,
        price_rub_urgent: urgent.then_some(950.0),
    }
}

fn translation_quote() -> Quote {
    Quote {
        service: ServiceKind::TranslateText,
        title: ServiceKind::TranslateText.title().to_string(),
        urgent: false,
        volume: QuoteVolume::Characters { chars: 1800 },
        deadline: Deadline {
            days: "1 день".to_string(),
            date: "20.10.2026".to_string(),
        },
        price_rub: 720.0,
        price_rub_urgent: None,
    }
}

mod text_formatter_tests {
    use super::super::text::TextFormatter;
    use super::*;

    #[test]
    fn test_format_narration_quote() {
        let formatter = TextFormatter::new(false);
        let output = formatter.format_quote(&narration_quote(false));

        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 7);
        assert!(lines[0].starts_with("📦 Услуга:"));
        assert!(lines[0].ends_with("Озвучка текста"));
        assert!(lines[1].ends_with(" 240"));
        assert!(lines[2].ends_with("2 минут"));
        assert!(lines[3].ends_with("1:48"));
        assert!(lines[4].ends_with("до 2 дней"));
        assert!(lines[5].ends_with("21.10.2026"));
        assert!(lines[6].starts_with("💰 Стоимость:"));
        assert!(lines[6].ends_with("900 ₽"));
    }

    #[test]
    fn test_format_urgent_quote() {
        let formatter = TextFormatter::new(false);
        let output = formatter.format_quote(&narration_quote(true));

        assert!(output.contains("Озвучка текста (СРОЧНО)"));
        assert!(output.contains("900 ₽ ➡️ 950 ₽"));
    }

    #[test]
    fn test_format_translation_quote() {
        let formatter = TextFormatter::new(false);
        let output = formatter.format_quote(&translation_quote());

        assert!(output.contains("Знаков без пробелов:"));
        assert!(output.contains("1800"));
        assert!(!output.contains("Оптимальный хронометраж"));
    }

    #[test]
    fn test_labels_are_aligned() {
        let formatter = TextFormatter::new(false);
        let output = formatter.format_quote(&narration_quote(false));

        let value_columns: Vec<usize> = output
            .lines()
            .map(|line| {
                let (_, rest) = line.split_once(' ').unwrap();
                let label_end = rest.find(':').unwrap();
                let value_start = rest[label_end + 1..]
                    .find(|c: char| c != ' ')
                    .unwrap();
                rest[..=label_end].chars().count() + value_start
            })
            .collect();

        assert!(value_columns.windows(2).all(|pair| pair[0] == pair[1]));
    }

    #[test]
    fn test_no_colors_when_disabled() {
        let formatter = TextFormatter::new(false);
        let output = formatter.format_quote(&narration_quote(false));
        assert!(!output.contains('\x1b'));
    }

    #[test]
    fn test_colors_when_enabled() {
        let formatter = TextFormatter::new(true);
        let output = formatter.format_quote(&narration_quote(false));
        assert!(output.contains("\x1b[32m"));
    }

    #[test]
    fn test_format_error_with_retry_hint() {
        let formatter = TextFormatter::new(false);

        let interactive = formatter.format_error("Ошибка: HTTP 502", true);
        assert!(interactive.starts_with("Ошибка: HTTP 502"));
        assert!(interactive.contains("retry"));

        let one_shot = formatter.format_error("Ошибка: HTTP 502", false);
        assert_eq!(one_shot, "Ошибка: HTTP 502");
    }

    #[test]
    fn test_format_service_line() {
        let formatter = TextFormatter::new(false);

        let line = formatter.format_service_line(ServiceKind::VoiceVideo);
        assert!(line.starts_with("voice_video"));
        assert!(line.contains("Озвучка видео"));
        assert!(line.contains("minutes"));
        assert!(line.ends_with('−'));

        let line = formatter.format_service_line(ServiceKind::TranslateText);
        assert!(line.contains("characters"));
        assert!(line.ends_with('✓'));
    }

    #[test]
    fn test_format_ping() {
        let formatter = TextFormatter::new(false);

        assert!(formatter
            .format_ping("http://localhost", Some(200), 42)
            .contains("answered HTTP 200 in 42 ms"));
        assert!(formatter
            .format_ping("http://localhost", Some(405), 42)
            .contains("awake"));
        assert!(formatter
            .format_ping("http://localhost", None, 10_000)
            .contains("did not answer"));
    }
}

mod json_formatter_tests {
    use super::super::json::{JsonFormatter, PingOutput};
    use super::*;

    #[test]
    fn test_format_quote_flattens_fields() {
        let formatter = JsonFormatter::new(false);
        let json = formatter.format_quote(&narration_quote(true)).unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["service"], "voice_text");
        assert_eq!(parsed["urgent"], true);
        assert_eq!(parsed["volume"]["unit"], "words");
        assert_eq!(parsed["volume"]["words"], 240);
        assert_eq!(parsed["deadline"]["days"], "до 2 дней");
        assert_eq!(parsed["price_rub_urgent"], 950.0);
        assert_eq!(parsed["price_text"], "900 ₽ ➡️ 950 ₽");
    }

    #[test]
    fn test_format_error() {
        let formatter = JsonFormatter::new(false);
        let json = formatter.format_error("Введите корректное значение.", false).unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["error"], "Введите корректное значение.");
        assert_eq!(parsed["retryable"], false);
    }

    #[test]
    fn test_format_services() {
        let formatter = JsonFormatter::new(false);
        let json = formatter.format_services(ServiceKind::all()).unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        let services = parsed.as_array().unwrap();
        assert_eq!(services.len(), ServiceKind::all().len());
        assert_eq!(services[0]["id"], "voice_text");
        assert_eq!(services[0]["acceptsDocuments"], true);
    }

    #[test]
    fn test_ping_output_skips_missing_fields() {
        let formatter = JsonFormatter::new(false);
        let json = formatter
            .format(&PingOutput {
                base_url: "http://localhost",
                reachable: true,
                status: Some(200),
                elapsed_ms: 12,
                error: None,
            })
            .unwrap();

        assert!(json.contains("\"baseUrl\":\"http://localhost\""));
        assert!(json.contains("\"elapsedMs\":12"));
        assert!(!json.contains("error"));
    }

    #[test]
    fn test_pretty_output() {
        let formatter = JsonFormatter::new(true);
        let json = formatter.format_quote(&translation_quote()).unwrap();
        assert!(json.contains('\n'));
        assert!(json.contains("  "));
    }
}
