//! Integration tests for quote presentation.

use voiceprice_core::{
    CalculationRequest, CalculationResult, Deadline, Quantity, Quote, QuoteVolume, ServiceKind,
    optimal_timing, seconds_to_time,
};

#[test]
fn test_voice_text_240_words_end_to_end() {
    let quantity = Quantity::parse_input("240").unwrap();
    let request = CalculationRequest::new(ServiceKind::VoiceText, quantity, false);

    let body = serde_json::to_value(request.to_payload()).unwrap();
    assert_eq!(body["text"], "240");

    let result: CalculationResult = serde_json::from_str(
        r#"{
            "word_count": 240,
            "deadline": "1 day (до 01.01.2025 включительно)",
            "deadline_urgent": "1 day (до 01.01.2025 включительно)",
            "price_rub": 960,
            "price_rub_urgent": 1440
        }"#,
    )
    .unwrap();

    let quote = Quote::build(&request, &result);
    let QuoteVolume::Words {
        words,
        max_minutes,
        optimal_timing: timing,
    } = &quote.volume
    else {
        panic!("expected a word-based quote");
    };

    assert_eq!(*words, 240);
    assert_eq!(*max_minutes, 2);
    // round(240 * 60 / 133) = 108 seconds
    assert_eq!(*timing, seconds_to_time(108));
    assert_eq!(quote.deadline.days, "1 день");
    assert_eq!(quote.price_line(), "960 ₽");
}

#[test]
fn test_deadline_examples() {
    let three = Deadline::parse("3 days (до 01.01.2025 включительно)");
    assert_eq!((three.days.as_str(), three.date.as_str()), ("до 3 дней", "01.01.2025"));

    let one = Deadline::parse("1 day (до 01.01.2025 включительно)");
    assert_eq!(one.days, "1 день");
}

#[test]
fn test_optimal_timing_rounds_half_up() {
    // 133 words * 60 / 133 = 60 seconds exactly
    assert_eq!(optimal_timing(133), "1:00");
    // 1 word -> 0.45s -> 0
    assert_eq!(optimal_timing(1), "0:00");
    // 3 words -> 1.35s -> 1
    assert_eq!(optimal_timing(3), "0:01");
}
