//! Plain-text decoding.
//!
//! Files are read as UTF-8 first. A result that contains the replacement
//! character, or is shorter than [`MIN_PLAUSIBLE_CHARS`], is treated as a
//! mis-decoded legacy file and decoded again as Windows-1251.

use encoding_rs::{UTF_8, WINDOWS_1251};
use tracing::debug;

/// Decoded texts shorter than this are re-decoded as Windows-1251.
pub const MIN_PLAUSIBLE_CHARS: usize = 100;

/// Result of decoding a plain-text file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedText {
    /// The decoded text.
    pub text: String,
    /// Whether the Windows-1251 fallback was used.
    pub recovered_encoding: bool,
}

/// Decodes plain-text bytes, falling back to Windows-1251.
pub fn decode_plain_text(bytes: &[u8]) -> DecodedText {
    let (utf8, _) = UTF_8.decode_with_bom_removal(bytes);

    if !looks_misdecoded(&utf8) {
        return DecodedText {
            text: utf8.into_owned(),
            recovered_encoding: false,
        };
    }

    let (legacy, _) = WINDOWS_1251.decode_without_bom_handling(bytes);
    debug!(
        bytes = bytes.len(),
        chars = legacy.chars().count(),
        "Re-decoded plain text as Windows-1251"
    );
    DecodedText {
        text: legacy.into_owned(),
        recovered_encoding: true,
    }
}

fn looks_misdecoded(text: &str) -> bool {
    text.contains(char::REPLACEMENT_CHARACTER) || text.chars().count() < MIN_PLAUSIBLE_CHARS
}

#[cfg(test)]
mod tests {
    use super::*;

    fn long_russian() -> String {
        "Съешь же ещё этих мягких французских булок, да выпей чаю. ".repeat(4)
    }

    #[test]
    fn test_utf8_kept() {
        let text = long_russian();
        let decoded = decode_plain_text(text.as_bytes());
        assert_eq!(decoded.text, text);
        assert!(!decoded.recovered_encoding);
    }

    #[test]
    fn test_bom_stripped() {
        let text = long_russian();
        let mut bytes = vec![0xEF, 0xBB, 0xBF];
        bytes.extend_from_slice(text.as_bytes());
        assert_eq!(decode_plain_text(&bytes).text, text);
    }

    #[test]
    fn test_windows_1251_recovered() {
        let text = long_russian();
        let (bytes, _, _) = WINDOWS_1251.encode(&text);

        let decoded = decode_plain_text(&bytes);

        assert!(decoded.recovered_encoding);
        assert_eq!(decoded.text, text);
        assert!(!decoded.text.contains(char::REPLACEMENT_CHARACTER));
    }

    #[test]
    fn test_short_text_redecoded() {
        let decoded = decode_plain_text(b"hello world");
        assert!(decoded.recovered_encoding);
        assert_eq!(decoded.text, "hello world");
    }

    #[test]
    fn test_empty_input() {
        let decoded = decode_plain_text(b"");
        assert!(decoded.text.is_empty());
    }
}
