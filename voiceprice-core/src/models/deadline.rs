//! Deadline parsing.
//!
//! The backend answers with strings like `"3 days (до 01.01.2025 включительно)"`.
//! Only the leading day count and the date are shown to the visitor.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static DEADLINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.+?) \(до (.+?) включительно\)$").expect("valid deadline regex")
});

static LEADING_INT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*([+-]?[0-9]+)").expect("valid integer regex"));

/// A deadline split into its display parts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deadline {
    /// Turnaround label, e.g. `"до 3 дней"` or `"1 день"`.
    pub days: String,
    /// Inclusive deadline date as sent by the backend.
    pub date: String,
}

impl Deadline {
    /// Parses a backend deadline string.
    ///
    /// Strings not following the `"<N> days (до <date> включительно)"`
    /// pattern yield empty parts instead of an error.
    pub fn parse(raw: &str) -> Self {
        let Some(caps) = DEADLINE_RE.captures(raw) else {
            return Self::default();
        };

        let period = caps.get(1).map_or("", |m| m.as_str());
        let date = caps.get(2).map_or("", |m| m.as_str());

        let days = match leading_int(period) {
            Some(1) => "1 день".to_string(),
            Some(n) => format!("до {n} дней"),
            None => format!("до {period}"),
        };

        Self {
            days,
            date: date.to_string(),
        }
    }

    /// Returns true if nothing could be parsed.
    pub fn is_empty(&self) -> bool {
        self.days.is_empty() && self.date.is_empty()
    }
}

/// Leading integer of `s`, after optional whitespace and sign.
pub(crate) fn leading_int(s: &str) -> Option<i64> {
    LEADING_INT_RE
        .captures(s)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}
