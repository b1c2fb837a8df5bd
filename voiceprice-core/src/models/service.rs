//! Service-related types.
//!
//! - [`ServiceKind`] - Enum of the offered services
//! - [`QuantityUnit`] - What a quantity measures for a service
//! - [`Quantity`] - Validated positive quantity

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::models::deadline::leading_int;

// ============================================================================
// Service Kind
// ============================================================================

/// Services the pricing backend can quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ServiceKind {
    /// Voice-over of a text.
    #[default]
    VoiceText,
    /// Voice-over of a video.
    VoiceVideo,
    /// Translation of a text.
    TranslateText,
    /// Translation plus voice-over of a video.
    TranslateVoice,
    /// On-camera reading of a text.
    VoiceCamera,
}

impl ServiceKind {
    /// Returns all service kinds in menu order.
    pub fn all() -> &'static [ServiceKind] {
        &[
            Self::VoiceText,
            Self::VoiceVideo,
            Self::TranslateText,
            Self::TranslateVoice,
            Self::VoiceCamera,
        ]
    }

    /// Returns the wire name used by the backend.
    pub fn wire_name(&self) -> &'static str {
        match self {
            Self::VoiceText => "voice_text",
            Self::VoiceVideo => "voice_video",
            Self::TranslateText => "translate_text",
            Self::TranslateVoice => "translate_voice",
            Self::VoiceCamera => "voice_camera",
        }
    }

    /// Returns the title shown in a rendered quote.
    pub fn title(&self) -> &'static str {
        match self {
            Self::VoiceText => "Озвучка текста",
            Self::VoiceVideo => "Озвучка видео",
            Self::TranslateText => "Перевод текста",
            Self::TranslateVoice => "Перевод + озвучка видео",
            Self::VoiceCamera => "Озвучка текста на камеру",
        }
    }

    /// Returns the unit a quantity is measured in for this service.
    pub fn unit(&self) -> QuantityUnit {
        match self {
            Self::VoiceText | Self::VoiceCamera => QuantityUnit::Words,
            Self::VoiceVideo | Self::TranslateVoice => QuantityUnit::Minutes,
            Self::TranslateText => QuantityUnit::Characters,
        }
    }

    /// Returns true if a document can be uploaded to count the quantity.
    pub fn accepts_documents(&self) -> bool {
        self.unit() != QuantityUnit::Minutes
    }

    /// Returns the input placeholder for the quantity field.
    pub fn placeholder(&self) -> &'static str {
        match self.unit() {
            QuantityUnit::Words => "Введите количество слов",
            QuantityUnit::Minutes => "Введите длительность видео (минуты)",
            QuantityUnit::Characters => "Введите количество знаков без пробелов",
        }
    }

    /// Returns the help tip shown next to the calculator.
    pub fn tip(&self) -> &'static str {
        match self {
            Self::VoiceText => {
                "Загрузите txt или docx, или укажите точное количество слов для озвучки. \
                 Все числа, сокращения и единицы должны быть записаны полностью, так, \
                 как вы хотите, чтобы их произнесли. Например: 32 м - тридцать два метра"
            }
            Self::VoiceVideo | Self::TranslateVoice => {
                "Длительность видео необходимо вводить с округлением в большую сторону. \
                 6 минут 3 секунды => 7 минут"
            }
            Self::TranslateText => {
                "Введите количество знаков без пробелов или перетяните сюда текстовый \
                 документ (txt, docx) для точного расчета."
            }
            Self::VoiceCamera => {
                "Загрузите txt или docx, или укажите точное количество слов для озвучки. \
                 Все числа, сокращения и единицы должны быть записаны полностью, так, \
                 как вы хотите, чтобы их произнесли. Например: 120 км → сто двадцать километров."
            }
        }
    }
}

impl fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

impl FromStr for ServiceKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Self::all()
            .iter()
            .copied()
            .find(|kind| kind.wire_name().eq_ignore_ascii_case(name))
            .ok_or_else(|| CoreError::UnknownService(name.to_string()))
    }
}

// ============================================================================
// Quantity Unit
// ============================================================================

/// What a quantity counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuantityUnit {
    /// Words in a text.
    Words,
    /// Video duration in whole minutes.
    Minutes,
    /// Characters without spaces.
    Characters,
}

impl QuantityUnit {
    /// Returns the backend counting endpoint for this unit, if it has one.
    pub fn count_endpoint(&self) -> Option<&'static str> {
        match self {
            Self::Words => Some("count_words"),
            Self::Characters => Some("count_chars"),
            Self::Minutes => None,
        }
    }

    /// Returns the row label used when rendering this unit.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Words => "Слов",
            Self::Minutes => "До",
            Self::Characters => "Знаков без пробелов",
        }
    }
}

// ============================================================================
// Quantity
// ============================================================================

/// A validated, strictly positive quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct Quantity(pub(crate) u64);

impl Quantity {
    /// Creates a quantity, rejecting zero.
    pub fn new(value: u64) -> Result<Self, CoreError> {
        if value == 0 {
            return Err(CoreError::InvalidQuantity(value.to_string()));
        }
        Ok(Self(value))
    }

    /// Returns the raw value.
    pub fn get(self) -> u64 {
        self.0
    }

    /// Parses user input leniently.
    ///
    /// Leading whitespace and an optional sign are skipped and the leading
    /// run of digits is used, so `"240 слов"` parses as 240. Input without
    /// leading digits, zero and negative numbers are rejected.
    pub fn parse_input(input: &str) -> Result<Self, CoreError> {
        let invalid = || CoreError::InvalidQuantity(input.to_string());

        let value = leading_int(input)
            .and_then(|value| u64::try_from(value).ok())
            .ok_or_else(invalid)?;
        Self::new(value).map_err(|_| invalid())
    }
}

impl TryFrom<u64> for Quantity {
    type Error = CoreError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Quantity> for u64 {
    fn from(quantity: Quantity) -> Self {
        quantity.0
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Tests
// ============================================================================
