//! Backend endpoint URLs.

use url::Url;
use voiceprice_core::QuantityUnit;

use crate::error::FetchError;

/// Default pricing backend.
pub const DEFAULT_BASE_URL: &str = "https://telegram-voicebot.onrender.com";

/// Resolved URLs of the pricing backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    base: Url,
}

impl Endpoints {
    /// Creates endpoints under the given base URL.
    ///
    /// A base with a path (`https://host/api`) keeps it: endpoints resolve
    /// to `https://host/api/calculate`.
    pub fn new(base: &str) -> Result<Self, FetchError> {
        let mut base = Url::parse(base).map_err(|e| FetchError::InvalidUrl(e.to_string()))?;
        if base.cannot_be_a_base() {
            return Err(FetchError::InvalidUrl(format!("{base} cannot be a base URL")));
        }
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Ok(Self { base })
    }

    /// Returns the base URL.
    pub fn base(&self) -> &str {
        self.base.as_str()
    }

    /// `POST /calculate`, also the keep-warm target.
    pub fn calculate(&self) -> String {
        self.join("calculate")
    }

    /// `POST /count_words`.
    pub fn count_words(&self) -> String {
        self.join("count_words")
    }

    /// `POST /count_chars`.
    pub fn count_chars(&self) -> String {
        self.join("count_chars")
    }

    /// Returns the counting endpoint for a unit, if the unit can be counted.
    pub fn count_for(&self, unit: QuantityUnit) -> Option<String> {
        unit.count_endpoint().map(|path| self.join(path))
    }

    fn join(&self, path: &str) -> String {
        self.base
            .join(path)
            .map_or_else(|_| format!("{}{path}", self.base), String::from)
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            base: Url::parse(&format!("{DEFAULT_BASE_URL}/")).unwrap_or_else(|e| {
                panic!("Built-in base URL {DEFAULT_BASE_URL} is invalid: {e}")
            }),
        }
    }
}
