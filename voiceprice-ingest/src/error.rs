//! Ingestion error types.

use thiserror::Error;

use crate::kind::DocumentKind;

/// Errors that can occur while turning a file into text.
///
/// All of them are recoverable: the session stays usable and the visitor
/// may pick another file.
#[derive(Debug, Error)]
pub enum IngestError {
    /// The file is neither plain text nor a word-processor document.
    #[error("Unsupported document type: {0}")]
    UnsupportedType(String),

    /// The file could not be read.
    #[error("Failed to read {kind} file: {source}")]
    Read {
        /// Declared kind of the file.
        kind: DocumentKind,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Text could not be extracted from a document.
    #[error("Extraction failed: {0}")]
    Extraction(String),
}

impl IngestError {
    /// Returns the message shown to the visitor.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::UnsupportedType(_) => "Поддерживаются только .txt и .docx",
            Self::Read {
                kind: DocumentKind::PlainText,
                ..
            } => "Не удалось прочитать .txt файл.",
            Self::Read {
                kind: DocumentKind::WordDocument,
                ..
            } => "Не удалось прочитать .docx файл.",
            Self::Extraction(_) => "Не удалось извлечь текст из .docx файла.",
        }
    }
}

impl From<zip::result::ZipError> for IngestError {
    fn from(err: zip::result::ZipError) -> Self {
        Self::Extraction(err.to_string())
    }
}

impl From<quick_xml::Error> for IngestError {
    fn from(err: quick_xml::Error) -> Self {
        Self::Extraction(err.to_string())
    }
}
