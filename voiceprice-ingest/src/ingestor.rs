//! File-to-text ingestion.

use std::path::Path;
use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::decode::decode_plain_text;
use crate::docx::{DocxExtractor, TextExtractor};
use crate::error::IngestError;
use crate::kind::DocumentKind;

/// Text obtained from an uploaded file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestedText {
    /// Kind of the source file.
    pub kind: DocumentKind,
    /// Extracted text.
    pub text: String,
    /// Whether the Windows-1251 fallback was used.
    pub recovered_encoding: bool,
}

impl IngestedText {
    /// Whether the text contains anything besides whitespace.
    pub fn has_content(&self) -> bool {
        !self.text.trim().is_empty()
    }
}

/// Turns `.txt` and `.docx` files into text.
#[derive(Clone)]
pub struct Ingestor {
    extractor: Arc<dyn TextExtractor>,
}

impl Ingestor {
    /// Creates an ingestor with the built-in `.docx` extractor.
    pub fn new() -> Self {
        Self::with_extractor(Arc::new(DocxExtractor::new()))
    }

    /// Creates an ingestor with a custom document extractor.
    pub fn with_extractor(extractor: Arc<dyn TextExtractor>) -> Self {
        Self { extractor }
    }

    /// Reads a file from disk and extracts its text.
    pub async fn ingest_path(&self, path: &Path) -> Result<IngestedText, IngestError> {
        self.ingest_path_as(path, None).await
    }

    /// Reads a file whose type may have been declared by the uploader.
    ///
    /// See [`DocumentKind::detect`] for how the type is chosen.
    #[instrument(skip(self), fields(path = %path.display()))]
    pub async fn ingest_path_as(
        &self,
        path: &Path,
        declared_mime: Option<&str>,
    ) -> Result<IngestedText, IngestError> {
        let kind = DocumentKind::detect(path, declared_mime).ok_or_else(|| {
            IngestError::UnsupportedType(
                declared_mime.map_or_else(|| path.display().to_string(), str::to_string),
            )
        })?;

        let bytes = tokio::fs::read(path).await.map_err(|source| {
            warn!(error = %source, "Failed to read file");
            IngestError::Read { kind, source }
        })?;

        let ingested = self.ingest_bytes(kind, &bytes)?;
        info!(
            mime = kind.mime(),
            chars = ingested.text.chars().count(),
            recovered_encoding = ingested.recovered_encoding,
            "Ingested file"
        );
        Ok(ingested)
    }

    /// Extracts text from bytes of a known kind.
    pub fn ingest_bytes(&self, kind: DocumentKind, bytes: &[u8]) -> Result<IngestedText, IngestError> {
        match kind {
            DocumentKind::PlainText => {
                let decoded = decode_plain_text(bytes);
                Ok(IngestedText {
                    kind,
                    text: decoded.text,
                    recovered_encoding: decoded.recovered_encoding,
                })
            }
            DocumentKind::WordDocument => Ok(IngestedText {
                kind,
                text: self.extractor.extract(bytes)?,
                recovered_encoding: false,
            }),
        }
    }
}

impl Default for Ingestor {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Ingestor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ingestor").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docx::tests::docx_with_body;

    struct FailingExtractor;

    impl TextExtractor for FailingExtractor {
        fn extract(&self, _bytes: &[u8]) -> Result<String, IngestError> {
            Err(IngestError::Extraction("broken".to_string()))
        }
    }

    #[test]
    fn test_ingest_docx_bytes() {
        let bytes = docx_with_body("<w:p><w:r><w:t>раз два три</w:t></w:r></w:p>");

        let ingested = Ingestor::new()
            .ingest_bytes(DocumentKind::WordDocument, &bytes)
            .unwrap();

        assert_eq!(ingested.text, "раз два три");
        assert!(ingested.has_content());
        assert!(!ingested.recovered_encoding);
    }

    #[tokio::test]
    async fn test_declared_mime_overrides_extension() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("upload.bin");
        std::fs::write(&path, "plain words").unwrap();

        let ingested = Ingestor::new()
            .ingest_path_as(&path, Some("text/plain; charset=utf-8"))
            .await
            .unwrap();
        assert_eq!(ingested.kind, DocumentKind::PlainText);
        assert_eq!(ingested.text, "plain words");

        let err = Ingestor::new().ingest_path(&path).await.unwrap_err();
        assert!(matches!(err, IngestError::UnsupportedType(_)));
    }

    #[test]
    fn test_custom_extractor_errors_propagate() {
        let ingestor = Ingestor::with_extractor(Arc::new(FailingExtractor));

        let err = ingestor
            .ingest_bytes(DocumentKind::WordDocument, b"")
            .unwrap_err();

        assert_eq!(err.user_message(), "Не удалось извлечь текст из .docx файла.");
    }

    #[test]
    fn test_whitespace_only_has_no_content() {
        let ingested = Ingestor::new()
            .ingest_bytes(DocumentKind::PlainText, b" \n\t ")
            .unwrap();
        assert!(!ingested.has_content());
    }
}
