//! Text extraction from word-processor documents.

use std::io::{Cursor, Read};

use quick_xml::Reader;
use quick_xml::events::Event;
use tracing::debug;
use zip::ZipArchive;

use crate::error::IngestError;

/// Path of the main body part inside a `.docx` container.
const DOCUMENT_PART: &str = "word/document.xml";

/// Turns document bytes into raw text.
pub trait TextExtractor: Send + Sync {
    /// Extracts the text of the document.
    fn extract(&self, bytes: &[u8]) -> Result<String, IngestError>;
}

/// Raw-text extractor for Office Open XML documents.
///
/// Text runs are concatenated; paragraphs end with a blank line, tabs and
/// breaks are preserved. Formatting is ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocxExtractor;

impl DocxExtractor {
    /// Creates a new extractor.
    pub fn new() -> Self {
        Self
    }

    fn read_body(bytes: &[u8]) -> Result<String, IngestError> {
        let mut archive = ZipArchive::new(Cursor::new(bytes))?;
        let mut part = archive.by_name(DOCUMENT_PART)?;
        let mut xml = String::new();
        part.read_to_string(&mut xml)
            .map_err(|e| IngestError::Extraction(format!("{DOCUMENT_PART}: {e}")))?;
        Ok(xml)
    }
}

impl TextExtractor for DocxExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String, IngestError> {
        let xml = Self::read_body(bytes)?;
        let text = body_text(&xml)?;
        debug!(chars = text.chars().count(), "Extracted document text");
        Ok(text)
    }
}

fn body_text(xml: &str) -> Result<String, IngestError> {
    let mut reader = Reader::from_str(xml);
    let mut text = String::new();
    let mut in_run_text = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) if e.local_name().as_ref() == b"t" => in_run_text = true,
            Event::End(e) => match e.local_name().as_ref() {
                b"t" => in_run_text = false,
                b"p" => text.push_str("\n\n"),
                _ => {}
            },
            Event::Empty(e) => match e.local_name().as_ref() {
                b"tab" => text.push('\t'),
                b"br" | b"cr" => text.push('\n'),
                b"p" => text.push_str("\n\n"),
                _ => {}
            },
            Event::Text(t) if in_run_text => text.push_str(&t.unescape()?),
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(text.trim_end().to_string())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    /// Builds a minimal `.docx` container around a body.
    pub(crate) fn docx_with_body(body: &str) -> Vec<u8> {
        let xml = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{body}</w:body></w:document>"#
        );
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file(DOCUMENT_PART, SimpleFileOptions::default())
            .unwrap();
        writer.write_all(xml.as_bytes()).unwrap();
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn test_paragraphs_and_runs() {
        let bytes = docx_with_body(
            r#"<w:p><w:r><w:t>Добрый </w:t></w:r><w:r><w:rPr><w:b/></w:rPr><w:t>день</w:t></w:r></w:p><w:p><w:r><w:t>Второй</w:t><w:tab/><w:t>абзац</w:t></w:r></w:p>"#,
        );

        let text = DocxExtractor::new().extract(&bytes).unwrap();

        assert_eq!(text, "Добрый день\n\nВторой\tабзац");
    }

    #[test]
    fn test_entities_and_breaks() {
        let bytes =
            docx_with_body(r#"<w:p><w:r><w:t>A &amp; B</w:t><w:br/><w:t>C</w:t></w:r></w:p>"#);

        assert_eq!(DocxExtractor.extract(&bytes).unwrap(), "A & B\nC");
    }

    #[test]
    fn test_empty_document() {
        let bytes = docx_with_body("<w:p/>");
        assert_eq!(DocxExtractor.extract(&bytes).unwrap(), "");
    }

    #[test]
    fn test_not_a_zip() {
        let result = DocxExtractor.extract(b"plain text pretending to be docx");
        assert!(matches!(result, Err(IngestError::Extraction(_))));
    }

    #[test]
    fn test_missing_body_part() {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file("word/styles.xml", SimpleFileOptions::default())
            .unwrap();
        writer.write_all(b"<w:styles/>").unwrap();
        let bytes = writer.finish().unwrap().into_inner();

        assert!(matches!(
            DocxExtractor.extract(&bytes),
            Err(IngestError::Extraction(_))
        ));
    }
}
