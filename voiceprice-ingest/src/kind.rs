//! Supported document kinds.

use std::fmt;
use std::path::Path;

/// MIME type of plain-text files.
pub const PLAIN_TEXT_MIME: &str = "text/plain";

/// MIME type of word-processor (`.docx`) documents.
pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// A document the calculator can count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    /// `.txt`, decoded as UTF-8 with a Windows-1251 fallback.
    PlainText,
    /// `.docx`, text extracted from the document body.
    WordDocument,
}

impl DocumentKind {
    /// Detects the kind from a declared MIME type.
    pub fn from_mime(mime: &str) -> Option<Self> {
        let essence = mime.split(';').next().unwrap_or_default().trim();
        if essence.eq_ignore_ascii_case(PLAIN_TEXT_MIME) {
            Some(Self::PlainText)
        } else if essence.eq_ignore_ascii_case(DOCX_MIME) {
            Some(Self::WordDocument)
        } else {
            None
        }
    }

    /// Detects the kind from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "txt" => Some(Self::PlainText),
            "docx" => Some(Self::WordDocument),
            _ => None,
        }
    }

    /// Detects the kind of an upload. A declared MIME type decides on its
    /// own; the extension is used only when none was declared.
    pub fn detect(path: &Path, declared_mime: Option<&str>) -> Option<Self> {
        match declared_mime {
            Some(mime) => Self::from_mime(mime),
            None => Self::from_path(path),
        }
    }

    /// MIME type of this kind.
    pub fn mime(self) -> &'static str {
        match self {
            Self::PlainText => PLAIN_TEXT_MIME,
            Self::WordDocument => DOCX_MIME,
        }
    }

    /// Canonical file extension, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::PlainText => "txt",
            Self::WordDocument => "docx",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ".{}", self.extension())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_prefers_declared_mime() {
        let path = Path::new("notes.txt");
        assert_eq!(DocumentKind::detect(path, None), Some(DocumentKind::PlainText));
        assert_eq!(
            DocumentKind::detect(path, Some(DOCX_MIME)),
            Some(DocumentKind::WordDocument)
        );
        assert_eq!(DocumentKind::detect(path, Some("application/pdf")), None);
        assert_eq!(
            DocumentKind::detect(Path::new("upload"), Some(PLAIN_TEXT_MIME)),
            Some(DocumentKind::PlainText)
        );
    }

    #[test]
    fn test_from_mime() {
        assert_eq!(
            DocumentKind::from_mime("text/plain; charset=utf-8"),
            Some(DocumentKind::PlainText)
        );
        assert_eq!(
            DocumentKind::from_mime(DOCX_MIME),
            Some(DocumentKind::WordDocument)
        );
        assert_eq!(DocumentKind::from_mime("application/pdf"), None);
        assert_eq!(DocumentKind::from_mime("application/msword"), None);
    }

    #[test]
    fn test_from_path() {
        assert_eq!(
            DocumentKind::from_path(Path::new("script.TXT")),
            Some(DocumentKind::PlainText)
        );
        assert_eq!(
            DocumentKind::from_path(Path::new("/tmp/Сценарий.docx")),
            Some(DocumentKind::WordDocument)
        );
        assert_eq!(DocumentKind::from_path(Path::new("old.doc")), None);
        assert_eq!(DocumentKind::from_path(Path::new("README")), None);
    }
}
