//! # VoicePrice Ingest
//!
//! Turns uploaded `.txt` and `.docx` files into plain text for counting.
//!
//! Plain text is decoded as UTF-8 and recovered as Windows-1251 when the
//! result looks mis-decoded. Word documents are unpacked and their body text
//! extracted without formatting.
//!
//! ```no_run
//! use std::path::Path;
//! use voiceprice_ingest::Ingestor;
//!
//! # async fn run() -> Result<(), voiceprice_ingest::IngestError> {
//! let ingested = Ingestor::new().ingest_path(Path::new("script.docx")).await?;
//! println!("{}", ingested.text);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod decode;
pub mod docx;
pub mod error;
pub mod ingestor;
pub mod kind;

pub use decode::{DecodedText, MIN_PLAUSIBLE_CHARS, decode_plain_text};
pub use docx::{DocxExtractor, TextExtractor};
pub use error::IngestError;
pub use ingestor::{IngestedText, Ingestor};
pub use kind::{DOCX_MIME, DocumentKind, PLAIN_TEXT_MIME};
