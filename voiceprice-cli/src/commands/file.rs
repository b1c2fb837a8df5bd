//! File command - count a document and quote it.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use tracing::debug;
use voiceprice_core::ServiceKind;
use voiceprice_session::IngestStatus;

use super::{Reported, build_session, finish};
use crate::Cli;

/// Arguments for the file command.
#[derive(Args)]
pub struct FileArgs {
    /// Path to a .txt or .docx file.
    pub path: PathBuf,

    /// Service to price. Services that count minutes fall back to voice_text.
    #[arg(long, short)]
    pub service: Option<ServiceKind>,

    /// Ask for the urgent price.
    #[arg(long, short)]
    pub urgent: bool,

    /// Declared MIME type; takes precedence over the file extension.
    #[arg(long)]
    pub mime: Option<String>,
}

/// Runs the file command.
pub async fn run(args: &FileArgs, cli: &Cli) -> Result<()> {
    let session = build_session(cli, false)?;

    if let Some(service) = args.service {
        session.select_service(service);
    }
    session.set_urgent(args.urgent);

    let status = session.ingest_file_as(&args.path, args.mime.as_deref()).await;
    debug!(?status, "File finished");
    session.shutdown();

    match status {
        IngestStatus::Counted { calculation, .. } => finish(&calculation),
        IngestStatus::Busy | IngestStatus::Superseded => Ok(()),
        IngestStatus::Empty => Err(Reported("empty document".to_string()).into()),
        IngestStatus::Rejected(message) | IngestStatus::Failed(message) => {
            Err(Reported(message).into())
        }
        IngestStatus::Cancelled => Err(Reported("cancelled".to_string()).into()),
    }
}
