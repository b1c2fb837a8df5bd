//! Quote command - price a quantity typed on the command line.

use anyhow::Result;
use clap::Args;
use tracing::debug;
use voiceprice_core::ServiceKind;

use super::{build_session, finish};
use crate::Cli;

/// Arguments for the quote command.
#[derive(Args)]
pub struct QuoteArgs {
    /// Service to price.
    #[arg(long, short, default_value = "voice_text")]
    pub service: ServiceKind,

    /// Quantity in the unit of the service: words, minutes or characters.
    pub quantity: String,

    /// Ask for the urgent price.
    #[arg(long, short)]
    pub urgent: bool,
}

/// Runs the quote command.
pub async fn run(args: &QuoteArgs, cli: &Cli) -> Result<()> {
    let session = build_session(cli, false)?;

    session.select_service(args.service);
    session.set_urgent(args.urgent);
    session.set_quantity_input(args.quantity.as_str());

    let status = session.calculate().await;
    debug!(?status, "Quote finished");
    session.shutdown();

    finish(&status)
}
