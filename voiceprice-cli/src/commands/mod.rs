//! CLI command implementations.

pub mod config;
pub mod file;
pub mod interactive;
pub mod ping;
pub mod quote;
pub mod services;

use std::sync::Arc;

use anyhow::{Context, Result};
use voiceprice_session::{CalcStatus, CalculatorSession, QuoteView, SessionConfig};

use crate::output::{JsonFormatter, JsonView, TextFormatter, TextView};
use crate::{Cli, OutputFormat};

/// A failure the view has already shown; only the exit code is left to set.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct Reported(pub String);

/// Loads the config file named on the command line, or the default one,
/// and applies flag overrides.
pub fn load_config(cli: &Cli) -> Result<SessionConfig> {
    let mut config = match &cli.config {
        Some(path) => SessionConfig::load_from(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => SessionConfig::load().context("Failed to load config")?,
    };

    if let Some(base_url) = &cli.base_url {
        config.base_url.clone_from(base_url);
    }

    Ok(config)
}

/// Creates the view for the selected output format.
pub fn make_view(cli: &Cli, interactive: bool) -> Arc<dyn QuoteView> {
    match cli.format {
        OutputFormat::Text => Arc::new(TextView::new(
            TextFormatter::new(!cli.no_color),
            interactive,
            cli.quiet,
        )),
        OutputFormat::Json => Arc::new(JsonView::new(JsonFormatter::new(cli.pretty))),
    }
}

/// Creates a session from config and flags.
pub fn build_session(cli: &Cli, interactive: bool) -> Result<Arc<CalculatorSession>> {
    let config = load_config(cli)?;
    let session = CalculatorSession::from_config(config, make_view(cli, interactive))
        .context("Failed to create calculator session")?;
    Ok(Arc::new(session))
}

/// Maps a calculation outcome to the command result.
pub fn finish(status: &CalcStatus) -> Result<()> {
    match status {
        CalcStatus::Rendered(_) | CalcStatus::Busy | CalcStatus::Superseded => Ok(()),
        CalcStatus::Cancelled => Err(Reported("cancelled".to_string()).into()),
        CalcStatus::Invalid => Err(Reported("invalid quantity".to_string()).into()),
        CalcStatus::Failed(message) => Err(Reported(message.clone()).into()),
    }
}
