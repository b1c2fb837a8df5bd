//! Ping command - wake the backend up and report how long it took.

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Args;
use voiceprice_fetch::PricingApi;

use super::{Reported, load_config};
use crate::output::{JsonFormatter, PingOutput, TextFormatter};
use crate::{Cli, OutputFormat};

/// Arguments for the ping command.
#[derive(Args)]
pub struct PingArgs {
    /// Seconds to wait for an answer.
    #[arg(long, default_value = "10")]
    pub timeout: u64,
}

/// Runs the ping command.
pub async fn run(args: &PingArgs, cli: &Cli) -> Result<()> {
    let config = load_config(cli)?;
    let api = PricingApi::connect(&config.base_url, config.retry.to_policy())
        .context("Failed to create HTTP client")?;

    let started = Instant::now();
    let result = api.ping(Duration::from_secs(args.timeout)).await;
    let elapsed_ms = started.elapsed().as_millis();

    // Any HTTP answer means the backend is up, even a 405 to HEAD.
    let (status, error) = match &result {
        Ok(status) => (Some(*status), None),
        Err(e) => (e.status(), e.status().is_none().then(|| e.to_string())),
    };

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            println!("{}", formatter.format_ping(&config.base_url, status, elapsed_ms));
            if let Some(error) = &error {
                if cli.verbose {
                    eprintln!("{error}");
                }
            }
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            let output = PingOutput {
                base_url: &config.base_url,
                reachable: status.is_some(),
                status,
                elapsed_ms,
                error: error.clone(),
            };
            println!("{}", formatter.format(&output)?);
        }
    }

    match error {
        Some(error) => Err(Reported(error).into()),
        None => Ok(()),
    }
}
