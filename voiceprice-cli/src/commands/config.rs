//! Config command - manage configuration.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use tracing::info;
use voiceprice_session::SessionConfig;

use super::load_config;
use crate::output::JsonFormatter;
use crate::{Cli, OutputFormat};

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show the effective configuration.
    Show,

    /// Show the configuration path.
    Path,

    /// Write a config file with default values.
    Init {
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
}

/// Runs the config command.
pub fn run(args: &ConfigArgs, cli: &Cli) -> Result<()> {
    match &args.action {
        ConfigAction::Show => show_config(cli),
        ConfigAction::Path => show_path(cli),
        ConfigAction::Init { force } => init_config(*force, cli),
    }
}

fn config_path(cli: &Cli) -> std::path::PathBuf {
    cli.config.clone().unwrap_or_else(SessionConfig::default_path)
}

fn show_config(cli: &Cli) -> Result<()> {
    let config = load_config(cli)?;

    match cli.format {
        OutputFormat::Text => {
            println!("VoicePrice Configuration");
            println!("{}", "─".repeat(40));
            println!();
            println!("Backend:        {}", config.base_url);
            println!("Log level:      {}", config.log_level);
            println!();
            println!("Retry:");
            println!("  Attempts:            {}", config.retry.max_attempts);
            println!("  First timeout:       {} ms", config.retry.first_attempt_timeout_ms);
            println!("  Retry timeout:       {} ms", config.retry.retry_timeout_ms);
            println!("  Cold-start pause:    {} ms", config.retry.cold_start_pause_ms);
            println!(
                "  Backoff:             {}..{} ms",
                config.retry.base_delay_ms, config.retry.max_delay_ms
            );
            println!();
            println!(
                "Keep-warm:      {} (every {} s)",
                if config.keep_warm.enabled { "on" } else { "off" },
                config.keep_warm.interval_secs
            );
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format(&config)?);
        }
    }

    Ok(())
}

fn show_path(cli: &Cli) -> Result<()> {
    let path = config_path(cli);

    match cli.format {
        OutputFormat::Text => {
            println!("Config file: {}", path.display());
            if !path.exists() {
                println!("(not created yet, defaults apply)");
            }
        }
        OutputFormat::Json => {
            let paths = serde_json::json!({
                "config_file": path.display().to_string(),
                "exists": path.exists(),
            });
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format(&paths)?);
        }
    }

    Ok(())
}

fn init_config(force: bool, cli: &Cli) -> Result<()> {
    let path = config_path(cli);

    if path.exists() && !force {
        anyhow::bail!(
            "Config file already exists: {} (use --force to overwrite)",
            path.display()
        );
    }

    SessionConfig::default()
        .save_to(&path)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    info!(path = %path.display(), "Config initialized");
    if !cli.quiet {
        println!("Wrote {}", path.display());
    }

    Ok(())
}
