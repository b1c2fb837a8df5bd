// Lint configuration for this crate
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! VoicePrice CLI - voice-over and translation price quotes from the command line.
//!
//! # Examples
//!
//! ```bash
//! # Quote narration of 240 words
//! voiceprice quote 240
//!
//! # Urgent translation of 1800 characters
//! voiceprice quote --service translate_text 1800 --urgent
//!
//! # Count a script and quote it
//! voiceprice file script.docx
//!
//! # Type quantities one per line, keeping the backend warm
//! voiceprice interactive
//!
//! # JSON output
//! voiceprice --format json --pretty quote 240
//! ```

mod commands;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use commands::{Reported, config, file, interactive, ping, quote, services};

// ============================================================================
// CLI Definition
// ============================================================================

/// VoicePrice CLI - price quotes for voice-over and translation.
#[derive(Parser)]
#[command(name = "voiceprice")]
#[command(about = "Price calculator for voice-over and translation services")]
#[command(long_about = r#"
VoicePrice asks the pricing backend for price, turnaround and deadline.

Services:
  • Озвучка текста (voice_text)
  • Озвучка видео (voice_video)
  • Перевод текста (translate_text)
  • Перевод + озвучка видео (translate_voice)
  • Озвучка текста на камеру (voice_camera)

Examples:
  voiceprice quote 240                       # Narration of 240 words
  voiceprice quote -s voice_video 7 --urgent # Urgent video narration, 7 minutes
  voiceprice file script.txt                 # Count a document and quote it
  voiceprice interactive                     # One quantity per line
  voiceprice ping                            # Wake the backend up
"#)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run. If none, starts interactive mode.
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output format (text or json).
    #[arg(long, short = 'f', default_value = "text", global = true)]
    pub format: OutputFormat,

    /// Pretty-print JSON output.
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Pricing backend base URL (overrides the config file).
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Path to the config file.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output (show debug info).
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Quiet mode (minimal output).
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

/// CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Quote a quantity typed on the command line.
    #[command(visible_alias = "q")]
    Quote(quote::QuoteArgs),

    /// Count a .txt or .docx document and quote it.
    #[command(visible_alias = "f")]
    File(file::FileArgs),

    /// Read quantities and commands from stdin, one per line.
    #[command(visible_alias = "i")]
    Interactive(interactive::InteractiveArgs),

    /// Check that the backend is awake.
    Ping(ping::PingArgs),

    /// List available services.
    #[command(visible_alias = "s")]
    Services,

    /// Manage configuration.
    Config(config::ConfigArgs),
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable text with colors.
    #[default]
    Text,
    /// JSON output for scripting.
    Json,
}

/// CLI exit codes.
#[repr(i32)]
pub enum ExitCode {
    /// Success.
    Success = 0,
    /// General error.
    Error = 1,
}

// ============================================================================
// Logging Setup
// ============================================================================

fn setup_logging(verbose: bool, quiet: bool) {
    if quiet {
        return;
    }

    let filter = if verbose {
        EnvFilter::new("voiceprice=debug,info")
    } else {
        EnvFilter::new("voiceprice=warn")
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let result = match &cli.command {
        Some(Commands::Quote(args)) => quote::run(args, &cli).await,
        Some(Commands::File(args)) => file::run(args, &cli).await,
        Some(Commands::Interactive(args)) => interactive::run(args, &cli).await,
        Some(Commands::Ping(args)) => ping::run(args, &cli).await,
        Some(Commands::Services) => services::run(&cli),
        Some(Commands::Config(args)) => config::run(args, &cli),
        None => interactive::run(&interactive::InteractiveArgs::default(), &cli).await,
    };

    if let Err(e) = result {
        // Reported errors were already rendered by the view.
        if !cli.quiet && e.downcast_ref::<Reported>().is_none() {
            eprintln!("Error: {e:#}");
        }
        std::process::exit(ExitCode::Error as i32);
    }

    Ok(())
}
