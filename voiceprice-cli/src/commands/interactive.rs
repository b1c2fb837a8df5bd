//! Interactive command - one quantity or command per line.
//!
//! Every line starts its calculation right away, so typing faster than the
//! backend answers supersedes older requests instead of queueing them.

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use clap::Args;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::JoinSet;
use tracing::{debug, info};
use voiceprice_core::ServiceKind;
use voiceprice_session::CalculatorSession;

use super::build_session;
use crate::output::TextFormatter;
use crate::{Cli, OutputFormat};

/// Arguments for the interactive command.
#[derive(Args, Default)]
pub struct InteractiveArgs {
    /// Do not ping the backend in the background.
    #[arg(long)]
    pub no_keep_warm: bool,
}

/// What one input line asks for.
#[derive(Debug, PartialEq, Eq)]
enum Line<'a> {
    Quit,
    Help,
    Service(&'a str),
    Urgent,
    File(&'a str),
    Retry,
    Quantity(&'a str),
    Blank,
}

impl<'a> Line<'a> {
    fn parse(line: &'a str) -> Self {
        let line = line.trim();
        let (head, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(head, rest)| (head, rest.trim()));

        match head.to_lowercase().as_str() {
            "" => Self::Blank,
            "quit" | "exit" | "q" => Self::Quit,
            "help" | "?" => Self::Help,
            "urgent" => Self::Urgent,
            "retry" => Self::Retry,
            "service" if !rest.is_empty() => Self::Service(rest),
            "file" if !rest.is_empty() => Self::File(rest),
            _ => Self::Quantity(line),
        }
    }
}

/// Runs the interactive command.
pub async fn run(args: &InteractiveArgs, cli: &Cli) -> Result<()> {
    let session = build_session(cli, true)?;
    let formatter = TextFormatter::new(!cli.no_color);
    let chatty = cli.format == OutputFormat::Text && !cli.quiet;

    if !args.no_keep_warm && session.start_keep_warm() {
        info!("Keep-warm started");
    }

    if chatty {
        print_help();
        eprintln!("{}", formatter.format_service_hint(session.service()));
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut tasks = JoinSet::new();

    loop {
        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = tokio::signal::ctrl_c() => {
                debug!("Interrupted");
                None
            }
        };

        let Some(line) = line else {
            break;
        };

        // Reap finished calculations so the set does not grow unbounded.
        while tasks.try_join_next().is_some() {}

        match Line::parse(&line) {
            Line::Quit => break,
            Line::Blank => {}
            Line::Help => print_help(),
            Line::Service(name) => match name.parse::<ServiceKind>() {
                Ok(service) => {
                    session.select_service(service);
                    if chatty {
                        eprintln!("{}", formatter.format_service_hint(service));
                    }
                }
                Err(e) => eprintln!("{}", formatter.format_validation(&e.to_string())),
            },
            Line::Urgent => {
                let session = Arc::clone(&session);
                tasks.spawn(async move {
                    session.toggle_urgent().await;
                });
            }
            Line::File(path) => {
                let session = Arc::clone(&session);
                let path = Path::new(path).to_path_buf();
                tasks.spawn(async move {
                    session.ingest_file(&path).await;
                });
            }
            Line::Retry => spawn_calculation(&mut tasks, &session, Calc::Retry),
            Line::Quantity(input) => {
                session.set_quantity_input(input);
                spawn_calculation(&mut tasks, &session, Calc::Recalculate);
            }
        }
    }

    session.shutdown();
    while tasks.join_next().await.is_some() {}

    Ok(())
}

#[derive(Clone, Copy)]
enum Calc {
    Recalculate,
    Retry,
}

fn spawn_calculation(tasks: &mut JoinSet<()>, session: &Arc<CalculatorSession>, calc: Calc) {
    let session = Arc::clone(session);
    tasks.spawn(async move {
        let status = match calc {
            Calc::Recalculate => session.recalculate().await,
            Calc::Retry => session.retry().await,
        };
        debug!(?status, "Calculation finished");
    });
}

fn print_help() {
    eprintln!("Введите количество и нажмите Enter. Команды:");
    eprintln!("  service <id>   сменить услугу (voice_text, voice_video, translate_text, translate_voice, voice_camera)");
    eprintln!("  urgent         переключить срочность");
    eprintln!("  file <путь>    посчитать .txt или .docx");
    eprintln!("  retry          повторить последний расчёт");
    eprintln!("  quit           выход");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(Line::parse("quit"), Line::Quit);
        assert_eq!(Line::parse("  EXIT "), Line::Quit);
        assert_eq!(Line::parse("help"), Line::Help);
        assert_eq!(Line::parse("urgent"), Line::Urgent);
        assert_eq!(Line::parse("retry"), Line::Retry);
        assert_eq!(Line::parse(""), Line::Blank);
        assert_eq!(Line::parse("   "), Line::Blank);
    }

    #[test]
    fn test_parse_arguments() {
        assert_eq!(Line::parse("service voice_video"), Line::Service("voice_video"));
        assert_eq!(
            Line::parse("file  /tmp/my script.docx"),
            Line::File("/tmp/my script.docx")
        );
    }

    #[test]
    fn test_anything_else_is_a_quantity() {
        assert_eq!(Line::parse("240"), Line::Quantity("240"));
        assert_eq!(Line::parse("240 слов"), Line::Quantity("240 слов"));
        assert_eq!(Line::parse("service"), Line::Quantity("service"));
    }
}
