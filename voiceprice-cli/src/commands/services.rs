//! Services command - list what can be priced.

use anyhow::Result;
use voiceprice_core::ServiceKind;

use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, OutputFormat};

/// Runs the services command.
pub fn run(cli: &Cli) -> Result<()> {
    let services = ServiceKind::all();

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            println!("{}", formatter.format_services_header());
            for service in services {
                println!("{}", formatter.format_service_line(*service));
            }
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format_services(services)?);
        }
    }

    Ok(())
}
