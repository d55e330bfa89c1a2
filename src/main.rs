//! jsonmask CLI entry point.

use std::io;
use std::process::ExitCode;

use clap::Parser;
use console::style;
use jsonmask::cli::{Cli, CommandDispatcher};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is WARN
///
/// Logs go to stderr so they never mix with the masked document.
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("jsonmask=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("jsonmask=warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(io::stderr))
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    tracing::debug!("jsonmask starting with args: {:?}", cli);

    let dispatcher = CommandDispatcher::new(cli.config.clone());
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match dispatcher.dispatch(&cli, &mut out) {
        Ok(result) => ExitCode::from(result.exit_code as u8),
        Err(e) => {
            eprintln!("{} {}", style("error:").red().bold(), e);
            if e.is_config_error() {
                ExitCode::from(2)
            } else {
                ExitCode::from(1)
            }
        }
    }
}
