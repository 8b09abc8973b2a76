//! torrent-match CLI
//!
//! Points out differences between a directory of torrent files, the data
//! directory they download into and, optionally, what rTorrent has loaded.

mod cli;
mod error;
mod report;
mod run;

use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use cli::Cli;
use error::Result;
use run::{EXIT_FAILURE, MatchStatus};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(status) => status.exit_code(),
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            ExitCode::from(EXIT_FAILURE)
        }
    }
}

/// Logs go to stderr. `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "error" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(verbose)
        .with_writer(io::stderr)
        .finish();

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("{}: could not install the log subscriber", "warning".yellow());
    }
    tracing::debug!("Verbose mode enabled");
}

fn run(cli: &Cli) -> Result<MatchStatus> {
    let cwd = std::env::current_dir()?;
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let status = runtime.block_on(run::run_match(cli, &cwd, &mut out))?;
    out.flush()?;
    Ok(status)
}
