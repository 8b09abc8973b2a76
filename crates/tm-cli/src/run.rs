//! One reconciliation run, from arguments to rendered report

use std::io::Write;
use std::path::Path;
use std::process::ExitCode;

use tm_client::{LoadStateSource, RtControl};
use tm_core::{Reconciliation, Snapshot};

use crate::cli::Cli;
use crate::error::Result;
use crate::report;

/// Exit code when differences were reported
pub const EXIT_DRIFT: u8 = 1;

/// Exit code when the run could not complete
pub const EXIT_FAILURE: u8 = 2;

/// Whether a completed run found anything to report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchStatus {
    InSync,
    Drift,
}

impl MatchStatus {
    pub fn of(result: &Reconciliation) -> Self {
        if result.has_drift() {
            Self::Drift
        } else {
            Self::InSync
        }
    }

    pub fn exit_code(self) -> ExitCode {
        match self {
            Self::InSync => ExitCode::SUCCESS,
            Self::Drift => ExitCode::from(EXIT_DRIFT),
        }
    }
}

/// Run with the `rtcontrol` client when `--rtorrent` was given.
pub async fn run_match(cli: &Cli, base: &Path, out: &mut impl Write) -> Result<MatchStatus> {
    let client = cli.rtorrent.then(|| RtControl::from_config(&cli.config()));
    let source = client.as_ref().map(|c| c as &dyn LoadStateSource);
    run_with_source(cli, base, source, out).await
}

/// Collect, optionally query load state, reconcile and render.
pub async fn run_with_source(
    cli: &Cli,
    base: &Path,
    source: Option<&dyn LoadStateSource>,
    out: &mut impl Write,
) -> Result<MatchStatus> {
    let config = cli.config();
    let mut snapshot = Snapshot::collect(&cli.data_dir, &cli.torrent_dirs, base, &config)?;
    tracing::debug!(
        entries = snapshot.data_entries.len(),
        descriptors = snapshot.descriptor_paths.len(),
        "snapshot collected"
    );

    let loaded = match source {
        Some(source) => {
            let data_dir = snapshot.data_dir().to_path_buf();
            source.query_loaded(&data_dir, &mut snapshot.diagnostics).await
        }
        None => None,
    };

    let result = snapshot.reconcile(loaded.as_ref());

    if cli.json {
        report::render_json(out, &snapshot.diagnostics, &result)?;
    } else {
        report::render_text(out, &snapshot.diagnostics, &result)?;
    }

    Ok(MatchStatus::of(&result))
}
