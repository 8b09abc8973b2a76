//! Rendering of the reconciliation report

use std::fmt::Display;
use std::io::{self, Write};

use colored::Colorize;
use serde::Serialize;
use tm_core::{Diagnostic, Reconciliation};

pub const LOAD_IN_SYNC: &str = "Torrent files are in sync with rTorrent";
pub const NOT_LOADED: &str = "The following torrents from the torrent dir(s) aren't loaded in rTorrent:";
pub const EXTRA_LOADED: &str =
    "The following extra torrents downloading into the data directory are loaded in rTorrent:";
pub const DATA_IN_SYNC: &str = "Data files/folders are in sync with the torrent files";
pub const NO_TORRENT: &str = "The following folders don't have a matching torrent:";
pub const NO_DATA: &str =
    "The following torrents don't have their matching files (were they renamed?):";
pub const EXTERNAL_LINKS: &str =
    "The following symlinks to external content don't have a matching torrent:";

/// Write the human-readable report: diagnostics, then the analysis.
pub fn render_text(
    out: &mut impl Write,
    diagnostics: &[Diagnostic],
    result: &Reconciliation,
) -> io::Result<()> {
    for diagnostic in diagnostics {
        writeln!(out, "{}", diagnostic.to_string().yellow())?;
    }

    writeln!(out)?;
    writeln!(out, "{}", "Analysis complete".bold())?;
    writeln!(out, "-----------------")?;

    if let Some(load) = &result.load {
        if load.in_sync() {
            writeln!(out, "{}", LOAD_IN_SYNC.green())?;
        } else {
            section(out, NOT_LOADED, &load.missing_loaded)?;
            section(out, EXTRA_LOADED, &load.extra_loaded)?;
        }
    }

    if result.data_in_sync() {
        writeln!(out, "{}", DATA_IN_SYNC.green())?;
    } else {
        section(out, NO_TORRENT, &result.plain_extras)?;
        section(out, NO_DATA, &result.missing_data)?;
        section(
            out,
            EXTERNAL_LINKS,
            result
                .invalid_symlinks
                .iter()
                .map(|link| format!("{} -> {}", link.name, link.target.display())),
        )?;
    }

    Ok(())
}

/// A header followed by its items, omitted when there are none.
fn section<I>(out: &mut impl Write, header: &str, items: I) -> io::Result<()>
where
    I: IntoIterator,
    I::Item: Display,
{
    let mut items = items.into_iter().peekable();
    if items.peek().is_none() {
        return Ok(());
    }

    writeln!(out, "{}", header.yellow().bold())?;
    for item in items {
        writeln!(out, "  {item}")?;
    }
    Ok(())
}

#[derive(Serialize)]
struct JsonReport<'a> {
    in_sync: bool,
    diagnostics: Vec<String>,
    #[serde(flatten)]
    result: &'a Reconciliation,
}

/// Write the report as a single JSON document.
pub fn render_json(
    out: &mut impl Write,
    diagnostics: &[Diagnostic],
    result: &Reconciliation,
) -> crate::error::Result<()> {
    let report = JsonReport {
        in_sync: !result.has_drift(),
        diagnostics: diagnostics.iter().map(ToString::to_string).collect(),
        result,
    };
    serde_json::to_writer_pretty(&mut *out, &report)?;
    writeln!(out)?;
    Ok(())
}
