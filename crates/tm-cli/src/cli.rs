//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::Parser;
use tm_core::MatchConfig;
use tm_core::config::{
    DEFAULT_CONTROL_PROGRAM, DEFAULT_DESCRIPTOR_SUFFIX, DEFAULT_QUERY_TIMEOUT_SECS,
};

/// Checks a directory of torrents against a data directory and points out
/// any differences.
///
/// For example, a file in the data folder with no matching torrent or vice
/// versa. Can optionally check the torrent files against rTorrent.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "torrent-match")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// The directory the torrent data is stored in
    pub data_dir: PathBuf,

    /// The directories to find *.torrent files in
    #[arg(required = true)]
    pub torrent_dirs: Vec<PathBuf>,

    /// Check against rTorrent to see if files are properly loaded
    /// (requires 'rtcontrol', see https://pyrocore.readthedocs.io)
    #[arg(short, long)]
    pub rtorrent: bool,

    /// Output as JSON for scripting
    #[arg(long)]
    pub json: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Program used to query rTorrent
    #[arg(long, env = "TORRENT_MATCH_RTCONTROL", default_value = DEFAULT_CONTROL_PROGRAM)]
    pub rtcontrol: String,

    /// Seconds to wait for the rTorrent query (0 waits forever)
    #[arg(long, env = "TORRENT_MATCH_RTCONTROL_TIMEOUT", default_value_t = DEFAULT_QUERY_TIMEOUT_SECS)]
    pub rtcontrol_timeout: u64,

    /// File name suffix of torrent files
    #[arg(long, env = "TORRENT_MATCH_SUFFIX", default_value = DEFAULT_DESCRIPTOR_SUFFIX)]
    pub suffix: String,
}

impl Cli {
    /// The run configuration these arguments describe.
    pub fn config(&self) -> MatchConfig {
        MatchConfig {
            descriptor_suffix: self.suffix.clone(),
            control_program: self.rtcontrol.clone(),
            query_timeout_secs: self.rtcontrol_timeout,
            ..MatchConfig::default()
        }
    }
}
