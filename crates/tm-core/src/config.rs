//! Run configuration
//!
//! torrent-match has no configuration file. The CLI fills a [`MatchConfig`]
//! from its arguments and environment; library callers construct one
//! directly or start from [`MatchConfig::default`].

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// File name suffix that marks a descriptor
pub const DEFAULT_DESCRIPTOR_SUFFIX: &str = ".torrent";

/// Control program queried for load state
pub const DEFAULT_CONTROL_PROGRAM: &str = "rtcontrol";

/// Exit code `rtcontrol` uses when the query matched nothing
pub const DEFAULT_EMPTY_RESULT_CODE: i32 = 44;

/// Seconds to wait for the control program before giving up
pub const DEFAULT_QUERY_TIMEOUT_SECS: u64 = 60;

/// Tunables for one reconciliation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Only regular files ending with this suffix are decoded as descriptors
    pub descriptor_suffix: String,

    /// Program name or path of the load-state control tool
    pub control_program: String,

    /// Exit code that means "no matches" rather than failure
    pub empty_result_code: i32,

    /// Query timeout in seconds; `0` waits forever
    pub query_timeout_secs: u64,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            descriptor_suffix: DEFAULT_DESCRIPTOR_SUFFIX.to_string(),
            control_program: DEFAULT_CONTROL_PROGRAM.to_string(),
            empty_result_code: DEFAULT_EMPTY_RESULT_CODE,
            query_timeout_secs: DEFAULT_QUERY_TIMEOUT_SECS,
        }
    }
}

impl MatchConfig {
    /// The query timeout, or `None` when disabled.
    pub fn query_timeout(&self) -> Option<Duration> {
        (self.query_timeout_secs > 0).then(|| Duration::from_secs(self.query_timeout_secs))
    }
}
