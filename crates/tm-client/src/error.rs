//! Error types for tm-client

use std::time::Duration;

/// Result type for tm-client operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors from running the control tool
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("'{tool}' not found")]
    ToolNotFound { tool: String },

    #[error("failed to run '{tool}': {source}")]
    Spawn {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    #[error("'{tool}' did not finish within {}s", .after.as_secs())]
    Timeout { tool: String, after: Duration },
}
