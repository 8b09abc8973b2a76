//! Error types for tm-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that abort a run
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// A directory could not be collected
    #[error(transparent)]
    Core(#[from] tm_core::Error),

    /// Standard I/O error (working directory, runtime, output)
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON rendering error
    #[error("Could not render JSON report: {0}")]
    Json(#[from] serde_json::Error),
}
