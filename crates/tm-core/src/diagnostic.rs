//! Non-fatal findings surfaced before the reconciliation report

use std::fmt;

use crate::descriptor::DecodeError;

/// Something went wrong for one item or one subsystem, but the run went on.
#[derive(Debug)]
pub enum Diagnostic {
    /// A descriptor was skipped
    Undecodable(DecodeError),

    /// The load-state control tool is not installed
    LoadStateUnavailable { tool: String },

    /// The load-state control tool ran but its answer could not be used
    LoadStateFailed { code: Option<i32>, message: String },
}

impl Diagnostic {
    /// Whether this diagnostic disabled the load-state comparison.
    pub fn skips_load_state(&self) -> bool {
        !matches!(self, Self::Undecodable(_))
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Undecodable(err) => write!(f, "{err}"),
            Self::LoadStateUnavailable { tool } => {
                write!(f, "'{tool}' not found, not analyzing rTorrent data")
            }
            Self::LoadStateFailed {
                code: Some(code),
                message,
            } => {
                write!(f, "Couldn't get torrent listing from rTorrent (exit code {code})")?;
                if !message.is_empty() {
                    write!(f, "\n  {message}")?;
                }
                Ok(())
            }
            Self::LoadStateFailed {
                code: None,
                message,
            } => write!(f, "Couldn't get torrent listing from rTorrent: {message}"),
        }
    }
}

impl From<DecodeError> for Diagnostic {
    fn from(err: DecodeError) -> Self {
        Self::Undecodable(err)
    }
}
