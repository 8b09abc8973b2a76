//! The load-state capability consumed by the CLI

use std::path::Path;

use async_trait::async_trait;
use tm_core::{Diagnostic, NameSet};

/// What asking the control tool produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessOutcome {
    /// Tracked descriptor paths, already normalized
    Success(Vec<String>),

    /// The tool is not installed
    Unavailable { tool: String },

    /// The tool ran (or tried to) and its answer cannot be trusted
    Failed { code: Option<i32>, message: String },
}

/// Something that knows which descriptors a torrent client has loaded.
#[async_trait]
pub trait LoadStateSource: Send + Sync {
    /// Ask for the descriptors whose data lives directly in `data_dir`.
    async fn fetch(&self, data_dir: &Path) -> ProcessOutcome;

    /// Tracked descriptor paths, or `None` when load state is unavailable.
    ///
    /// Any reason for unavailability is pushed onto `diagnostics`; it never
    /// becomes an error.
    async fn query_loaded(
        &self,
        data_dir: &Path,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Option<NameSet> {
        match self.fetch(data_dir).await {
            ProcessOutcome::Success(paths) => {
                let loaded: NameSet = paths.into_iter().collect();
                tracing::debug!(tracked = loaded.len(), "load state collected");
                Some(loaded)
            }
            ProcessOutcome::Unavailable { tool } => {
                tracing::warn!(%tool, "load-state tool not found");
                diagnostics.push(Diagnostic::LoadStateUnavailable { tool });
                None
            }
            ProcessOutcome::Failed { code, message } => {
                tracing::warn!(?code, %message, "load-state query failed");
                diagnostics.push(Diagnostic::LoadStateFailed { code, message });
                None
            }
        }
    }
}
