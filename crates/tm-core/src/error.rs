//! Error types for tm-core

/// Result type for tm-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Fatal errors for a run. Per-descriptor failures are not errors here; they
/// are collected as [`crate::Diagnostic`]s instead.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A data or descriptor directory could not be enumerated
    #[error(transparent)]
    Fs(#[from] tm_fs::Error),
}
