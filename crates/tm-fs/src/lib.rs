//! Filesystem layer for torrent-match
//!
//! Provides single-level directory collection with symlink classification
//! and the path arithmetic used to decide where a link really points.

pub mod error;
pub mod path;
pub mod scan;

pub use error::{Error, Result};
pub use path::{absolutize, normalize_lexically, relative_to, resolve_best_effort, stays_inside};
pub use scan::{DirectoryListing, EntryKind, ListedEntry, collect};
