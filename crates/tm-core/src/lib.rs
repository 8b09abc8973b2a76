//! Core engine for torrent-match
//!
//! Decodes torrent descriptors, gathers the name sets for one run and
//! reconciles them against the data directory and, optionally, the load
//! state reported by the torrent client.
//!
//! # Modules
//!
//! - [`bencode`] - decoder for the descriptor encoding
//! - [`descriptor`] - declared-name extraction and descriptor directory scans
//! - [`names`] - the [`NameSet`] type and its set algebra
//! - [`reconcile`] - the pure reconciliation step
//! - [`snapshot`] - collection of every input for one run

pub mod bencode;
pub mod config;
pub mod descriptor;
pub mod diagnostic;
pub mod error;
pub mod names;
pub mod reconcile;
pub mod snapshot;

pub use config::MatchConfig;
pub use descriptor::{DecodeCause, DecodeError, DescriptorScan, decode_descriptor, scan_descriptors};
pub use diagnostic::Diagnostic;
pub use error::{Error, Result};
pub use names::NameSet;
pub use reconcile::{InvalidSymlink, LoadComparison, ReconcileInput, Reconciliation, reconcile};
pub use snapshot::Snapshot;
