//! Collection of every filesystem input for one run

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tm_fs::DirectoryListing;

use crate::descriptor::{DescriptorScan, scan_descriptors};
use crate::diagnostic::Diagnostic;
use crate::names::NameSet;
use crate::reconcile::{ReconcileInput, Reconciliation, reconcile};
use crate::{MatchConfig, Result};

/// Read-only view of the data directory and descriptor directories.
///
/// Collected once; [`Snapshot::reconcile`] can be called any number of
/// times and always yields the same result for the same load state.
#[derive(Debug)]
pub struct Snapshot {
    /// The collected data directory
    pub data: DirectoryListing,

    /// Names of the data directory entries
    pub data_entries: NameSet,

    /// Data directory symlinks and their resolved targets
    pub symlink_targets: BTreeMap<String, PathBuf>,

    /// Decoded descriptor paths and declared names
    pub descriptor_paths: NameSet,
    pub declared_names: NameSet,

    /// Findings to show before the report
    pub diagnostics: Vec<Diagnostic>,
}

impl Snapshot {
    /// Collect the data directory and every descriptor directory.
    ///
    /// Relative directories are resolved against `base`. Fails if any
    /// directory cannot be listed.
    pub fn collect(
        data_dir: &Path,
        torrent_dirs: &[PathBuf],
        base: &Path,
        config: &MatchConfig,
    ) -> Result<Self> {
        tracing::info!("Getting file list from data directory...");
        let data = tm_fs::collect(data_dir, base)?;

        let DescriptorScan {
            paths,
            names,
            failures,
        } = scan_descriptors(torrent_dirs, base, &config.descriptor_suffix)?;

        Ok(Self {
            data_entries: data.names().collect(),
            symlink_targets: data.symlink_targets(),
            data,
            descriptor_paths: paths,
            declared_names: names,
            diagnostics: failures.into_iter().map(Diagnostic::from).collect(),
        })
    }

    /// Absolute path of the data directory as given.
    pub fn data_dir(&self) -> &Path {
        &self.data.root
    }

    /// Reconcile the snapshot, optionally against the client's load state.
    pub fn reconcile(&self, loaded_paths: Option<&NameSet>) -> Reconciliation {
        reconcile(&ReconcileInput {
            descriptor_paths: &self.descriptor_paths,
            declared_names: &self.declared_names,
            data_entries: &self.data_entries,
            loaded_paths,
            symlink_targets: &self.symlink_targets,
            data_root: &self.data.resolved_root,
        })
    }
}
