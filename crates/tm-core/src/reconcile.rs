//! Reconciliation of descriptors, data directory entries and load state
//!
//! Everything here is a pure function of its inputs: the filesystem has
//! already been read by the time [`reconcile`] runs.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Serialize, Serializer};

use crate::names::NameSet;

/// Every set the reconciliation step compares.
#[derive(Debug, Clone, Copy)]
pub struct ReconcileInput<'a> {
    /// Absolute paths of the decoded descriptors
    pub descriptor_paths: &'a NameSet,

    /// Names declared by those descriptors
    pub declared_names: &'a NameSet,

    /// Names of the data directory's immediate entries
    pub data_entries: &'a NameSet,

    /// Descriptor paths the client tracks, when load state is available
    pub loaded_paths: Option<&'a NameSet>,

    /// Data directory symlinks mapped to their resolved targets
    pub symlink_targets: &'a BTreeMap<String, PathBuf>,

    /// The data directory with its own symlinks resolved
    pub data_root: &'a Path,
}

/// Descriptors compared with the client's load state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadComparison {
    /// Descriptors the client is not tracking
    pub missing_loaded: NameSet,

    /// Tracked descriptors that are not in the descriptor directories
    pub extra_loaded: NameSet,
}

impl LoadComparison {
    pub fn in_sync(&self) -> bool {
        self.missing_loaded.is_empty() && self.extra_loaded.is_empty()
    }
}

/// An extra data entry that links outside the data directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvalidSymlink {
    pub name: String,
    #[serde(serialize_with = "serialize_path_lossy")]
    pub target: PathBuf,
}

/// Link targets are arbitrary bytes on unix; render them the way entry names
/// are, replacing invalid UTF-8.
fn serialize_path_lossy<S: Serializer>(path: &Path, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&path.to_string_lossy())
}

/// The outcome of one run. `extra_data` is partitioned exactly once into
/// `plain_extras`, `valid_symlinks` and `invalid_symlinks`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Reconciliation {
    /// Present only when load state was available
    pub load: Option<LoadComparison>,

    /// Declared names with no data directory entry
    pub missing_data: NameSet,

    /// Data directory entries with no declared name
    pub extra_data: NameSet,

    /// Extra entries that are not symlinks
    pub plain_extras: NameSet,

    /// Extra symlinks pointing inside the data directory
    pub valid_symlinks: NameSet,

    /// Extra symlinks pointing outside the data directory, ordered by name
    pub invalid_symlinks: Vec<InvalidSymlink>,
}

impl Reconciliation {
    /// No missing data, no plain extras and no invalid symlinks.
    pub fn data_in_sync(&self) -> bool {
        self.missing_data.is_empty() && self.plain_extras.is_empty() && self.invalid_symlinks.is_empty()
    }

    /// `None` when load state was not compared.
    pub fn load_in_sync(&self) -> Option<bool> {
        self.load.as_ref().map(LoadComparison::in_sync)
    }

    /// Whether anything worth reporting was found.
    pub fn has_drift(&self) -> bool {
        !self.data_in_sync() || self.load_in_sync() == Some(false)
    }
}

/// Compare the collected sets.
pub fn reconcile(input: &ReconcileInput<'_>) -> Reconciliation {
    let load = input.loaded_paths.map(|loaded| LoadComparison {
        missing_loaded: input.descriptor_paths.difference(loaded),
        extra_loaded: loaded.difference(input.descriptor_paths),
    });

    let missing_data = input.declared_names.difference(input.data_entries);
    let extra_data = input.data_entries.difference(input.declared_names);

    let (extra_links, plain_extras) =
        extra_data.partition(|name| input.symlink_targets.contains_key(name));

    let mut valid_symlinks = NameSet::new();
    let mut invalid_symlinks = Vec::new();

    for name in extra_links {
        let Some(target) = input.symlink_targets.get(&name) else {
            continue;
        };
        let relative = tm_fs::relative_to(target, input.data_root);

        if tm_fs::stays_inside(&relative) {
            tracing::debug!(entry = %name, relative = %relative.display(), "symlink stays inside data directory");
            valid_symlinks.insert(name);
        } else {
            invalid_symlinks.push(InvalidSymlink {
                name,
                target: target.clone(),
            });
        }
    }

    Reconciliation {
        load,
        missing_data,
        extra_data,
        plain_extras,
        valid_symlinks,
        invalid_symlinks,
    }
}
