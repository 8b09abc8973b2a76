//! Single-level directory collection
//!
//! Enumerates the immediate entries of one directory, telling symbolic links
//! apart from everything else by their own metadata and resolving where each
//! link finally points.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::path::{absolutize, resolve_best_effort};
use crate::{Error, Result};

/// How an entry presents itself, judged without following links.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    /// Regular file, directory, or any other non-link entry
    Regular,
    /// Symbolic link (possibly dangling)
    Symlink,
}

/// One immediate entry of a collected directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListedEntry {
    /// Base name of the entry (lossily converted to UTF-8)
    pub name: String,

    /// Absolute, lexically normalized path of the entry itself
    pub path: PathBuf,

    /// Link-or-not classification from `symlink_metadata`
    pub kind: EntryKind,

    /// Whether the entry is a regular file once links are followed
    pub is_file: bool,

    /// Fully resolved target, present only for symlinks
    pub target: Option<PathBuf>,
}

impl ListedEntry {
    pub fn is_symlink(&self) -> bool {
        self.kind == EntryKind::Symlink
    }
}

/// The result of collecting one directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryListing {
    /// Absolute, lexically normalized directory path as requested
    pub root: PathBuf,

    /// The directory with every symlink along the way resolved
    pub resolved_root: PathBuf,

    /// Entries ordered by name
    pub entries: Vec<ListedEntry>,
}

impl DirectoryListing {
    /// Names of every entry, links included.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.name.as_str())
    }

    /// Symlink entries mapped to their resolved targets.
    pub fn symlink_targets(&self) -> BTreeMap<String, PathBuf> {
        self.entries
            .iter()
            .filter_map(|entry| {
                entry
                    .target
                    .as_ref()
                    .map(|target| (entry.name.clone(), target.clone()))
            })
            .collect()
    }

    /// Entries that are regular files (following links) whose name ends with `suffix`.
    pub fn files_with_suffix<'a>(&'a self, suffix: &'a str) -> impl Iterator<Item = &'a ListedEntry> {
        self.entries
            .iter()
            .filter(move |entry| entry.is_file && entry.name.ends_with(suffix))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Collect the immediate entries of `directory`.
///
/// A relative `directory` is resolved against `base`. Failing to open or
/// iterate the directory is an error; resolving a link target never is.
pub fn collect(directory: &Path, base: &Path) -> Result<DirectoryListing> {
    let root = absolutize(directory, base);

    let meta = fs::metadata(&root).map_err(|e| Error::io(&root, e))?;
    if !meta.is_dir() {
        return Err(Error::NotADirectory { path: root });
    }

    let reader = fs::read_dir(&root).map_err(|e| Error::io(&root, e))?;
    let mut entries = Vec::new();

    for dir_entry in reader {
        let dir_entry = dir_entry.map_err(|e| Error::io(&root, e))?;
        let name = dir_entry.file_name().to_string_lossy().into_owned();
        let path = root.join(dir_entry.file_name());

        // DirEntry::file_type does not traverse links
        let file_type = dir_entry.file_type().map_err(|e| Error::io(&path, e))?;

        let entry = if file_type.is_symlink() {
            let target = resolve_best_effort(&path);
            let is_file = target.is_file();
            tracing::debug!(
                entry = %name,
                target = %target.display(),
                "resolved symlink"
            );
            ListedEntry {
                name,
                path,
                kind: EntryKind::Symlink,
                is_file,
                target: Some(target),
            }
        } else {
            ListedEntry {
                name,
                path,
                kind: EntryKind::Regular,
                is_file: file_type.is_file(),
                target: None,
            }
        };
        entries.push(entry);
    }

    entries.sort_by(|a, b| a.name.cmp(&b.name));

    tracing::debug!(
        directory = %root.display(),
        entries = entries.len(),
        "collected directory"
    );

    Ok(DirectoryListing {
        resolved_root: resolve_best_effort(&root),
        root,
        entries,
    })
}
