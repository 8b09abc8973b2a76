//! [`MatchFixture`] builder for torrent-match test scenarios.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::bencode::torrent_bytes;

/// A temporary workspace holding a `data/` directory and a `torrents/`
/// directory, with helpers to populate both.
///
/// # Example
///
/// ```rust,no_run
/// use tm_test_utils::MatchFixture;
///
/// let fixture = MatchFixture::new();
/// fixture.add_torrent("a.torrent", "Show.S01");
/// fixture.add_data_dir("Show.S01");
/// ```
pub struct MatchFixture {
    temp_dir: TempDir,
}

impl Default for MatchFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl MatchFixture {
    /// Create the workspace with empty `data/` and `torrents/` directories.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir_all(temp_dir.path().join("data")).unwrap();
        fs::create_dir_all(temp_dir.path().join("torrents")).unwrap();
        Self { temp_dir }
    }

    /// Root of the temporary workspace.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn data_dir(&self) -> PathBuf {
        self.root().join("data")
    }

    pub fn torrent_dir(&self) -> PathBuf {
        self.root().join("torrents")
    }

    /// Create (or reuse) an additional torrent directory under the root.
    pub fn extra_torrent_dir(&self, name: &str) -> PathBuf {
        let dir = self.root().join(name);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    /// Write a descriptor declaring `name` into `torrents/`.
    pub fn add_torrent(&self, file_name: &str, name: &str) -> PathBuf {
        self.add_torrent_in(&self.torrent_dir(), file_name, name)
    }

    /// Write a descriptor declaring `name` into `dir`.
    pub fn add_torrent_in(&self, dir: &Path, file_name: &str, name: &str) -> PathBuf {
        self.add_raw_torrent_in(dir, file_name, &torrent_bytes(name))
    }

    /// Write arbitrary bytes as a descriptor file into `torrents/`.
    pub fn add_raw_torrent(&self, file_name: &str, bytes: &[u8]) -> PathBuf {
        self.add_raw_torrent_in(&self.torrent_dir(), file_name, bytes)
    }

    fn add_raw_torrent_in(&self, dir: &Path, file_name: &str, bytes: &[u8]) -> PathBuf {
        let path = dir.join(file_name);
        fs::write(&path, bytes)
            .unwrap_or_else(|e| panic!("Could not write {}: {e}", path.display()));
        path
    }

    /// Create a folder in `data/`.
    pub fn add_data_dir(&self, name: &str) -> PathBuf {
        let path = self.data_dir().join(name);
        fs::create_dir_all(&path).unwrap();
        path
    }

    /// Create a file in `data/`.
    pub fn add_data_file(&self, name: &str) -> PathBuf {
        let path = self.data_dir().join(name);
        fs::write(&path, b"payload").unwrap();
        path
    }

    /// Create a symlink named `name` in `data/` pointing at `target`.
    #[cfg(unix)]
    pub fn add_data_symlink(&self, name: &str, target: impl AsRef<Path>) -> PathBuf {
        let path = self.data_dir().join(name);
        std::os::unix::fs::symlink(target.as_ref(), &path).unwrap_or_else(|e| {
            panic!("Could not link {} -> {}: {e}", path.display(), target.as_ref().display())
        });
        path
    }

    /// Create a file outside `data/` (under `outside/`) and return its path.
    pub fn add_outside_file(&self, name: &str) -> PathBuf {
        let dir = self.root().join("outside");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        fs::write(&path, b"payload").unwrap();
        path
    }

    /// Canonical form of `path`, for comparing against resolved targets.
    pub fn canonical(&self, path: impl AsRef<Path>) -> PathBuf {
        fs::canonicalize(path.as_ref()).unwrap()
    }
}
