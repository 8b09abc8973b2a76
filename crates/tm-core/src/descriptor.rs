//! Declared-name extraction from torrent descriptors

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::Result;
use crate::bencode::{self, BencodeError, Value};
use crate::names::NameSet;

/// Why a descriptor did not yield a declared name.
#[derive(Debug, thiserror::Error)]
pub enum DecodeCause {
    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("malformed bencode: {0}")]
    Malformed(#[from] BencodeError),

    #[error("{what} must be a dictionary, found {found}")]
    NotADictionary {
        what: &'static str,
        found: &'static str,
    },

    #[error("missing key '{0}'")]
    MissingKey(&'static str),

    #[error("'name' must be a byte string, found {found}")]
    NameNotByteString { found: &'static str },
}

/// A descriptor that could not be decoded, keyed by its path.
#[derive(Debug, thiserror::Error)]
#[error("Couldn't check '{}': {cause}", .path.display())]
pub struct DecodeError {
    pub path: PathBuf,
    #[source]
    pub cause: DecodeCause,
}

impl DecodeError {
    pub fn new(path: impl Into<PathBuf>, cause: impl Into<DecodeCause>) -> Self {
        Self {
            path: path.into(),
            cause: cause.into(),
        }
    }
}

/// Read the descriptor at `path` and return its declared name.
pub fn decode_descriptor(path: &Path) -> std::result::Result<String, DecodeError> {
    let data = fs::read(path).map_err(|e| DecodeError::new(path, e))?;
    declared_name(&data).map_err(|cause| DecodeError::new(path, cause))
}

/// Extract `info.name` from raw descriptor bytes.
///
/// Invalid UTF-8 in the name is replaced, never rejected.
pub fn declared_name(data: &[u8]) -> std::result::Result<String, DecodeCause> {
    let root = bencode::decode(data)?;
    expect_dict(&root, "descriptor")?;

    let info = root.get(b"info").ok_or(DecodeCause::MissingKey("info"))?;
    expect_dict(info, "'info'")?;

    match info.get(b"name").ok_or(DecodeCause::MissingKey("name"))? {
        Value::Bytes(name) => Ok(String::from_utf8_lossy(name).into_owned()),
        other => Err(DecodeCause::NameNotByteString {
            found: other.kind(),
        }),
    }
}

fn expect_dict(value: &Value, what: &'static str) -> std::result::Result<(), DecodeCause> {
    match value {
        Value::Dict(_) => Ok(()),
        other => Err(DecodeCause::NotADictionary {
            what,
            found: other.kind(),
        }),
    }
}

/// Descriptors gathered from one or more descriptor directories.
#[derive(Debug, Default)]
pub struct DescriptorScan {
    /// Absolute paths of descriptors that decoded successfully
    pub paths: NameSet,

    /// Declared names of those descriptors
    pub names: NameSet,

    /// Descriptors that were skipped, in scan order
    pub failures: Vec<DecodeError>,
}

/// Decode every `suffix`-named regular file directly inside each of `dirs`.
///
/// Relative directories are resolved against `base`. A directory that cannot
/// be listed aborts the scan; a descriptor that cannot be decoded is recorded
/// in [`DescriptorScan::failures`] and skipped.
pub fn scan_descriptors(dirs: &[PathBuf], base: &Path, suffix: &str) -> Result<DescriptorScan> {
    info!("Getting file/folder names from torrents...");
    let mut scan = DescriptorScan::default();

    for dir in dirs {
        let listing = tm_fs::collect(dir, base)?;

        for entry in listing.files_with_suffix(suffix) {
            match decode_descriptor(&entry.path) {
                Ok(name) => {
                    debug!(path = %entry.path.display(), name = %name, "decoded descriptor");
                    scan.paths.insert(entry.path.to_string_lossy());
                    scan.names.insert(name);
                }
                Err(err) => {
                    warn!(path = %err.path.display(), cause = %err.cause, "skipping descriptor");
                    scan.failures.push(err);
                }
            }
        }
    }

    Ok(scan)
}
