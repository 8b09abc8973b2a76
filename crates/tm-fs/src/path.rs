//! Path normalization and best-effort symlink resolution
//!
//! Everything here works on explicit inputs. Relative paths are made absolute
//! against a caller-supplied base, never against the process working directory.

use std::collections::VecDeque;
use std::ffi::OsString;
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Maximum number of symlinks followed while resolving a single path.
pub const MAX_LINK_HOPS: usize = 40;

/// Lexically normalize a path.
///
/// Drops `.` components, folds `..` into the preceding normal component and
/// collapses repeated separators. The filesystem is never consulted, so a
/// `..` that follows a symlink is folded the same way `os.path.normpath`
/// would. Leading `..` components of a relative path are preserved, and `..`
/// directly under the root is discarded.
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out: Vec<Component<'_>> = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.last() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(component),
            },
            other => out.push(other),
        }
    }

    if out.is_empty() {
        return PathBuf::from(".");
    }
    out.iter().collect()
}

/// Make `path` absolute against `base` and normalize it lexically.
///
/// `base` is expected to be absolute already; an absolute `path` ignores it.
pub fn absolutize(path: &Path, base: &Path) -> PathBuf {
    if path.is_absolute() {
        normalize_lexically(path)
    } else {
        normalize_lexically(&base.join(path))
    }
}

/// Resolve `path` to a canonical absolute path, following every symlink.
///
/// Unlike [`std::fs::canonicalize`] this never fails: when a component is
/// missing (a dangling link, a deleted target) the remaining components are
/// appended as they are, after any links seen so far have been followed.
/// Link cycles stop after [`MAX_LINK_HOPS`] and keep the unresolved component.
///
/// `path` should be absolute; a relative path is resolved component by
/// component starting from an empty prefix.
pub fn resolve_best_effort(path: &Path) -> PathBuf {
    if let Ok(canonical) = dunce::canonicalize(path) {
        return canonical;
    }

    let mut pending: VecDeque<Step> = steps(path).into();
    let mut resolved = PathBuf::new();
    let mut hops = 0;

    while let Some(step) = pending.pop_front() {
        match step {
            Step::Root(root) => resolved.push(root),
            Step::Parent => {
                resolved.pop();
            }
            Step::Name(name) => {
                let candidate = resolved.join(&name);
                let is_link = fs::symlink_metadata(&candidate)
                    .map(|meta| meta.file_type().is_symlink())
                    .unwrap_or(false);

                if !is_link || hops >= MAX_LINK_HOPS {
                    resolved = candidate;
                    continue;
                }

                match fs::read_link(&candidate) {
                    Ok(target) => {
                        hops += 1;
                        if target.is_absolute() {
                            resolved = PathBuf::new();
                        }
                        for step in steps(&target).into_iter().rev() {
                            pending.push_front(step);
                        }
                    }
                    Err(_) => resolved = candidate,
                }
            }
        }
    }

    tracing::debug!(
        path = %path.display(),
        resolved = %resolved.display(),
        hops,
        "resolved path without canonicalize"
    );
    resolved
}

/// Compute `path` relative to `base`.
///
/// Both inputs should be absolute and normalized. Components of `base` that
/// are not shared with `path` become `..`; identical inputs yield `.`.
pub fn relative_to(path: &Path, base: &Path) -> PathBuf {
    let path: Vec<Component<'_>> = path.components().collect();
    let base: Vec<Component<'_>> = base.components().collect();

    let common = path
        .iter()
        .zip(&base)
        .take_while(|(a, b)| a == b)
        .count();

    // A different root or drive cannot be expressed with `..`.
    if common == 0 && (path.first().is_some_and(is_anchor) || base.first().is_some_and(is_anchor)) {
        return path.iter().collect();
    }

    let mut relative = PathBuf::new();
    for _ in common..base.len() {
        relative.push("..");
    }
    for component in &path[common..] {
        relative.push(component);
    }

    if relative.as_os_str().is_empty() {
        relative.push(".");
    }
    relative
}

/// Whether a path produced by [`relative_to`] stays inside its base.
///
/// Any `..` component, or an anchored (absolute) result, means the original
/// path escapes the base directory.
pub fn stays_inside(relative: &Path) -> bool {
    !relative.components().any(|component| {
        matches!(
            component,
            Component::ParentDir | Component::RootDir | Component::Prefix(_)
        )
    })
}

fn is_anchor(component: &Component<'_>) -> bool {
    matches!(component, Component::RootDir | Component::Prefix(_))
}

/// One owned unit of work for [`resolve_best_effort`].
enum Step {
    Root(OsString),
    Parent,
    Name(OsString),
}

fn steps(path: &Path) -> Vec<Step> {
    path.components()
        .filter_map(|component| match component {
            Component::Prefix(_) | Component::RootDir => {
                Some(Step::Root(component.as_os_str().to_os_string()))
            }
            Component::CurDir => None,
            Component::ParentDir => Some(Step::Parent),
            Component::Normal(name) => Some(Step::Name(name.to_os_string())),
        })
        .collect()
}
