//! End-to-end scenarios for the reconciliation engine
//!
//! Each test lays out a data directory and descriptor directories on disk,
//! collects a snapshot and checks the reconciled sets.

use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;
use tm_core::{Diagnostic, MatchConfig, NameSet, Reconciliation, Snapshot};
use tm_test_utils::MatchFixture;

fn set(names: &[&str]) -> NameSet {
    names.iter().copied().collect()
}

fn snapshot(fixture: &MatchFixture, torrent_dirs: &[PathBuf]) -> Snapshot {
    Snapshot::collect(
        &fixture.data_dir(),
        torrent_dirs,
        Path::new("/"),
        &MatchConfig::default(),
    )
    .unwrap()
}

fn reconcile(fixture: &MatchFixture) -> Reconciliation {
    snapshot(fixture, &[fixture.torrent_dir()]).reconcile(None)
}

#[test]
fn test_declared_name_with_data_is_in_sync() {
    let fixture = MatchFixture::new();
    fixture.add_torrent("a.torrent", "Show.S01");
    fixture.add_data_dir("Show.S01");

    let result = reconcile(&fixture);
    assert!(result.missing_data.is_empty());
    assert!(result.extra_data.is_empty());
    assert!(!result.has_drift());
}

#[test]
fn test_missing_data_and_plain_extra() {
    let fixture = MatchFixture::new();
    fixture.add_torrent("b.torrent", "Movie.2020");
    fixture.add_data_dir("Leftover");
    fixture.add_data_file("notes.txt");

    let result = reconcile(&fixture);
    assert_eq!(result.missing_data, set(&["Movie.2020"]));
    assert_eq!(result.plain_extras, set(&["Leftover", "notes.txt"]));
    assert!(result.has_drift());
}

#[test]
fn test_descriptor_dirs_are_merged() {
    let fixture = MatchFixture::new();
    let second = fixture.extra_torrent_dir("more-torrents");
    fixture.add_torrent("a.torrent", "Show.S01");
    fixture.add_torrent_in(&second, "b.torrent", "Movie.2020");
    fixture.add_data_dir("Show.S01");
    fixture.add_data_dir("Movie.2020");

    let snap = snapshot(&fixture, &[fixture.torrent_dir(), second.clone()]);
    assert_eq!(snap.declared_names, set(&["Movie.2020", "Show.S01"]));
    assert_eq!(snap.descriptor_paths.len(), 2);
    assert!(!snap.reconcile(None).has_drift());
}

#[test]
fn test_undecodable_descriptor_is_skipped_with_diagnostic() {
    let fixture = MatchFixture::new();
    let broken = fixture.add_raw_torrent("broken.torrent", b"i12");
    fixture.add_raw_torrent("list.torrent", b"le");
    fixture.add_torrent("a.torrent", "Show.S01");
    fixture.add_data_dir("Show.S01");

    let snap = snapshot(&fixture, &[fixture.torrent_dir()]);
    assert_eq!(snap.declared_names, set(&["Show.S01"]));
    assert_eq!(snap.descriptor_paths.len(), 1);
    assert_eq!(snap.diagnostics.len(), 2);
    assert!(
        snap.diagnostics
            .iter()
            .all(|d| matches!(d, Diagnostic::Undecodable(_)))
    );
    assert!(
        snap.diagnostics
            .iter()
            .any(|d| d.to_string().contains(&broken.display().to_string()))
    );
    assert!(!snap.reconcile(None).has_drift());
}

#[test]
fn test_files_without_suffix_are_ignored() {
    let fixture = MatchFixture::new();
    fixture.add_raw_torrent("README", b"not a torrent");
    fixture.add_torrent("a.torrent", "Show.S01");

    let snap = snapshot(&fixture, &[fixture.torrent_dir()]);
    assert!(snap.diagnostics.is_empty());
    assert_eq!(snap.declared_names, set(&["Show.S01"]));
}

#[test]
fn test_reconcile_is_idempotent() {
    let fixture = MatchFixture::new();
    fixture.add_torrent("b.torrent", "Movie.2020");
    fixture.add_data_dir("Leftover");

    let snap = snapshot(&fixture, &[fixture.torrent_dir()]);
    let loaded = set(&["/elsewhere/x.torrent"]);
    assert_eq!(snap.reconcile(Some(&loaded)), snap.reconcile(Some(&loaded)));
    assert_eq!(snap.reconcile(None), snap.reconcile(None));
}

#[test]
fn test_missing_torrent_dir_is_fatal() {
    let fixture = MatchFixture::new();
    let result = Snapshot::collect(
        &fixture.data_dir(),
        &[fixture.root().join("gone")],
        Path::new("/"),
        &MatchConfig::default(),
    );
    assert!(result.is_err());
}

#[test]
fn test_relative_dirs_resolve_against_base() {
    let fixture = MatchFixture::new();
    fixture.add_torrent("a.torrent", "Show.S01");
    fixture.add_data_dir("Show.S01");

    let snap = Snapshot::collect(
        Path::new("data"),
        &[PathBuf::from("torrents")],
        fixture.root(),
        &MatchConfig::default(),
    )
    .unwrap();

    assert_eq!(snap.data_dir(), fixture.data_dir());
    assert!(
        snap.descriptor_paths
            .contains(&fixture.torrent_dir().join("a.torrent").display().to_string())
    );
}

#[cfg(unix)]
mod symlinks {
    use super::*;
    use pretty_assertions::assert_eq;
    use tm_core::InvalidSymlink;

    #[test]
    fn test_internal_symlink_is_valid() {
        let fixture = MatchFixture::new();
        fixture.add_data_file("realfile");
        fixture.add_data_symlink("movie", fixture.data_dir().join("realfile"));

        let result = reconcile(&fixture);
        assert_eq!(result.valid_symlinks, set(&["movie"]));
        assert_eq!(result.plain_extras, set(&["realfile"]));
        assert!(result.invalid_symlinks.is_empty());
    }

    #[test]
    fn test_relative_internal_symlink_is_valid() {
        let fixture = MatchFixture::new();
        fixture.add_torrent("a.torrent", "Show.S01");
        fixture.add_data_dir("Show.S01");
        fixture.add_data_symlink("show", "Show.S01");

        let result = reconcile(&fixture);
        assert_eq!(result.valid_symlinks, set(&["show"]));
        assert!(!result.has_drift());
    }

    #[test]
    fn test_external_symlink_is_invalid() {
        let fixture = MatchFixture::new();
        let outside = fixture.add_outside_file("realfile");
        fixture.add_data_symlink("movie", &outside);

        let result = reconcile(&fixture);
        assert_eq!(
            result.invalid_symlinks,
            vec![InvalidSymlink {
                name: "movie".into(),
                target: fixture.canonical(&outside),
            }]
        );
        assert!(result.plain_extras.is_empty());
        assert!(result.has_drift());
    }

    #[test]
    fn test_symlink_with_descriptor_is_not_classified() {
        let fixture = MatchFixture::new();
        let outside = fixture.add_outside_file("Movie.2020");
        fixture.add_torrent("b.torrent", "movie");
        fixture.add_data_symlink("movie", &outside);

        let result = reconcile(&fixture);
        assert!(result.extra_data.is_empty());
        assert!(result.invalid_symlinks.is_empty());
        assert!(!result.has_drift());
    }
}
