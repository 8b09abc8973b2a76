//! Load-state comparison through a scripted `rtcontrol`

use std::path::Path;

use pretty_assertions::assert_eq;
use tm_client::{LoadStateSource, RtControl};
use tm_core::{Diagnostic, MatchConfig, NameSet, Snapshot};
use tm_test_utils::{MatchFixture, ScriptedRunner};

fn collect(fixture: &MatchFixture) -> Snapshot {
    Snapshot::collect(
        &fixture.data_dir(),
        &[fixture.torrent_dir()],
        Path::new("/"),
        &MatchConfig::default(),
    )
    .unwrap()
}

#[tokio::test]
async fn test_loaded_descriptors_in_sync() {
    let fixture = MatchFixture::new();
    let a = fixture.add_torrent("a.torrent", "Show.S01");
    fixture.add_data_dir("Show.S01");

    let client = RtControl::with_runner(
        ScriptedRunner::exits(0, &format!("/{}\n", a.display())),
        &MatchConfig::default(),
    );

    let mut snap = collect(&fixture);
    let loaded = client
        .query_loaded(&fixture.data_dir(), &mut snap.diagnostics)
        .await;
    let result = snap.reconcile(loaded.as_ref());

    assert_eq!(result.load_in_sync(), Some(true));
    assert!(snap.diagnostics.is_empty());
    assert!(!result.has_drift());
}

#[tokio::test]
async fn test_missing_and_extra_loaded_are_independent() {
    let fixture = MatchFixture::new();
    let a = fixture.add_torrent("a.torrent", "Show.S01");
    fixture.add_torrent("b.torrent", "Movie.2020");
    fixture.add_data_dir("Show.S01");
    fixture.add_data_dir("Movie.2020");

    let listing = format!("{}\n/elsewhere/c.torrent\n", a.display());
    let client = RtControl::with_runner(ScriptedRunner::exits(0, &listing), &MatchConfig::default());

    let mut snap = collect(&fixture);
    let loaded = client
        .query_loaded(&fixture.data_dir(), &mut snap.diagnostics)
        .await;
    let load = snap.reconcile(loaded.as_ref()).load.unwrap();

    let expected_missing: NameSet = [fixture.torrent_dir().join("b.torrent").display().to_string()]
        .into_iter()
        .collect();
    let expected_extra: NameSet = ["/elsewhere/c.torrent"].into_iter().collect();
    assert_eq!(load.missing_loaded, expected_missing);
    assert_eq!(load.extra_loaded, expected_extra);
}

#[tokio::test]
async fn test_empty_result_code_is_empty_load_state() {
    let fixture = MatchFixture::new();
    fixture.add_torrent("a.torrent", "Show.S01");
    fixture.add_data_dir("Show.S01");

    let client = RtControl::with_runner(ScriptedRunner::exits(44, ""), &MatchConfig::default());

    let mut snap = collect(&fixture);
    let loaded = client
        .query_loaded(&fixture.data_dir(), &mut snap.diagnostics)
        .await;

    assert_eq!(loaded, Some(NameSet::new()));
    let load = snap.reconcile(loaded.as_ref()).load.unwrap();
    assert_eq!(load.missing_loaded.len(), 1);
}

#[tokio::test]
async fn test_absent_tool_omits_load_comparison() {
    let fixture = MatchFixture::new();
    fixture.add_torrent("a.torrent", "Show.S01");
    fixture.add_data_dir("Show.S01");

    let client = RtControl::with_runner(ScriptedRunner::missing(), &MatchConfig::default());

    let mut snap = collect(&fixture);
    let loaded = client
        .query_loaded(&fixture.data_dir(), &mut snap.diagnostics)
        .await;
    let result = snap.reconcile(loaded.as_ref());

    assert_eq!(result.load, None);
    assert!(!result.has_drift());
    assert!(matches!(
        snap.diagnostics.as_slice(),
        [Diagnostic::LoadStateUnavailable { tool }] if tool == "rtcontrol"
    ));
}

#[tokio::test]
async fn test_failed_query_omits_load_comparison() {
    let fixture = MatchFixture::new();
    let client = RtControl::with_runner(
        ScriptedRunner::fails(1, "rTorrent is not running"),
        &MatchConfig::default(),
    );

    let mut snap = collect(&fixture);
    let loaded = client
        .query_loaded(&fixture.data_dir(), &mut snap.diagnostics)
        .await;

    assert_eq!(loaded, None);
    assert!(snap.diagnostics[0].skips_load_state());
    assert!(snap.diagnostics[0].to_string().contains("rTorrent is not running"));
}
