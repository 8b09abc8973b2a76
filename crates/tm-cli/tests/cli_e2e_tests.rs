//! CLI end-to-end tests that invoke the compiled `torrent-match` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use tm_test_utils::MatchFixture;

fn torrent_match(fixture: &MatchFixture) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_torrent-match"));
    cmd.current_dir(fixture.root())
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1")
        .env("TORRENT_MATCH_RTCONTROL", "torrent-match-no-such-rtcontrol");
    cmd
}

#[test]
fn test_help_exits_zero() {
    Command::new(env!("CARGO_BIN_EXE_torrent-match"))
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--rtorrent"))
        .stdout(predicate::str::contains("TORRENT_DIRS"));
}

#[test]
fn test_version_exits_zero() {
    Command::new(env!("CARGO_BIN_EXE_torrent-match"))
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("torrent-match "));
}

#[test]
fn test_missing_torrent_dir_argument_is_usage_error() {
    Command::new(env!("CARGO_BIN_EXE_torrent-match"))
        .arg("data")
        .assert()
        .code(2);
}

#[test]
fn test_in_sync_exits_zero() {
    let fixture = MatchFixture::new();
    fixture.add_torrent("a.torrent", "Show.S01");
    fixture.add_data_dir("Show.S01");

    torrent_match(&fixture)
        .args(["data", "torrents"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Analysis complete"))
        .stdout(predicate::str::contains(
            "Data files/folders are in sync with the torrent files",
        ));
}

#[test]
fn test_drift_exits_one_and_lists_names() {
    let fixture = MatchFixture::new();
    fixture.add_torrent("b.torrent", "Movie.2020");
    fixture.add_data_dir("Leftover");

    torrent_match(&fixture)
        .args(["data", "torrents"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains(
            "The following folders don't have a matching torrent:\n  Leftover",
        ))
        .stdout(predicate::str::contains(
            "(were they renamed?):\n  Movie.2020",
        ));
}

#[test]
fn test_missing_data_dir_exits_two() {
    let fixture = MatchFixture::new();

    torrent_match(&fixture)
        .args(["no-such-data", "torrents"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_undecodable_descriptor_is_reported_and_skipped() {
    let fixture = MatchFixture::new();
    fixture.add_raw_torrent("broken.torrent", b"d4:name");
    fixture.add_torrent("a.torrent", "Show.S01");
    fixture.add_data_dir("Show.S01");

    torrent_match(&fixture)
        .args(["data", "torrents"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Couldn't check"))
        .stdout(predicate::str::contains("broken.torrent"));
}

#[test]
fn test_rtorrent_without_tool_still_reports() {
    let fixture = MatchFixture::new();
    fixture.add_torrent("a.torrent", "Show.S01");
    fixture.add_data_dir("Show.S01");

    torrent_match(&fixture)
        .args(["--rtorrent", "data", "torrents"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "'torrent-match-no-such-rtcontrol' not found, not analyzing rTorrent data",
        ))
        .stdout(predicate::str::contains("in sync with rTorrent").not());
}

#[test]
fn test_json_output() {
    let fixture = MatchFixture::new();
    fixture.add_torrent("b.torrent", "Movie.2020");

    let output = torrent_match(&fixture)
        .args(["--json", "data", "torrents"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["in_sync"], false);
    assert_eq!(report["missing_data"], serde_json::json!(["Movie.2020"]));
}

#[cfg(unix)]
mod with_fake_rtcontrol {
    use super::*;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use std::path::Path;

    fn install_script(dir: &Path, body: &str) -> String {
        let path = dir.join("rtcontrol");
        fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path.display().to_string()
    }

    #[test]
    fn test_loaded_descriptors_match() {
        let fixture = MatchFixture::new();
        let descriptor = fixture.add_torrent("a.torrent", "Show.S01");
        fixture.add_data_dir("Show.S01");
        let script = install_script(
            fixture.root(),
            &format!("echo '/{}'", descriptor.display()),
        );

        torrent_match(&fixture)
            .env("TORRENT_MATCH_RTCONTROL", script)
            .args(["-r", "data", "torrents"])
            .assert()
            .success()
            .stdout(predicate::str::contains(
                "Torrent files are in sync with rTorrent",
            ));
    }

    #[test]
    fn test_empty_result_code_means_nothing_loaded() {
        let fixture = MatchFixture::new();
        let descriptor = fixture.add_torrent("a.torrent", "Show.S01");
        fixture.add_data_dir("Show.S01");
        let script = install_script(fixture.root(), "exit 44");

        torrent_match(&fixture)
            .env("TORRENT_MATCH_RTCONTROL", script)
            .args(["-r", "data", "torrents"])
            .assert()
            .code(1)
            .stdout(predicate::str::contains("aren't loaded in rTorrent:"))
            .stdout(predicate::str::contains(descriptor.display().to_string()));
    }

    #[test]
    fn test_failing_tool_skips_load_comparison() {
        let fixture = MatchFixture::new();
        fixture.add_torrent("a.torrent", "Show.S01");
        fixture.add_data_dir("Show.S01");
        let script = install_script(fixture.root(), "echo 'connection refused' >&2; exit 3");

        torrent_match(&fixture)
            .env("TORRENT_MATCH_RTCONTROL", script)
            .args(["-r", "data", "torrents"])
            .assert()
            .success()
            .stdout(predicate::str::contains(
                "Couldn't get torrent listing from rTorrent (exit code 3)",
            ))
            .stdout(predicate::str::contains("connection refused"));
    }
}
