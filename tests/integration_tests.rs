//! Integration tests for the Dubstage CLI surface.
//!
//! Everything here runs without a dubbing server: local validation and
//! configuration handling must settle before any network call is attempted.

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Helper to create a dubstage Command.
fn dubstage() -> Command {
    cargo_bin_cmd!("dubstage")
}

fn temp_project() -> TempDir {
    TempDir::new().unwrap()
}

mod cli_basics {
    use super::*;

    #[test]
    fn test_help() {
        dubstage().arg("--help").assert().success();
    }

    #[test]
    fn test_version() {
        dubstage().arg("--version").assert().success();
    }

    #[test]
    fn test_submit_requires_an_input() {
        let dir = temp_project();
        dubstage()
            .current_dir(dir.path())
            .args(["--server", "http://127.0.0.1:1", "submit"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("video file or --url"));
    }

    #[test]
    fn test_review_and_direct_flags_conflict() {
        let dir = temp_project();
        dubstage()
            .current_dir(dir.path())
            .args(["submit", "clip.mp4", "--review", "--direct"])
            .assert()
            .failure();
    }
}

mod local_validation {
    use super::*;

    // The --server points at an unroutable address in these tests: a pass
    // proves the rejection happened before any network call.

    #[test]
    fn test_non_video_file_is_rejected_locally() {
        let dir = temp_project();
        fs::write(dir.path().join("clip.txt"), "plain text").unwrap();
        dubstage()
            .current_dir(dir.path())
            .args(["--server", "http://127.0.0.1:1", "submit", "clip.txt"])
            .assert()
            .failure()
            .stdout(predicate::str::contains("valid video file"));
    }

    #[test]
    fn test_foreign_url_is_rejected_locally() {
        let dir = temp_project();
        dubstage()
            .current_dir(dir.path())
            .args([
                "--server",
                "http://127.0.0.1:1",
                "submit",
                "--url",
                "http://example.com",
            ])
            .assert()
            .failure()
            .stdout(predicate::str::contains("valid YouTube URL"));
    }

    #[test]
    fn test_empty_url_is_rejected_locally() {
        let dir = temp_project();
        dubstage()
            .current_dir(dir.path())
            .args(["--server", "http://127.0.0.1:1", "submit", "--url", ""])
            .assert()
            .failure()
            .stdout(predicate::str::contains("enter a YouTube URL"));
    }

    #[test]
    fn test_invalid_voice_value_is_rejected() {
        let dir = temp_project();
        dubstage()
            .current_dir(dir.path())
            .args(["submit", "clip.mp4", "--voice", "robot"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid voice"));
    }
}

mod config_command {
    use super::*;

    #[test]
    fn test_config_init_creates_file() {
        let dir = temp_project();
        dubstage()
            .current_dir(dir.path())
            .args(["config", "init"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Initialized"));
        assert!(dir.path().join("dubstage.toml").exists());
    }

    #[test]
    fn test_config_init_refuses_overwrite() {
        let dir = temp_project();
        dubstage()
            .current_dir(dir.path())
            .args(["config", "init"])
            .assert()
            .success();
        dubstage()
            .current_dir(dir.path())
            .args(["config", "init"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("already exists"));
    }

    #[test]
    fn test_config_show_defaults() {
        let dir = temp_project();
        dubstage()
            .current_dir(dir.path())
            .env_remove("DUBSTAGE_SERVER_URL")
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("http://127.0.0.1:5000"))
            .stdout(predicate::str::contains("female"))
            .stdout(predicate::str::contains("direct"));
    }

    #[test]
    fn test_config_show_reads_file_values() {
        let dir = temp_project();
        fs::write(
            dir.path().join("dubstage.toml"),
            "[server]\nurl = \"http://dubhost:9000\"\n\n[defaults]\nvoice = \"male\"\n",
        )
        .unwrap();
        dubstage()
            .current_dir(dir.path())
            .env_remove("DUBSTAGE_SERVER_URL")
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("http://dubhost:9000"))
            .stdout(predicate::str::contains("male"));
    }
}
