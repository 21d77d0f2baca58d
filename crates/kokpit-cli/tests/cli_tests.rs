#[path = "../../kokpit-core/tests/common/stub_server.rs"]
#[allow(dead_code)]
mod stub_server;

use assert_cmd::Command;
use predicates::prelude::*;
use stub_server::StubServer;
use tempfile::TempDir;

const STORY_JSON: &str = r#"{"id": 31, "project_id": 7, "as_a": "customer", "i_want_to": "export invoices", "so_that": "reconcile accounts", "acceptance_criteria": "When export clicked, a CSV downloads", "priority": "medium", "story_points": null, "notes": "", "status": "draft", "version": 1}"#;

/// Helper function to create a temporary directory for CLI tests
fn create_cli_test_environment() -> TempDir {
    TempDir::new().expect("Failed to create temporary directory")
}

/// Command with plain output and no ambient configuration
fn kokpit_cmd(temp_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("kokpit").expect("Failed to find kokpit binary");
    cmd.env_remove("KOKPIT_API_URL")
        .env_remove("KOKPIT_TOKEN")
        .arg("--no-color")
        .arg("--config-file")
        .arg(temp_dir.path().join("config.json"));
    cmd
}

#[test]
fn test_cli_help_lists_story_command() {
    let temp_dir = create_cli_test_environment();

    kokpit_cmd(&temp_dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("story"));
}

#[test]
fn test_cli_preview_renders_offline() {
    let temp_dir = create_cli_test_environment();

    kokpit_cmd(&temp_dir)
        .args([
            "--base-url",
            "http://127.0.0.1:9/api",
            "story",
            "preview",
            "--as-a",
            "customer",
            "-c",
            "CSV downloads",
            "--points",
            "5",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("**As a** customer"))
        .stdout(predicate::str::contains("**I want to** _action or feature_"))
        .stdout(predicate::str::contains("- CSV downloads"))
        .stdout(predicate::str::contains("`Medium`"))
        .stdout(predicate::str::contains("`5 SP`"));
}

#[test]
fn test_cli_preview_rejects_oversized_attachment() {
    let temp_dir = create_cli_test_environment();
    let big = temp_dir.path().join("huge.bin");
    let file = std::fs::File::create(&big).unwrap();
    file.set_len(10 * 1024 * 1024 + 1).unwrap();
    let small = temp_dir.path().join("notes.txt");
    std::fs::write(&small, "hello").unwrap();

    kokpit_cmd(&temp_dir)
        .args(["story", "preview", "-f"])
        .arg(&big)
        .arg("-f")
        .arg(&small)
        .assert()
        .success()
        .stderr(predicate::str::contains(
            "File huge.bin is too large (max 10 MB)",
        ))
        .stdout(predicate::str::contains("Attachments: notes.txt"))
        .stdout(predicate::str::contains("huge.bin").not());
}

#[test]
fn test_cli_points_out_of_range_rejected() {
    let temp_dir = create_cli_test_environment();

    kokpit_cmd(&temp_dir)
        .args(["story", "preview", "--points", "0"])
        .assert()
        .failure();

    kokpit_cmd(&temp_dir)
        .args(["story", "preview", "--points", "101"])
        .assert()
        .failure();
}

#[test]
fn test_cli_invalid_status_rejected() {
    let temp_dir = create_cli_test_environment();

    kokpit_cmd(&temp_dir)
        .args(["story", "list", "7", "--status", "finished"])
        .assert()
        .failure();
}

#[test]
fn test_cli_malformed_config_file() {
    let temp_dir = create_cli_test_environment();
    std::fs::write(temp_dir.path().join("config.json"), "{ not json").unwrap();

    kokpit_cmd(&temp_dir)
        .args(["story", "list", "7"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn test_cli_unreachable_backend_keeps_story_unsaved() {
    let temp_dir = create_cli_test_environment();

    kokpit_cmd(&temp_dir)
        .args([
            "--base-url",
            "http://127.0.0.1:9/api",
            "story",
            "new",
            "7",
            "--as-a",
            "customer",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Story was not saved"));
}

#[test]
fn test_cli_edit_screens_attachments_before_loading_story() {
    let temp_dir = create_cli_test_environment();
    let big = temp_dir.path().join("huge.bin");
    let file = std::fs::File::create(&big).unwrap();
    file.set_len(10 * 1024 * 1024 + 1).unwrap();

    kokpit_cmd(&temp_dir)
        .args([
            "--base-url",
            "http://127.0.0.1:9/api",
            "story",
            "edit",
            "7",
            "31",
            "-f",
        ])
        .arg(&big)
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "File huge.bin is too large (max 10 MB)",
        ))
        .stderr(predicate::str::contains("Failed to load story 31"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_cli_new_story_saves_and_shows_detail() {
    let temp_dir = create_cli_test_environment();
    let server = StubServer::start(vec![(201, STORY_JSON), (200, STORY_JSON), (200, "[]")]).await;

    kokpit_cmd(&temp_dir)
        .args([
            "--base-url",
            server.base_url.as_str(),
            "story",
            "new",
            "7",
            "--as-a",
            "customer",
            "--i-want-to",
            "export invoices",
            "--so-that",
            "reconcile accounts",
            "-c",
            "When export clicked, a CSV downloads",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Success: Story created"))
        .stdout(predicate::str::contains("# Story #31"))
        .stdout(predicate::str::contains("No attachments."));

    let requests = server.requests();
    assert_eq!(requests.len(), 3);
    assert_eq!(requests[0].method, "POST");
    assert_eq!(requests[0].path, "/api/projects/7/stories");
    assert_eq!(requests[1].path, "/api/stories/31");
    assert_eq!(requests[2].path, "/api/stories/31/attachments");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_cli_partial_upload_is_reported() {
    let temp_dir = create_cli_test_environment();
    let first = temp_dir.path().join("a.txt");
    std::fs::write(&first, "first").unwrap();
    let second = temp_dir.path().join("b.txt");
    std::fs::write(&second, "second").unwrap();
    let server = StubServer::start(vec![
        (201, STORY_JSON),
        (201, r#"{"id": 5, "filename": "a.txt", "size": 5}"#),
        (500, r#"{"detail": "disk full"}"#),
        (200, STORY_JSON),
        (200, r#"[{"id": 5, "filename": "a.txt", "size": 5}]"#),
    ])
    .await;

    kokpit_cmd(&temp_dir)
        .args(["--base-url", server.base_url.as_str(), "story", "new", "7", "-f"])
        .arg(&first)
        .arg("-f")
        .arg(&second)
        .assert()
        .success()
        .stdout(predicate::str::contains("Success: 1 attachment(s) uploaded"))
        .stdout(predicate::str::contains("a.txt"))
        .stderr(predicate::str::contains("Failed to upload b.txt"))
        .stderr(predicate::str::contains(
            "Story saved, but some attachments were not uploaded",
        ));

    let uploads = server
        .requests()
        .into_iter()
        .filter(|request| request.method == "POST" && request.path.ends_with("/attachments"))
        .count();
    assert_eq!(uploads, 2);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_cli_validation_error_shows_server_message_once() {
    let temp_dir = create_cli_test_environment();
    let server = StubServer::start(vec![(422, r#"{"detail": "as_a must not be empty"}"#)]).await;

    kokpit_cmd(&temp_dir)
        .args(["--base-url", server.base_url.as_str(), "story", "new", "7"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: as_a must not be empty"))
        .stderr(predicate::str::contains("as_a must not be empty").count(1))
        .stderr(predicate::str::contains("Story was not saved"));
}
