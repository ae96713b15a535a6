//! CLI tests against a mock homeserver.
//!
//! Each test runs the built binary with its own session file, so tests do
//! not touch the user's real session.

use std::path::Path;
use std::process::Output;

use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{body_json, header, method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

const LOGIN_PATH: &str = "/_matrix/client/v3/login";
const SEND_ABC: &str = r"^/_matrix/client/v3/rooms/!abc:x/send/m\.room\.message/[0-9a-f-]{36}$";

/// Run the CLI binary against `server` with an isolated session file.
async fn run_cli(args: &[&str], server: &MockServer, session: &Path) -> Output {
    tokio::process::Command::new(env!("CARGO_BIN_EXE_mxsend"))
        .args(args)
        .env_remove("RUST_LOG")
        .env("MXSEND_SERVER", server.uri())
        .env("MXSEND_USER", "alice")
        .env("MXSEND_PASSWORD", "secret123")
        .env("MXSEND_SESSION_FILE", session)
        .output()
        .await
        .expect("Failed to execute CLI")
}

/// Run the CLI and expect success, returning stdout.
async fn run_cli_success(args: &[&str], server: &MockServer, session: &Path) -> String {
    let output = run_cli(args, server, session).await;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!("CLI command failed: {:?}\nstderr: {}", args, stderr);
    }
    String::from_utf8_lossy(&output.stdout).to_string()
}

async fn mount_login(server: &MockServer, expected_calls: u64) {
    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .and(body_json(json!({
            "type": "m.login.password",
            "user": "alice",
            "password": "secret123"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user_id": "@alice:x",
            "access_token": "cli-token",
            "device_id": "CLIDEVICE"
        })))
        .expect(expected_calls)
        .mount(server)
        .await;
}

fn session_file(dir: &TempDir) -> std::path::PathBuf {
    dir.path().join("session.json")
}

#[tokio::test]
async fn test_login_stores_session() {
    let server = MockServer::start().await;
    mount_login(&server, 1).await;

    let dir = tempfile::tempdir().unwrap();
    let session = session_file(&dir);

    let stdout = run_cli_success(&["login"], &server, &session).await;
    assert!(stdout.contains("CLIDEVICE"));

    let stored: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&session).unwrap()).unwrap();
    assert_eq!(stored["access_token"], "cli-token");
    assert_eq!(stored["device_id"], "CLIDEVICE");
}

#[tokio::test]
async fn test_login_replaces_existing_session() {
    let server = MockServer::start().await;
    mount_login(&server, 1).await;

    let dir = tempfile::tempdir().unwrap();
    let session = session_file(&dir);
    std::fs::write(&session, r#"{"access_token":"old-token"}"#).unwrap();

    run_cli_success(&["login"], &server, &session).await;

    let stored: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&session).unwrap()).unwrap();
    assert_eq!(stored["access_token"], "cli-token");
}

#[tokio::test]
async fn test_rejected_login_keeps_existing_session() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let session = session_file(&dir);
    std::fs::write(&session, r#"{"access_token":"old-token"}"#).unwrap();

    let output = run_cli(&["login"], &server, &session).await;
    assert!(!output.status.success());

    let stored: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&session).unwrap()).unwrap();
    assert_eq!(stored["access_token"], "old-token");
}

#[tokio::test]
async fn test_send_text_reuses_stored_session() {
    let server = MockServer::start().await;
    mount_login(&server, 1).await;

    Mock::given(method("PUT"))
        .and(path_regex(SEND_ABC))
        .and(header("authorization", "Bearer cli-token"))
        .and(body_json(json!({"msgtype": "m.text", "body": "hello"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"event_id": "$e1"})))
        .expect(2)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let session = session_file(&dir);

    let first = run_cli_success(&["send-text", "!abc:x", "hello"], &server, &session).await;
    let second = run_cli_success(&["send-text", "!abc:x", "hello"], &server, &session).await;

    assert!(first.contains("$e1"));
    assert!(second.contains("$e1"));
}

#[tokio::test]
async fn test_upload_prints_content_uri() {
    let server = MockServer::start().await;
    mount_login(&server, 1).await;

    Mock::given(method("POST"))
        .and(path("/_matrix/media/v3/upload"))
        .and(header("content-type", "text/plain"))
        .and(header("content-length", "5"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"content_uri": "mxc://x/file"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(path_regex(SEND_ABC))
        .and(body_json(json!({
            "msgtype": "m.file",
            "body": "notes",
            "filename": "notes.txt",
            "url": "mxc://x/file"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"event_id": "$f"})))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let session = session_file(&dir);
    let file = dir.path().join("notes.txt");
    std::fs::write(&file, "hello").unwrap();

    let stdout = run_cli_success(
        &[
            "upload",
            file.to_str().unwrap(),
            "--content-type",
            "text/plain",
            "--send-to",
            "!abc:x",
            "--caption",
            "notes",
        ],
        &server,
        &session,
    )
    .await;

    assert!(stdout.contains("mxc://x/file"));
}

#[tokio::test]
async fn test_logout_removes_session() {
    let server = MockServer::start().await;
    mount_login(&server, 1).await;

    let dir = tempfile::tempdir().unwrap();
    let session = session_file(&dir);

    run_cli_success(&["login"], &server, &session).await;
    assert!(session.exists());

    run_cli_success(&["logout"], &server, &session).await;
    assert!(!session.exists());

    let output = run_cli(&["status"], &server, &session).await;
    assert!(!output.status.success());
}

#[tokio::test]
async fn test_invalid_room_is_rejected_before_login() {
    let server = MockServer::start().await;
    mount_login(&server, 0).await;

    let dir = tempfile::tempdir().unwrap();
    let output = run_cli(&["send-text", "not-a-room", "hi"], &server, &session_file(&dir)).await;

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid room id"));
}

#[tokio::test]
async fn test_version_is_reported() {
    let output = tokio::process::Command::new(env!("CARGO_BIN_EXE_mxsend"))
        .arg("--version")
        .output()
        .await
        .expect("Failed to execute CLI");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let version = stdout.trim().strip_prefix("mxsend ").unwrap_or_default();
    assert!(!version.is_empty(), "unexpected version output: {stdout}");
}
