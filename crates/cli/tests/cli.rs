//! End-to-end tests driving the `aimed` binary

use std::io::Write;

use aimed_common::{Issue, ValidationResult};
use assert_cmd::Command;
use axum::{body::Bytes, http::header, http::StatusCode, routing::post, Router};

const VALID_REPORT: &str = "\
DATUM PREGLEDA
01.01.2024
PODACI O PACIJENTU
Marko Marković
ANAMNEZA
Bez tegoba
";

fn aimed() -> Command {
    let mut cmd = Command::cargo_bin("aimed").expect("bin");
    cmd.env_remove("AIMED_WEBHOOK_URL")
        .env_remove("AIMED_VALIDATOR_CONFIG")
        .env_remove("RUST_LOG");
    cmd
}

fn report_file(text: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
    file.write_all(text.as_bytes()).unwrap();
    file
}

#[test]
fn validate_file_passes() {
    let file = report_file(VALID_REPORT);
    let output = aimed()
        .args(["--format", "plain", "validate"])
        .arg(file.path())
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with("Validation: PASS\n"));
    assert!(stdout.contains("Sections found (3): DATUM PREGLEDA, PODACI O PACIJENTU, ANAMNEZA"));
    assert!(stdout.contains("Bosnian diacritics: Yes"));
}

#[test]
fn validate_stdin_two_sections_fails() {
    let output = aimed()
        .args(["--format", "plain", "validate"])
        .write_stdin("STATUS\ntext\nDIJAGNOZA\n")
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with("Validation: FAIL\n"));
    assert!(stdout.contains("Empty sections: DIJAGNOZA"));
    assert!(stdout.contains("  - Only 2 sections found (minimum 3)"));
}

#[test]
fn validate_empty_stdin_fails() {
    let output = aimed()
        .args(["--format", "json", "validate"])
        .write_stdin("")
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let result: ValidationResult = serde_json::from_slice(&output.stdout).unwrap();
    assert!(!result.is_valid);
    assert_eq!(result.issues, vec![Issue::EmptyInput]);
}

#[test]
fn validate_json_output_parses() {
    let file = report_file(VALID_REPORT);
    let output = aimed()
        .args(["--format", "json", "validate"])
        .arg(file.path())
        .output()
        .unwrap();
    assert!(output.status.success());
    let result: ValidationResult = serde_json::from_slice(&output.stdout).unwrap();
    assert!(result.is_valid);
    assert!(result.has_diacritics);
    assert_eq!(result.sections_missing.len(), 4);
}

#[test]
fn validate_missing_file_errors() {
    let dir = tempfile::TempDir::new().unwrap();
    let output = aimed()
        .arg("validate")
        .arg(dir.path().join("absent.txt"))
        .output()
        .unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Failed to read"));
}

#[test]
fn config_file_lowers_minimum() {
    let config = report_file("min_sections = 1\n");
    let output = aimed()
        .arg("--config")
        .arg(config.path())
        .args(["--format", "plain", "validate"])
        .write_stdin("ANAMNEZA\nBez tegoba, uredan nalaz čćš\n")
        .output()
        .unwrap();
    assert!(output.status.success());
}

#[test]
fn invalid_config_file_errors() {
    let config = report_file("warning_marker = \"\"\n");
    let output = aimed()
        .arg("--config")
        .arg(config.path())
        .arg("validate")
        .write_stdin(VALID_REPORT)
        .output()
        .unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("warning_marker"));
}

#[test]
fn lowercase_checklist_entry_errors() {
    let config = report_file("expected_sections = [\"Anamneza\"]\n");
    let output = aimed()
        .arg("--config")
        .arg(config.path())
        .arg("validate")
        .write_stdin(VALID_REPORT)
        .output()
        .unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Anamneza"));
}

#[test]
fn webhook_help_shows_default_timeout() {
    let output = aimed().args(["webhook", "--help"]).output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("[default: 120]"));
}

#[test]
fn config_default_prints_toml() {
    let output = aimed().args(["config", "--default"]).output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("min_sections = 3"));
    assert!(stdout.contains("duplicate_policy = \"replace\""));
    assert!(stdout.contains("PREPORUKE / KONTROLA"));
}

#[test]
fn webhook_requires_url() {
    let audio = report_file("audio");
    let output = aimed().arg("webhook").arg(audio.path()).output().unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("AIMED_WEBHOOK_URL"));
}

#[test]
fn webhook_missing_audio_file() {
    let dir = tempfile::TempDir::new().unwrap();
    let output = aimed()
        .arg("webhook")
        .arg(dir.path().join("missing.webm"))
        .arg("http://127.0.0.1:9/webhook")
        .output()
        .unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("File not found"));
}

#[tokio::test(flavor = "multi_thread")]
async fn webhook_round_trip_with_validation() {
    let app = Router::new().route(
        "/webhook/AIMED",
        post(|_body: Bytes| async {
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                r#"{"success": true, "report_text": "ANAMNEZA\nŽali se na kašalj\nSTATUS\nUredan\nDIJAGNOZA\nJ20.9 Akutni bronhitis\n[NAPOMENA: provjeriti]"}"#,
            )
        }),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let audio = tempfile::Builder::new().suffix(".webm").tempfile().unwrap();
    std::fs::write(audio.path(), b"fake-webm").unwrap();
    let audio_path = audio.path().to_path_buf();
    let url = format!("http://{}/webhook/AIMED", addr);

    let output = tokio::task::spawn_blocking(move || {
        aimed()
            .args(["--format", "json", "webhook", "--validate"])
            .arg(&audio_path)
            .env("AIMED_WEBHOOK_URL", url)
            .output()
            .unwrap()
    })
    .await
    .unwrap();

    assert!(output.status.success());
    let summary: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(summary["status"], 200);
    assert_eq!(summary["success"], true);
    assert_eq!(summary["validation"]["is_valid"], true);
    assert_eq!(summary["validation"]["warnings"][0], "[NAPOMENA: provjeriti]");
}

#[tokio::test(flavor = "multi_thread")]
async fn webhook_server_error_exits_nonzero() {
    let app = Router::new().route(
        "/hook",
        post(|_body: Bytes| async { (StatusCode::BAD_GATEWAY, "upstream timeout") }),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let audio = tempfile::Builder::new().suffix(".wav").tempfile().unwrap();
    std::fs::write(audio.path(), b"RIFF").unwrap();
    let audio_path = audio.path().to_path_buf();
    let url = format!("http://{}/hook", addr);

    let output = tokio::task::spawn_blocking(move || {
        aimed()
            .args(["--format", "plain", "webhook"])
            .arg(&audio_path)
            .arg(url)
            .output()
            .unwrap()
    })
    .await
    .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("Status: 502"));
    assert!(stdout.contains("HTTP ERROR: 502"));
    assert!(stdout.contains("upstream timeout"));
}
