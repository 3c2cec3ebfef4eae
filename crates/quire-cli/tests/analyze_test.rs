//! Integration tests for the analyze command.

use std::fs;
use std::process::Command;

fn quire() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_quire"));
    command.env("RUST_LOG", "error");
    command
}

#[test]
fn test_analyze_text_file_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("story.txt");
    fs::write(&path, "Hello world, this is a test.").unwrap();

    let output = quire()
        .current_dir(dir.path())
        .args(["analyze", path.to_str().unwrap(), "--format", "json", "--show-text"])
        .output()
        .expect("Failed to run quire");

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).expect("stdout is JSON");
    assert_eq!(json["success"], true);
    assert_eq!(json["analysis"]["wordCount"], 6);
    assert_eq!(json["analysis"]["category"], "Short piece");
    assert_eq!(json["analysis"]["fileType"], "text/plain");
    assert_eq!(json["extractedText"], "Hello world, this is a test.");
}

#[test]
fn test_analyze_text_output() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.md");
    fs::write(&path, "# Notes\n\nThree more words").unwrap();

    let output = quire()
        .current_dir(dir.path())
        .args(["analyze", path.to_str().unwrap()])
        .output()
        .expect("Failed to run quire");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Words:       4"));
    assert!(stdout.contains("1 min read"));
}

#[test]
fn test_analyze_empty_file_exits_non_zero() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.txt");
    fs::write(&path, "").unwrap();

    let output = quire()
        .current_dir(dir.path())
        .args(["analyze", path.to_str().unwrap(), "--format", "json"])
        .output()
        .expect("Failed to run quire");

    assert!(!output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).expect("stdout is JSON");
    assert_eq!(json["success"], false);
    assert_eq!(json["errorKind"], "EmptyInput");
    assert_eq!(json["fileInfo"]["fileName"], "empty.txt");
    assert!(json.get("error").is_none());
}

#[test]
fn test_analyze_respects_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("strict.toml");
    fs::write(&config, "unsupported_formats = \"reject\"\n").unwrap();
    let path = dir.path().join("cover.png");
    fs::write(&path, b"\x89PNG\r\n\x1a\n").unwrap();

    let output = quire()
        .current_dir(dir.path())
        .args([
            "analyze",
            path.to_str().unwrap(),
            "-c",
            config.to_str().unwrap(),
            "--format",
            "json",
        ])
        .output()
        .expect("Failed to run quire");

    assert!(!output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).expect("stdout is JSON");
    assert_eq!(json["errorKind"], "UnsupportedFormat");
}

#[test]
fn test_analyze_missing_path_fails() {
    let output = quire()
        .args(["analyze", "/nonexistent/manuscript.txt"])
        .output()
        .expect("Failed to run quire");

    assert!(!output.status.success());
}
