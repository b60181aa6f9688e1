//! Integration tests for the `zia` CLI binary.
//!
//! Argument parsing, the offline catalog commands, and an apply/show/destroy
//! cycle against a mocked ZIA API. Nothing touches the user's real config.
#![allow(clippy::unwrap_used)]

use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `zia` binary with env isolation: every
/// `ZIA_*` variable cleared, config and state inside `dir`.
fn zia_cmd(dir: &Path) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("zia");
    cmd.env("HOME", dir)
        .env("XDG_CONFIG_HOME", dir)
        .env("ZIA_CONFIG", dir.join("config.toml"))
        .env("ZIA_STATE", dir.join("zia.state.json"))
        .env_remove("ZIA_PROFILE")
        .env_remove("ZIA_BASE_URL")
        .env_remove("ZIA_OUTPUT")
        .env_remove("ZIA_TIMEOUT")
        .env_remove("ZIA_CLOUD")
        .env_remove("ZIA_USERNAME")
        .env_remove("ZIA_PASSWORD")
        .env_remove("ZIA_API_KEY")
        .env_remove("ZIA_ACTIVATION")
        .env_remove("RUST_LOG");
    cmd
}

/// Same, with credentials and a mock base URL.
fn session_cmd(dir: &Path, server: &MockServer) -> assert_cmd::Command {
    let mut cmd = zia_cmd(dir);
    cmd.env("ZIA_BASE_URL", format!("{}/api/v1/", server.uri()))
        .env("ZIA_USERNAME", "admin@example.com")
        .env("ZIA_PASSWORD", "hunter2")
        .env("ZIA_API_KEY", "abcdefghijkl");
    cmd
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

fn read_state(dir: &Path) -> Value {
    let raw = std::fs::read_to_string(dir.join("zia.state.json")).unwrap();
    serde_json::from_str(&raw).unwrap()
}

async fn mount_session(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/api/v1/authenticatedSession"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"authType": "ADMIN_LOGIN"})))
        .mount(server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/v1/authenticatedSession"))
        .respond_with(ResponseTemplate::new(204))
        .mount(server)
        .await;
}

fn label_body(id: i64, name: &str) -> Value {
    json!({"id": id, "name": name, "description": "managed", "referencedRuleCount": 0})
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let dir = tempfile::tempdir().unwrap();
    let output = zia_cmd(dir.path()).output().unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("Usage"));
}

#[test]
fn test_help_lists_lifecycle_commands() {
    let dir = tempfile::tempdir().unwrap();
    zia_cmd(dir.path()).arg("--help").assert().success().stdout(
        predicate::str::contains("apply")
            .and(predicate::str::contains("import"))
            .and(predicate::str::contains("destroy"))
            .and(predicate::str::contains("data-sources")),
    );
}

#[test]
fn test_completions_zsh() {
    let dir = tempfile::tempdir().unwrap();
    zia_cmd(dir.path())
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

// ── Offline catalog ─────────────────────────────────────────────────

#[test]
fn test_resources_plain_lists_every_type() {
    let dir = tempfile::tempdir().unwrap();
    let output = zia_cmd(dir.path())
        .args(["-o", "plain", "resources"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let types: Vec<&str> = stdout.lines().collect();
    assert_eq!(types.len(), 16);
    assert!(types.contains(&"zia_firewall_filtering_rule"));
    assert!(types.contains(&"zia_activation_status"));
}

#[test]
fn test_data_sources_json() {
    let dir = tempfile::tempdir().unwrap();
    let output = zia_cmd(dir.path())
        .args(["-o", "json", "data-sources"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let parsed: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed.as_array().unwrap().len(), 20);
}

#[test]
fn test_schema_table_shows_attributes() {
    let dir = tempfile::tempdir().unwrap();
    zia_cmd(dir.path())
        .args(["schema", "zia_traffic_forwarding_vpn_credentials"])
        .assert()
        .success()
        .stdout(predicate::str::contains("pre_shared_key").and(predicate::str::contains("required")));
}

#[test]
fn test_schema_unknown_type() {
    let dir = tempfile::tempdir().unwrap();
    zia_cmd(dir.path())
        .args(["schema", "zia_nope"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("zia_nope"));
}

#[test]
fn test_show_empty_state() {
    let dir = tempfile::tempdir().unwrap();
    zia_cmd(dir.path()).args(["-o", "plain", "show"]).assert().success();
}

#[test]
fn test_config_show_without_file() {
    let dir = tempfile::tempdir().unwrap();
    zia_cmd(dir.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("default_profile"));
}

// ── Error cases ─────────────────────────────────────────────────────

#[test]
fn test_missing_credentials_exit_code() {
    let dir = tempfile::tempdir().unwrap();
    zia_cmd(dir.path())
        .args(["--base-url", "http://127.0.0.1:9/api/v1/", "status"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("username"));
}

#[test]
fn test_missing_profile_is_usage_error() {
    let dir = tempfile::tempdir().unwrap();
    zia_cmd(dir.path())
        .args(["--profile", "lab", "status"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("lab"));
}

#[test]
fn test_invalid_output_format() {
    let dir = tempfile::tempdir().unwrap();
    let output = zia_cmd(dir.path())
        .args(["--output", "invalid", "resources"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(combined_output(&output).contains("invalid"));
}

// ── Session-bound commands against a mock API ───────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_apply_show_destroy_cycle() {
    let server = MockServer::start().await;
    mount_session(&server).await;

    Mock::given(method("POST"))
        .and(path("/api/v1/ruleLabels"))
        .and(body_partial_json(json!({"name": "web"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(label_body(7, "web")))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/ruleLabels/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(label_body(7, "web")))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/v1/ruleLabels/7"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("web.json");
    std::fs::write(&file, r#"{"name": "web", "description": "managed"}"#).unwrap();

    session_cmd(dir.path(), &server)
        .args(["-o", "plain", "apply", "zia_rule_labels", "web", "-f"])
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::diff("7\n"));

    let state = read_state(dir.path());
    assert_eq!(state["resources"]["zia_rule_labels.web"]["id"], json!("7"));
    assert_eq!(
        state["resources"]["zia_rule_labels.web"]["attributes"]["name"],
        json!("web")
    );

    zia_cmd(dir.path())
        .args(["-o", "json", "show", "zia_rule_labels.web"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"description\": \"managed\""));

    session_cmd(dir.path(), &server)
        .args(["-y", "destroy", "zia_rule_labels", "web"])
        .assert()
        .success();

    let state = read_state(dir.path());
    assert_eq!(state["resources"], json!({}));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_destroy_requires_yes_without_terminal() {
    let server = MockServer::start().await;
    mount_session(&server).await;

    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("zia.state.json"),
        r#"{"version": 1, "resources": {"zia_rule_labels.web": {"id": "7", "attributes": {"name": "web"}}}}"#,
    )
    .unwrap();

    session_cmd(dir.path(), &server)
        .args(["destroy", "zia_rule_labels", "web"])
        .write_stdin("")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--yes"));

    let state = read_state(dir.path());
    assert_eq!(state["resources"]["zia_rule_labels.web"]["id"], json!("7"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_data_source_by_name() {
    let server = MockServer::start().await;
    mount_session(&server).await;

    Mock::given(method("GET"))
        .and(path("/api/v1/ruleLabels"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([label_body(3, "other"), label_body(7, "web")])),
        )
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let output = session_cmd(dir.path(), &server)
        .args(["-o", "json", "data", "zia_rule_labels", "--name", "WEB"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", combined_output(&output));

    let parsed: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed["id"], json!(7));
    assert_eq!(parsed["name"], json!("web"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_status_reports_activation_state() {
    let server = MockServer::start().await;
    mount_session(&server).await;

    Mock::given(method("GET"))
        .and(path("/api/v1/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "PENDING"})))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    session_cmd(dir.path(), &server)
        .args(["-o", "plain", "status"])
        .assert()
        .success()
        .stdout(predicate::str::diff("PENDING\n"));
}
