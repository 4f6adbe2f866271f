use assert_cmd::Command;
use assert_cmd::assert::OutputAssertExt;
use predicates::prelude::*;
use serde_json::{Value, json};
use std::fs;
use std::process::Output;
use tempfile::TempDir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ENV_VARS: &[&str] = &[
    "BUGSNAG_API_TOKEN",
    "BUGSNAG_FORMAT",
    "BUGSNAG_BASE_URL",
    "BUGSNAG_PER_PAGE",
    "BUGSNAG_CONFIG",
    "RUST_LOG",
];

/// Binary isolated from the caller's environment and config file
fn bugsnag(config_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("bugsnag-cli").unwrap();
    for var in ENV_VARS {
        cmd.env_remove(var);
    }
    cmd.arg("--config").arg(config_dir.path().join("config.toml"));
    cmd
}

/// Run the binary off the async runtime so the mock server keeps serving
async fn run(mut cmd: Command) -> Output {
    tokio::task::spawn_blocking(move || cmd.output().unwrap())
        .await
        .unwrap()
}

#[test]
fn test_version() {
    let config_dir = TempDir::new().unwrap();
    bugsnag(&config_dir)
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("bugsnag-cli version "));
}

#[test]
fn test_help_lists_resources() {
    let config_dir = TempDir::new().unwrap();
    bugsnag(&config_dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("errors"))
        .stdout(predicate::str::contains("stability"));
}

#[test]
fn test_missing_token_exits_config() {
    let config_dir = TempDir::new().unwrap();
    let output = bugsnag(&config_dir)
        .args(["organizations", "list"])
        .assert()
        .code(2)
        .get_output()
        .clone();

    let stderr: Value = serde_json::from_slice(&output.stderr).unwrap();
    assert!(
        stderr["error"]
            .as_str()
            .unwrap()
            .starts_with("API token is required")
    );
    assert!(output.stdout.is_empty());
}

#[test]
fn test_missing_flag_exits_config() {
    let config_dir = TempDir::new().unwrap();
    bugsnag(&config_dir)
        .args(["-t", "tok", "errors", "list"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--project-id is required"));
}

#[test]
fn test_table_format_error_prefix() {
    let config_dir = TempDir::new().unwrap();
    bugsnag(&config_dir)
        .args(["-t", "tok", "-f", "table", "events", "get", "--project-id", "p1"])
        .assert()
        .code(2)
        .stderr(predicate::str::starts_with("Error: --event-id is required"));
}

#[test]
fn test_invalid_flag_value_prints_json_error() {
    let config_dir = TempDir::new().unwrap();
    let output = bugsnag(&config_dir)
        .args(["--per-page", "abc", "organizations", "list"])
        .assert()
        .code(1)
        .get_output()
        .clone();

    let stderr: Value = serde_json::from_slice(&output.stderr).unwrap();
    assert!(
        stderr["error"]
            .as_str()
            .unwrap()
            .contains("invalid value 'abc'")
    );
    assert!(output.stdout.is_empty());
}

#[test]
fn test_unknown_subcommand_exits_general() {
    let config_dir = TempDir::new().unwrap();
    bugsnag(&config_dir)
        .args(["-t", "x", "-f", "table", "bogus"])
        .assert()
        .code(1)
        .stderr(predicate::str::starts_with(
            "Error: unrecognized subcommand 'bogus'",
        ));
}

#[test]
fn test_unknown_format_prints_plain_error() {
    let config_dir = TempDir::new().unwrap();
    bugsnag(&config_dir)
        .args(["-f", "xml", "organizations", "list"])
        .assert()
        .code(2)
        .stderr(predicate::str::starts_with("Error: API token is required"));
}

#[test]
fn test_network_error_exits_network() {
    let config_dir = TempDir::new().unwrap();
    bugsnag(&config_dir)
        .args([
            "-t",
            "tok",
            "--base-url",
            "http://127.0.0.1:1",
            "organizations",
            "list",
        ])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("network error"));
}

#[test]
fn test_unparsable_config_exits_general() {
    let config_dir = TempDir::new().unwrap();
    fs::write(config_dir.path().join("config.toml"), "per_page = [").unwrap();

    bugsnag(&config_dir)
        .args(["organizations", "list"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Configuration parse error"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_api_error_exits_api() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"errors": [{"message": "Unauthorized"}]})),
        )
        .mount(&mock_server)
        .await;

    let config_dir = TempDir::new().unwrap();
    let mut cmd = bugsnag(&config_dir);
    cmd.args(["-t", "bad", "--base-url", mock_server.uri().as_str(), "projects", "get", "--project-id", "p1"]);

    let output = run(cmd).await;
    output
        .assert()
        .code(3)
        .stderr(predicate::str::contains("API error (401): Unauthorized"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_errors_list_all_pages_json() {
    let mock_server = MockServer::start().await;
    let uri = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/projects/p1/errors"))
        .and(header("Authorization", "token tok"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Link", format!(r#"<{uri}/projects/p1/errors/next>; rel="next""#).as_str())
                .set_body_json(json!([{"id": "e1"}, {"id": "e2"}])),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/projects/p1/errors/next"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": "e3"}])))
        .mount(&mock_server)
        .await;

    let config_dir = TempDir::new().unwrap();

    let mut cmd = bugsnag(&config_dir);
    cmd.args(["-t", "tok", "--base-url", uri.as_str(), "errors", "list", "--project-id", "p1"]);
    let output = run(cmd).await;
    output.clone().assert().success();
    let page: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(page["total_count"], 2);
    assert_eq!(page["has_more"], true);

    let mut cmd = bugsnag(&config_dir);
    cmd.args(["-t", "tok", "--base-url", uri.as_str(), "-a", "errors", "list", "--project-id", "p1"]);
    let output = run(cmd).await;
    output.clone().assert().success();
    let all: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(all["total_count"], 3);
    assert_eq!(all["has_more"], false);
    assert_eq!(all["data"][2]["id"], "e3");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_organizations_table_output() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/user/organizations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "org1", "name": "Acme", "slug": "acme", "created_at": "2024-01-01"}
        ])))
        .mount(&mock_server)
        .await;

    let config_dir = TempDir::new().unwrap();
    let mut cmd = bugsnag(&config_dir);
    cmd.args(["-t", "tok", "--base-url", mock_server.uri().as_str(), "-f", "table", "organizations", "list"]);

    let output = run(cmd).await;
    output
        .assert()
        .success()
        .stdout(predicate::str::starts_with("ID"))
        .stdout(predicate::str::contains("SLUG"))
        .stdout(predicate::str::contains("Acme"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_configure_then_use_saved_token() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/user/organizations"))
        .and(header("Authorization", "token saved-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config_dir = TempDir::new().unwrap();
    let config_path = config_dir.path().join("config.toml");

    let mut cmd = bugsnag(&config_dir);
    cmd.args([
        "configure",
        "-t",
        "saved-token",
        "--default-base-url",
        mock_server.uri().as_str(),
        "--default-format",
        "table",
    ]);
    let output = run(cmd).await;
    output.clone().assert().success();

    let status: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(status["status"], "ok");
    assert_eq!(status["path"], config_path.to_str().unwrap());
    assert!(
        fs::read_to_string(&config_path)
            .unwrap()
            .contains("saved-token")
    );

    let output = run({
        let mut cmd = bugsnag(&config_dir);
        cmd.args(["organizations", "list"]);
        cmd
    })
    .await;
    output
        .assert()
        .success()
        .stdout(predicate::str::contains("No results found."));
}
