#![cfg(not(feature = "deprecated"))]

use anyhow::Result;
use httpmock::prelude::*;
use regex::Regex;
use std::process::{Command, Output};
use tempfile::TempDir;

fn crane(dir: &TempDir, args: &[&str]) -> Output {
    crane_with_env(dir, &[], args)
}

fn crane_with_env(dir: &TempDir, env: &[(&str, &str)], args: &[&str]) -> Output {
    let mut command = Command::new(env!("CARGO_BIN_EXE_crane"));
    command
        .args(args)
        .current_dir(dir.path())
        .env("CRANE_HOME", dir.path())
        .env_remove("CRANE_TARGET")
        .env_remove("CRANE_TOKEN")
        .env_remove("RUST_LOG");
    for (key, value) in env {
        command.env(key, value);
    }
    command.output().unwrap()
}

#[test]
fn test_template_in_current_directory() {
    let dir = TempDir::new().unwrap();

    let output = crane(&dir, &["template"]);
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "Generated file \"manifest.yaml\" in current directory\n"
    );

    let content = std::fs::read_to_string(dir.path().join("manifest.yaml")).unwrap();
    let expected = Regex::new(
        r"^id: servicename
username: username_to_auth
password: .{16}
team: team_responsible_to_provide_service
endpoint:
  production: production-endpoint.com$",
    )
    .unwrap();
    assert!(expected.is_match(&content), "unexpected template:\n{}", content);

    let output = crane(&dir, &["template"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("already exists"));
    assert_eq!(
        std::fs::read_to_string(dir.path().join("manifest.yaml")).unwrap(),
        content
    );
}

#[test]
fn test_list_against_target_flag() {
    let dir = TempDir::new().unwrap();
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/services");
        then.status(200)
            .body(r#"[{"service": "mysql", "instances": ["my_db"]}]"#);
    });

    let output = crane(&dir, &["--target", &server.base_url(), "list"]);

    mock.assert();
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "+----------+-----------+\n| Services | Instances |\n+----------+-----------+\n| mysql    | my_db     |\n+----------+-----------+\n"
    );
}

#[test]
fn test_target_from_config_file() -> Result<()> {
    let dir = TempDir::new()?;
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/services/serv/doc")
            .header("Authorization", "bearer file-token");
        then.status(200).body("some doc");
    });
    std::fs::write(
        dir.path().join("config.toml"),
        format!("target = \"{}\"\ntoken = \"file-token\"\n", server.base_url()),
    )?;

    let output = crane(&dir, &["doc-get", "serv"]);

    mock.assert();
    assert!(output.status.success());
    assert_eq!(output.stdout, b"some doc");
    Ok(())
}

#[test]
fn test_api_error_exit_code_and_message() -> Result<()> {
    let dir = TempDir::new()?;
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(PUT).path("/services");
        then.status(400).body("endpoint is required");
    });
    std::fs::write(dir.path().join("manifest.yaml"), "id: mysql\n")?;

    let output = crane(&dir, &["--target", &server.base_url(), "update", "manifest.yaml"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("endpoint is required"));
    Ok(())
}

#[test]
fn test_usage_and_argument_errors() {
    let dir = TempDir::new().unwrap();

    let output = crane(&dir, &[]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for name in ["create", "remove", "list", "update", "doc-get", "doc-add", "template"] {
        assert!(stdout.contains(name), "missing {} in usage", name);
    }

    let output = crane(&dir, &["create"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("wrong number of arguments"));

    let output = crane(&dir, &["frobnicate"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_list_without_target_fails() {
    let dir = TempDir::new().unwrap();
    let output = crane(&dir, &["list"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("no target defined"));
}

#[test]
fn test_invalid_target_only_fails_commands_that_send() {
    let dir = TempDir::new().unwrap();
    let env = [("CRANE_TARGET", "ftp://nope")];

    let output = crane_with_env(&dir, &env, &["template"]);
    assert!(output.status.success());
    assert!(dir.path().join("manifest.yaml").exists());

    let output = crane_with_env(&dir, &env, &["create"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("wrong number of arguments"));

    let output = crane_with_env(&dir, &env, &["frobnicate"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("is not a crane command"));

    let output = crane_with_env(&dir, &env, &["list"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid value for target"));
}

#[test]
fn test_empty_target_env_counts_as_unset() {
    let dir = TempDir::new().unwrap();
    let output = crane_with_env(&dir, &[("CRANE_TARGET", "")], &["list"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("no target defined"));
}
