#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Smoke tests for the server binary: config loading and validation paths
//! that must work before anything listens on a socket.

use std::io::Write;
use std::process::Command;

fn bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_propdesk-server"))
}

#[test]
fn print_config_shows_effective_configuration() {
    let output = bin().arg("--print-config").output().expect("run");
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Effective configuration"));
    assert!(stdout.contains("\"server\""));
    assert!(stdout.contains("\"port\": 8080"));
}

#[test]
fn missing_config_file_is_an_error() {
    let output = bin()
        .args(["--config", "/nonexistent/propdesk.yaml", "check"])
        .output()
        .expect("run");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("does not exist"));
}

#[test]
fn check_rejects_enabled_auth_without_secret() {
    // Default config has auth enabled and no secret.
    let output = bin().arg("check").output().expect("run");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("jwt_secret"));
}

#[test]
fn check_accepts_a_complete_config() {
    let mut file = tempfile::NamedTempFile::with_suffix(".yaml").expect("temp file");
    writeln!(
        file,
        concat!(
            "auth:\n",
            "  jwt_secret: smoke-test-secret\n",
            "  users:\n",
            "    - username: ops\n",
            "      password_sha256: 2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824\n",
        )
    )
    .expect("write config");

    let output = bin()
        .args(["--config"])
        .arg(file.path())
        .arg("check")
        .output()
        .expect("run");
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Configuration is valid"));
    assert!(stdout.contains("smoke-test-secret"));
}

#[test]
fn port_override_reaches_the_effective_config() {
    let output = bin()
        .args(["--port", "9191", "--print-config"])
        .output()
        .expect("run");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("\"port\": 9191"));
}
