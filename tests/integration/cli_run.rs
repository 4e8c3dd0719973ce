//! Integration tests running the configurator binary end to end.

use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

fn configurator(cwd: &Path) -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_eclipse-configurator"));
    command
        .current_dir(cwd)
        .env_remove("WORKSPACE_PATH")
        .env_remove("ECLIPSE_TEMPLATES_PATH")
        .env_remove("REPLACEMENT_PATTERNS_PATH")
        .env_remove("CONFIGURATOR_LOG")
        .env_remove("CONFIGURATOR_LOG_FORMAT")
        .env_remove("CONFIGURATOR_LOG_OUTPUT");
    command
}

#[test]
fn test_missing_required_variable_exits_with_failure() {
    let temp_dir = TempDir::new().unwrap();
    let output = configurator(temp_dir.path())
        .env("ECLIPSE_TEMPLATES_PATH", "templates")
        .arg("-u")
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("WORKSPACE_PATH"), "stderr was: {}", stderr);
}

#[test]
fn test_missing_mode_is_an_argument_error() {
    let temp_dir = TempDir::new().unwrap();
    let output = configurator(temp_dir.path()).output().unwrap();
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_update_run_writes_workspace_and_log_file() {
    let temp_dir = TempDir::new().unwrap();
    let cwd = temp_dir.path();
    let prefs = cwd.join("templates/update/.metadata/.plugins/p/a.prefs");
    fs::create_dir_all(prefs.parent().unwrap()).unwrap();
    fs::create_dir_all(cwd.join("templates/setup")).unwrap();
    fs::write(&prefs, "home=${client.env.home}\n").unwrap();

    let output = configurator(cwd)
        .env("WORKSPACE_PATH", "ws")
        .env("ECLIPSE_TEMPLATES_PATH", "templates")
        .args(["--update", "--format", "json"])
        .output()
        .unwrap();

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let summary: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(summary["merged"], 1);
    assert!(cwd.join("ws/.metadata/.plugins/p/a.prefs").is_file());

    let log = fs::read_to_string(cwd.join("EclipseConfigurator.log")).unwrap();
    assert!(log.contains("Collected 1 configuration files."));
}

#[test]
fn test_quiet_run_writes_no_log_file() {
    let temp_dir = TempDir::new().unwrap();
    let cwd = temp_dir.path();
    fs::create_dir_all(cwd.join("templates/setup")).unwrap();
    fs::create_dir_all(cwd.join("templates/update/.metadata")).unwrap();

    let output = configurator(cwd)
        .env("WORKSPACE_PATH", "ws")
        .env("ECLIPSE_TEMPLATES_PATH", "templates")
        .args(["--quiet", "-cn"])
        .output()
        .unwrap();

    assert!(output.status.success());
    assert!(!cwd.join("EclipseConfigurator.log").exists());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Saved workspace changes"));
}
