//! CLI integration tests for biboard
//!
//! Drives the biboard binary end-to-end using assert_cmd, feeding the
//! session through piped stdin.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Helper to create a command with an isolated config directory and a known password
#[allow(deprecated)]
fn biboard_cmd(config_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("biboard").unwrap();
    cmd.current_dir(config_dir.path());
    cmd.env("BIBOARD_CONFIG_DIR", config_dir.path());
    cmd.env("BIBOARD_OPERATOR_PASSWORD", "secret");
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_session_add_list_and_report() {
    let dir = TempDir::new().unwrap();

    biboard_cmd(&dir)
        .write_stdin(
            "operator\nsecret\n\
             add 'Sales Cube' 'Monthly sales' --status 'In Progress' --start 2020-01-01 --end 2020-02-01\n\
             add Churn 'Churn model' --start 2020-03-01 --end 2020-03-01\n\
             list\n\
             report\n\
             quit\n",
        )
        .assert()
        .success()
        .stdout(predicate::str::contains("Welcome, operator!"))
        .stdout(predicate::str::contains("Project added: #1 Sales Cube"))
        .stdout(predicate::str::contains("Project added: #2 Churn"))
        .stdout(predicate::str::contains("🟢 In Progress"))
        .stdout(predicate::str::contains("100%"))
        .stdout(predicate::str::contains("Projects by status:"));
}

#[test]
fn test_wrong_password_is_reported() {
    let dir = TempDir::new().unwrap();

    biboard_cmd(&dir)
        .write_stdin("operator\nnope\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Incorrect username or password"))
        .stdout(predicate::str::contains("Welcome").not());
}

#[test]
fn test_status_update_messages() {
    let dir = TempDir::new().unwrap();

    biboard_cmd(&dir)
        .write_stdin(
            "operator\nsecret\n\
             add Sales cube\n\
             status Sales finalizing\n\
             status Marketing stopped\n\
             quit\n",
        )
        .assert()
        .success()
        .stdout(predicate::str::contains("Status updated: Sales -> 🔵 Finalizing"))
        .stdout(predicate::str::contains("Project 'Marketing' not found"));
}

#[test]
fn test_missing_field_warning() {
    let dir = TempDir::new().unwrap();

    biboard_cmd(&dir)
        .write_stdin("operator\nsecret\nadd Sales ''\nlist\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Project description is required"))
        .stdout(predicate::str::contains("No projects recorded."));
}

#[test]
fn test_json_timeline() {
    let dir = TempDir::new().unwrap();

    let output = biboard_cmd(&dir)
        .args(["--format", "json", "--quiet"])
        .write_stdin(
            "operator\nsecret\n\
             add B desc --start 2024-02-01 --end 2024-03-01\n\
             add A desc --start 2024-01-01 --end 2024-01-15\n\
             timeline\n\
             quit\n",
        )
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let last = stdout.lines().last().unwrap();
    let timeline: serde_json::Value = serde_json::from_str(last).unwrap();
    assert_eq!(timeline[0]["name"], "A");
    assert_eq!(timeline[1]["name"], "B");
}

#[test]
fn test_shell_requires_password_env() {
    let dir = TempDir::new().unwrap();

    biboard_cmd(&dir)
        .env_remove("BIBOARD_OPERATOR_PASSWORD")
        .write_stdin("operator\n\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("BIBOARD_OPERATOR_PASSWORD"));
}

#[test]
fn test_config_set_get_and_username_login() {
    let dir = TempDir::new().unwrap();

    biboard_cmd(&dir)
        .args(["config", "set", "operator.username", "BI Team"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Set operator.username = BI Team"));

    biboard_cmd(&dir)
        .args(["config", "get", "operator.username"])
        .assert()
        .success()
        .stdout("BI Team\n");

    biboard_cmd(&dir)
        .write_stdin("BI Team\nsecret\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Welcome, BI Team!"));
}

#[test]
fn test_config_rejects_password() {
    let dir = TempDir::new().unwrap();

    biboard_cmd(&dir)
        .args(["config", "set", "operator.password", "secret"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be stored in configuration"));
}

#[test]
fn test_config_path_uses_override() {
    let dir = TempDir::new().unwrap();

    biboard_cmd(&dir)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn test_statuses_command() {
    let dir = TempDir::new().unwrap();

    biboard_cmd(&dir)
        .arg("statuses")
        .assert()
        .success()
        .stdout("🔴 Stopped\n🟢 In Progress\n🟡 In Development\n🔵 Finalizing\n");
}

#[test]
fn test_doctor() {
    let dir = TempDir::new().unwrap();

    biboard_cmd(&dir)
        .arg("doctor")
        .assert()
        .success()
        .stdout(predicate::str::contains("All checks passed."));

    biboard_cmd(&dir)
        .env_remove("BIBOARD_OPERATOR_PASSWORD")
        .arg("doctor")
        .assert()
        .failure()
        .stdout(predicate::str::contains("Password: Not set"));
}

#[test]
fn test_as_of_pins_progress() {
    let dir = TempDir::new().unwrap();

    biboard_cmd(&dir)
        .args(["--as-of", "2024-01-06"])
        .write_stdin(
            "operator\nsecret\n\
             add Sales cube --start 2024-01-01 --end 2024-01-11\n\
             show Sales\n\
             quit\n",
        )
        .assert()
        .success()
        .stdout(predicate::str::contains("Progress: 50% [#####-----]"));
}

#[test]
fn test_configured_date_format_is_used_in_tables() {
    let dir = TempDir::new().unwrap();

    biboard_cmd(&dir)
        .args(["config", "set", "display.date_format", "%Y-%m-%d"])
        .assert()
        .success();

    biboard_cmd(&dir)
        .write_stdin(
            "operator\nsecret\n\
             add Sales 'Monthly sales' --start 05/01/2020 --end 2020-02-01\n\
             list\n\
             timeline\n\
             quit\n",
        )
        .assert()
        .success()
        .stdout(predicate::str::contains("2020-01-05"))
        .stdout(predicate::str::contains("2020-02-01"))
        .stdout(predicate::str::contains("05/01/2020").not());
}

#[test]
fn test_time_only_date_format_is_rejected() {
    let dir = TempDir::new().unwrap();

    biboard_cmd(&dir)
        .args(["config", "set", "display.date_format", "%H:%M"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid date format"));

    biboard_cmd(&dir)
        .args(["config", "get", "display.date_format"])
        .assert()
        .success()
        .stdout(predicate::str::contains("%d/%m/%Y"));

    biboard_cmd(&dir)
        .write_stdin("operator\nsecret\nadd Sales cube --start 2020-01-05 --end 2020-02-01\nlist\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("05/01/2020"));
}
