use assert_cmd::Command;
use predicates::str::contains;
use std::fs;
use std::path::PathBuf;

/// Helper to get a temporary home directory
fn temp_home_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("create temp dir")
}

/// Helper to get config file path in the temp dir
fn config_file_path(dir: &tempfile::TempDir) -> PathBuf {
    dir.path().join(".commit-tracker").join("config.json")
}

const BINARY_NAME: &str = "commit-tracker";

/// Command isolated from the caller's home directory and environment overrides.
fn command(home: &tempfile::TempDir) -> Command {
    let mut cmd = Command::cargo_bin(BINARY_NAME).unwrap();
    cmd.env("HOME", home.path())
        .env_remove("COMMIT_TRACKER_ENVIRONMENT")
        .env_remove("COMMIT_TRACKER_API_URL")
        .env_remove("COMMIT_TRACKER_ORIGIN");
    cmd
}

#[test]
/// Help command should list the subcommands.
fn cli_help_displays_usage() {
    let mut cmd = Command::cargo_bin(BINARY_NAME).unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(contains("track-now"))
        .stdout(contains("fetch-commits"))
        .stdout(contains("--environment"));
}

#[test]
fn unknown_environment_is_rejected() {
    let tmp = temp_home_dir();
    command(&tmp)
        .args(["--environment", "staging", "track-now"])
        .assert()
        .failure()
        .stderr(contains("unknown environment"));
}

#[test]
/// save-config should persist the resolved settings under $HOME.
fn save_config_writes_resolved_settings() {
    let tmp = temp_home_dir();
    let config_path = config_file_path(&tmp);
    assert!(!config_path.exists());

    command(&tmp)
        .args(["--environment", "production", "--refresh-secs", "45", "save-config"])
        .assert()
        .success()
        .stdout(contains("Configuration saved"))
        .stdout(contains("http://localhost/api"));

    let saved = fs::read_to_string(&config_path).unwrap();
    assert!(saved.contains("\"Production\""), "{}", saved);
    assert!(saved.contains("\"refresh_interval_secs\": 45"), "{}", saved);
}

#[test]
/// clear-config should delete an existing config file.
fn clear_config_deletes_config_file() {
    let tmp = temp_home_dir();
    let config_path = config_file_path(&tmp);
    fs::create_dir_all(config_path.parent().unwrap()).unwrap();
    fs::write(&config_path, "{}").unwrap();

    command(&tmp)
        .arg("clear-config")
        .assert()
        .success()
        .stdout(contains("Configuration cleared"));

    assert!(!config_path.exists());
}

#[test]
fn clear_config_without_file_succeeds() {
    let tmp = temp_home_dir();
    command(&tmp).arg("clear-config").assert().success();
}

#[test]
/// Nothing listens on the discard port, so the read must fail with the fixed message.
fn track_now_reports_unreachable_backend() {
    let tmp = temp_home_dir();
    command(&tmp)
        .args(["--api-url", "http://127.0.0.1:9", "track-now"])
        .assert()
        .code(1)
        .stderr(contains("Error connecting to server"));
}

#[test]
fn fetch_commits_reports_unreachable_backend() {
    let tmp = temp_home_dir();
    command(&tmp)
        .args(["--api-url", "http://127.0.0.1:9", "fetch-commits"])
        .assert()
        .code(1)
        .stderr(contains("Error fetching commits"));
}

#[test]
fn malformed_config_file_is_an_error() {
    let tmp = temp_home_dir();
    let config_path = config_file_path(&tmp);
    fs::create_dir_all(config_path.parent().unwrap()).unwrap();
    fs::write(&config_path, "not json").unwrap();

    command(&tmp).arg("track-now").assert().code(1);
}
