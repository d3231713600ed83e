use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Helper function to create a temporary directory for CLI tests
fn create_cli_test_environment() -> TempDir {
    TempDir::new().expect("Failed to create temporary directory")
}

/// Command with plain output, an isolated database and no user config
fn cellar_cmd(temp_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("cellar").expect("Failed to find cellar binary");
    cmd.env("XDG_CONFIG_HOME", temp_dir.path())
        .env_remove("CELLAR_OWNER")
        .arg("--no-color")
        .arg("--database-file")
        .arg(temp_dir.path().join("cli_test.db"));
    cmd
}

fn add_wine(temp_dir: &TempDir, args: &[&str]) {
    cellar_cmd(temp_dir)
        .args(["wine", "add"])
        .args(args)
        .assert()
        .success();
}

fn stock_three(temp_dir: &TempDir) {
    add_wine(
        temp_dir,
        &["Mosel Kabinett", "--color", "white", "--region", "Mosel", "--abv", "8.5", "--readiness", "ready"],
    );
    add_wine(
        temp_dir,
        &["Barossa Shiraz", "--color", "red", "--region", "Barossa", "--abv", "15", "--readiness", "ready", "--quantity", "2"],
    );
    add_wine(
        temp_dir,
        &["Beaujolais", "--color", "red", "--style", "light", "--abv", "12.5", "--readiness", "ready"],
    );
}

#[test]
fn test_cli_add_wine() {
    let temp_dir = create_cli_test_environment();

    cellar_cmd(&temp_dir)
        .args([
            "wine", "add", "Sancerre", "--color", "white", "--rating", "4", "--vintage", "2021",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added wine with ID: 1"))
        .stdout(predicate::str::contains("## Sancerre 2021 (ID: 1)"));
}

#[test]
fn test_cli_add_wine_rejects_bad_rating() {
    let temp_dir = create_cli_test_environment();

    cellar_cmd(&temp_dir)
        .args(["wine", "add", "Plonk", "--color", "red", "--rating", "11"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("rating"));
}

#[test]
fn test_cli_rejects_unknown_color() {
    let temp_dir = create_cli_test_environment();

    cellar_cmd(&temp_dir)
        .args(["wine", "add", "Mystery", "--color", "blue"])
        .assert()
        .failure();
}

#[test]
fn test_cli_list_wines_per_owner() {
    let temp_dir = create_cli_test_environment();
    add_wine(&temp_dir, &["Chablis", "--color", "white"]);

    cellar_cmd(&temp_dir)
        .args(["--owner", "bob", "wine", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No wines found."));

    cellar_cmd(&temp_dir)
        .args(["wine", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Chablis"));
}

#[test]
fn test_cli_empty_lineup_is_friendly() {
    let temp_dir = create_cli_test_environment();

    cellar_cmd(&temp_dir)
        .arg("lineup")
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing qualifies yet."));
}

#[test]
fn test_cli_lineup_runs_light_to_bold() {
    let temp_dir = create_cli_test_environment();
    stock_three(&temp_dir);

    let output = cellar_cmd(&temp_dir)
        .args(["lineup", "--group", "small", "--seed", "1"])
        .output()
        .expect("Failed to run lineup");
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();

    let kabinett = stdout.find("Mosel Kabinett").expect("Kabinett in lineup");
    let shiraz = stdout.find("Barossa Shiraz").expect("Shiraz in lineup");
    assert!(kabinett < shiraz);
    assert!(stdout.contains("Warm-up"));
    assert!(stdout.contains("Finale"));
}

#[test]
fn test_cli_no_command_without_plan() {
    let temp_dir = create_cli_test_environment();

    cellar_cmd(&temp_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("No active plan for me"));
}

#[test]
fn test_cli_evening_flow() {
    let temp_dir = create_cli_test_environment();
    stock_three(&temp_dir);

    cellar_cmd(&temp_dir)
        .args(["plan", "start", "--protein", "beef", "--seed", "4"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Started evening plan with ID: 1"))
        .stdout(predicate::str::contains("<- now pouring"));

    cellar_cmd(&temp_dir)
        .args(["plan", "next"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Now pouring #2"));

    cellar_cmd(&temp_dir)
        .args(["plan", "prev"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Now pouring #1"));

    cellar_cmd(&temp_dir)
        .args(["plan", "move", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Now pouring #3"));

    cellar_cmd(&temp_dir)
        .args(["plan", "next"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid position"));

    cellar_cmd(&temp_dir)
        .args(["plan", "complete", "--open", "1::4", "--open", "3:1:5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Completed with 2 bottle(s) opened"));

    cellar_cmd(&temp_dir)
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::str::contains("No openings recorded.").not());

    cellar_cmd(&temp_dir)
        .args(["plan", "list", "--status", "completed"])
        .assert()
        .success()
        .stdout(predicate::str::contains("**Plan 1**"));
}

#[test]
fn test_cli_complete_with_short_stock_fails() {
    let temp_dir = create_cli_test_environment();
    stock_three(&temp_dir);

    cellar_cmd(&temp_dir)
        .args(["plan", "start"])
        .assert()
        .success();

    cellar_cmd(&temp_dir)
        .args(["plan", "complete", "--open", "1:5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Insufficient quantity"));

    cellar_cmd(&temp_dir)
        .args(["plan", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Active"));
}

#[test]
fn test_cli_stale_version_conflict() {
    let temp_dir = create_cli_test_environment();
    stock_three(&temp_dir);

    cellar_cmd(&temp_dir)
        .args(["plan", "start"])
        .assert()
        .success();

    cellar_cmd(&temp_dir)
        .args(["plan", "next", "--expected-version", "1"])
        .assert()
        .success();

    cellar_cmd(&temp_dir)
        .args(["plan", "next", "--expected-version", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("modified concurrently"));
}

#[test]
fn test_cli_cancel_plan() {
    let temp_dir = create_cli_test_environment();
    stock_three(&temp_dir);

    cellar_cmd(&temp_dir)
        .args(["plan", "start"])
        .assert()
        .success();

    cellar_cmd(&temp_dir)
        .args(["plan", "cancel", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Success: Cancelled plan 1"));

    cellar_cmd(&temp_dir)
        .args(["plan", "cancel", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot change"));
}

#[test]
fn test_cli_config_file_sets_lineup_size() {
    let temp_dir = create_cli_test_environment();
    stock_three(&temp_dir);
    let config = temp_dir.path().join("engine.toml");
    std::fs::write(&config, "[lineup_sizes]\nlarge = 2\n").unwrap();

    let output = cellar_cmd(&temp_dir)
        .args(["--config", config.to_str().unwrap(), "lineup", "--group", "large"])
        .output()
        .expect("Failed to run lineup");
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("1. "));
    assert!(stdout.contains("2. "));
    assert!(!stdout.contains("3. "));
}

#[test]
fn test_cli_invalid_config_fails() {
    let temp_dir = create_cli_test_environment();
    let config = temp_dir.path().join("engine.toml");
    std::fs::write(&config, "max_jitter = 50\n").unwrap();

    cellar_cmd(&temp_dir)
        .args(["--config", config.to_str().unwrap(), "lineup"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to initialize cellar"));
}
