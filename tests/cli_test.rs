use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn upfmt(data_dir: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("upfmt").unwrap();
    cmd.env("UPFMT_HOME", data_dir)
        .env_remove("RUST_LOG")
        .env_remove("COLORFGBG");
    cmd
}

#[test]
fn test_format_prints_duration() {
    let dir = tempdir().unwrap();
    upfmt(dir.path())
        .args(["format", "90061"])
        .assert()
        .success()
        .stdout("1 day 1 hour 1 min 1 sec\n");
}

#[test]
fn test_format_truncates_fraction() {
    let dir = tempdir().unwrap();
    upfmt(dir.path())
        .args(["format", "10.9"])
        .assert()
        .success()
        .stdout("10 sec\n");
}

#[test]
fn test_format_rejects_negative() {
    let dir = tempdir().unwrap();
    upfmt(dir.path())
        .args(["format", "-5"])
        .assert()
        .success()
        .stdout("Please enter a valid number of seconds.\n");
}

#[test]
fn test_format_copy_skipped_without_terminal() {
    let dir = tempdir().unwrap();
    upfmt(dir.path())
        .args(["format", "--copy", "60"])
        .assert()
        .success()
        .stdout("1 min\n");
}

#[test]
fn test_first_run_writes_config() {
    let dir = tempdir().unwrap();
    upfmt(dir.path()).args(["format", "0"]).assert().success();
    assert!(dir.path().join("config.json").exists());
    assert!(dir.path().join("upfmt.log").exists());
}

// macOS reads the appearance from `defaults`, not COLORFGBG.
#[cfg(not(target_os = "macos"))]
#[test]
fn test_theme_follows_system_by_default() {
    let dir = tempdir().unwrap();
    upfmt(dir.path())
        .env("COLORFGBG", "15;0")
        .args(["theme", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Preference: system"))
        .stdout(predicate::str::contains("Effective:  dark"));
}

#[test]
fn test_theme_set_persists_across_runs() {
    let dir = tempdir().unwrap();
    upfmt(dir.path())
        .args(["theme", "set", "dark"])
        .assert()
        .success();

    upfmt(dir.path())
        .args(["theme", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Preference: dark"))
        .stdout(predicate::str::contains("Effective:  dark"));

    let prefs = std::fs::read_to_string(dir.path().join("prefs.json")).unwrap();
    assert!(prefs.contains(r#""theme": "dark""#));
}

#[test]
fn test_theme_toggle_and_reset() {
    let dir = tempdir().unwrap();
    upfmt(dir.path())
        .args(["theme", "set", "light"])
        .assert()
        .success();

    upfmt(dir.path())
        .args(["theme", "toggle"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Preference: dark"));

    upfmt(dir.path())
        .args(["theme", "reset"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Preference: system"));
}

#[test]
fn test_theme_set_rejects_unknown_value() {
    let dir = tempdir().unwrap();
    upfmt(dir.path())
        .args(["theme", "set", "solarized"])
        .assert()
        .failure();
}

#[test]
fn test_theme_commands_recover_from_corrupt_prefs() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("prefs.json"), "{not json").unwrap();

    upfmt(dir.path())
        .args(["theme", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Preference: system"));

    upfmt(dir.path())
        .args(["theme", "set", "light"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Preference: light"));
}
