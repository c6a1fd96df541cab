//! Command line tests

use assert_cmd::Command;
use predicates::prelude::*;

fn name_forge() -> Command {
    let mut cmd = Command::cargo_bin("name-forge").unwrap();
    cmd.env("NAME_FORGE_CHECK_DELAY_MS", "0")
        .env_remove("NAME_FORGE_PROVIDER")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn help_lists_subcommands() {
    name_forge()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("generate"))
        .stdout(predicate::str::contains("check"));
}

#[test]
fn check_available_name() {
    name_forge()
        .args(["check", "abcdef"])
        .assert()
        .success()
        .stdout(predicate::str::contains("✅ abcdef - AVAILABLE"))
        .stdout(predicate::str::contains("domainToCheck=abcdef.com"));
}

#[test]
fn check_unavailable_name() {
    name_forge()
        .args(["check", "ab"])
        .assert()
        .success()
        .stdout(predicate::str::contains("❌ ab - UNAVAILABLE"));
}

#[test]
fn check_delay_flag_overrides_env() {
    name_forge()
        .env("NAME_FORGE_CHECK_DELAY_MS", "60000")
        .args(["check", "aeiouville", "--check-delay-ms", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("UNAVAILABLE"));
}

#[test]
fn rejects_invalid_delay() {
    name_forge()
        .env("NAME_FORGE_CHECK_DELAY_MS", "soon")
        .args(["check", "abcdef"])
        .assert()
        .failure();
}

#[test]
fn generate_needs_a_description() {
    name_forge()
        .args(["generate", "--tone", "playful", "--server", "http://127.0.0.1:9"])
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("description is required"));
}
