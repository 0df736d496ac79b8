use assert_cmd::Command;
use predicates::prelude::*;

/// Helper to get a Command for the cloudguard binary.
#[allow(deprecated)]
fn cloudguard_cmd() -> Command {
    Command::cargo_bin("cloudguard").unwrap()
}

#[test]
fn help_works() {
    cloudguard_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Compliance checks over a simulated AWS inventory"));
}

#[test]
fn subcommand_help_works() {
    for sub in ["demo", "tools", "tool", "check", "md", "annotations", "explain"] {
        cloudguard_cmd().args([sub, "--help"]).assert().success();
    }
}

#[test]
fn invalid_log_level_is_rejected() {
    cloudguard_cmd()
        .env_remove("RUST_LOG")
        .args(["--log-level", "cloudguard=bogus", "tools"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid log level filter"));
}
