//! Integration tests for the CredVault CLI.
//!
//! These tests exercise the binary end-to-end using `assert_cmd`.  The
//! `CREDVAULT_PASSWORD` environment variable stands in for the
//! interactive password prompt, so every flow can run non-interactively
//! inside a temp directory.

use assert_cmd::Command;
use assert_fs::TempDir;
use predicates::prelude::*;

/// Helper: get a Command pointing at the credvault binary.
fn credvault() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("credvault").expect("binary should exist")
}

/// Helper: a command pre-wired to run inside `tmp` with a scripted password.
fn credvault_in(tmp: &TempDir) -> Command {
    let mut cmd = credvault();
    cmd.current_dir(tmp.path())
        .env("CREDVAULT_PASSWORD", "integration-pw");
    cmd
}

#[test]
fn help_flag_shows_usage() {
    credvault()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Multi-user credential vault"))
        .stdout(predicate::str::contains("register"))
        .stdout(predicate::str::contains("login"))
        .stdout(predicate::str::contains("users"))
        .stdout(predicate::str::contains("profile"))
        .stdout(predicate::str::contains("vault"))
        .stdout(predicate::str::contains("audit"))
        .stdout(predicate::str::contains("completions"));
}

#[test]
fn version_flag_shows_version() {
    credvault()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("credvault"));
}

#[test]
fn no_args_shows_help() {
    // Running with no subcommand should show an error or help.
    credvault().assert().failure().stderr(predicate::str::contains("Usage"));
}

#[test]
fn register_then_login_roundtrip() {
    let tmp = TempDir::new().unwrap();

    credvault_in(&tmp)
        .args(["register", "Ada@Example.com", "--first-name", "Ada"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Account created for ada@example.com"));

    credvault_in(&tmp)
        .args(["login", "ada@example.com"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Login successful for ada@example.com"));
}

#[test]
fn duplicate_registration_fails() {
    let tmp = TempDir::new().unwrap();

    credvault_in(&tmp)
        .args(["register", "dup@example.com"])
        .assert()
        .success();

    // Same address in a different case is still the same account.
    credvault_in(&tmp)
        .args(["register", "DUP@Example.com"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Email is already registered."));
}

#[test]
fn login_with_wrong_password_fails() {
    let tmp = TempDir::new().unwrap();

    credvault_in(&tmp)
        .args(["register", "ada@example.com"])
        .assert()
        .success();

    credvault()
        .current_dir(tmp.path())
        .env("CREDVAULT_PASSWORD", "not-the-password")
        .args(["login", "ada@example.com"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid email or password."));
}

#[test]
fn short_password_is_rejected_at_registration() {
    let tmp = TempDir::new().unwrap();

    credvault()
        .current_dir(tmp.path())
        .env("CREDVAULT_PASSWORD", "short")
        .args(["register", "ada@example.com"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("at least 8 characters"));
}

#[test]
fn vault_add_and_list_masks_payloads() {
    let tmp = TempDir::new().unwrap();

    credvault_in(&tmp)
        .args(["register", "ada@example.com"])
        .assert()
        .success();

    credvault_in(&tmp)
        .args([
            "vault",
            "add",
            "ada@example.com",
            "Bank",
            "--payload",
            "hunter2-secret",
            "--description",
            "main account",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Entry 'Bank' added for ada@example.com"));

    // Default listing masks the payload.
    credvault_in(&tmp)
        .args(["vault", "list", "ada@example.com"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Bank"))
        .stdout(predicate::str::contains("********"))
        .stdout(predicate::str::contains("hunter2-secret").not());

    // --show-payloads reveals it.
    credvault_in(&tmp)
        .args(["vault", "list", "ada@example.com", "--show-payloads"])
        .assert()
        .success()
        .stdout(predicate::str::contains("hunter2-secret"));
}

#[test]
fn vault_delete_with_force_removes_the_entry() {
    let tmp = TempDir::new().unwrap();

    credvault_in(&tmp)
        .args(["register", "ada@example.com"])
        .assert()
        .success();

    credvault_in(&tmp)
        .args([
            "vault", "add", "ada@example.com", "Bank", "--payload", "s3cret",
        ])
        .assert()
        .success();

    // The first store-assigned id is 1.
    credvault_in(&tmp)
        .args(["vault", "delete", "ada@example.com", "1", "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted entry 1"));

    credvault_in(&tmp)
        .args(["vault", "list", "ada@example.com"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No vault entries"));
}

#[test]
fn users_json_never_contains_hashes() {
    let tmp = TempDir::new().unwrap();

    credvault_in(&tmp)
        .args(["register", "ada@example.com"])
        .assert()
        .success();

    credvault_in(&tmp)
        .args(["users", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ada@example.com"))
        .stdout(predicate::str::contains("argon2id").not())
        .stdout(predicate::str::contains("password_hash").not());
}

#[test]
fn profile_update_roundtrip() {
    let tmp = TempDir::new().unwrap();

    credvault_in(&tmp)
        .args(["register", "ada@example.com"])
        .assert()
        .success();

    credvault_in(&tmp)
        .args([
            "profile",
            "ada@example.com",
            "--theme",
            "Dark",
            "--language",
            "de",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Profile updated for ada@example.com"));
}

#[test]
fn audit_records_operations() {
    let tmp = TempDir::new().unwrap();

    credvault_in(&tmp)
        .args(["register", "ada@example.com"])
        .assert()
        .success();

    credvault_in(&tmp)
        .args(["audit"])
        .assert()
        .success()
        .stdout(predicate::str::contains("register"))
        .stdout(predicate::str::contains("ada@example.com"));
}

#[test]
fn completions_bash_generates_a_script() {
    credvault()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("credvault"));
}

#[test]
fn completions_unknown_shell_fails() {
    credvault()
        .args(["completions", "csh"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown shell"));
}

#[test]
fn data_dir_flag_controls_the_database_location() {
    let tmp = TempDir::new().unwrap();

    credvault_in(&tmp)
        .args(["--data-dir", "custom-dir", "register", "ada@example.com"])
        .assert()
        .success();

    assert!(tmp.path().join("custom-dir").join("credvault.db").exists());
    assert!(!tmp.path().join(".credvault").exists());
}
