//! End-to-end tests of the binary against a fake gpg
//!
//! The fake is a shell script emitting fixed colon listings, so these
//! tests only run on Unix.

#![cfg(unix)]
#![allow(clippy::unwrap_used)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::sync::OnceLock;

const FAKE_GPG: &str = r#"#!/bin/sh
for arg in "$@"; do
    case "$arg" in
        --list-keys)
            cat <<'LISTING'
tru::1:1700000000:0:3:1:5
pub:u:255:22:AAAA1111:1600000000:::u:::scESC::::::ed25519:::0:
fpr:::::::::0123456789ABCDEF0123456789ABCDEFAAAA1111:
uid:u::::1600000000::HASH1::Alice <a@x.com>::::::::::0:
uid:u::::1600000001::HASH2::Alice Work <alice@work.example>::::::::::0:
sub:u:255:18:CCCC3333:1600000000::::::e::::::cv25519::
pub:f:3072:1:BBBB2222:1500000000:::-:::scESC::::::::0:
uid:f::::1500000000::HASH3::Bob <b@x.com>::::::::::0:
LISTING
            exit 0
            ;;
        --list-secret-keys)
            cat <<'LISTING'
sec:u:255:22:AAAA1111:1600000000:::u:::scESC:::+:::ed25519::0:
fpr:::::::::0123456789ABCDEF0123456789ABCDEFAAAA1111:
uid:u::::1600000000::HASH1::Alice <a@x.com>::::::::::0:
ssb:u:255:18:CCCC3333:1600000000::::::e:::+:::cv25519::
LISTING
            exit 0
            ;;
    esac
done
exit 2
"#;

/// Writes the fake gpg once per test binary
///
/// Every test goes through here before spawning anything, so no child
/// can inherit the script's write handle while it is still open.
fn fake_gpg() -> &'static Path {
    static SCRIPT: OnceLock<PathBuf> = OnceLock::new();

    SCRIPT.get_or_init(|| {
        let path = PathBuf::from(env!("CARGO_TARGET_TMPDIR")).join("fake-gpg.sh");
        fs::write(&path, FAKE_GPG).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    })
}

fn run_with(gpg: &Path, args: &[&str]) -> Output {
    // Keep spawning ordered after the script is in place
    fake_gpg();

    Command::new(env!("CARGO_BIN_EXE_gpg-encrypt-dialog"))
        .arg("--gpg")
        .arg(gpg)
        .args(args)
        .env_remove("GPG_ENCRYPT_DIALOG_LOG")
        .output()
        .unwrap()
}

fn run(args: &[&str]) -> Output {
    run_with(fake_gpg(), args)
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap()
}

#[test]
fn test_select_recipient_and_signer() {
    let output = run(&["select", "--recipient", "AAAA1111", "--signer", "AAAA1111"]);

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        stdout(&output),
        "MODE=recipients\nRECIPIENTS=AAAA1111\nSIGNER=AAAA1111\n"
    );
}

#[test]
fn test_select_without_recipients_fails() {
    let output = run(&["select"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).is_empty(), "No partial output on failure");
}

#[test]
fn test_select_symmetric() {
    let output = run(&["select", "--symmetric"]);

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), "MODE=symmetric\nRECIPIENTS=\nSIGNER=none\n");
}

#[test]
fn test_select_recipients_in_registry_order() {
    let output = run(&["select", "-r", "BBBB2222", "-r", "AAAA1111", "-r", "bbbb2222"]);

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        stdout(&output),
        "MODE=recipients\nRECIPIENTS=AAAA1111,BBBB2222\nSIGNER=none\n"
    );
}

#[test]
fn test_select_signer_without_secret_key_fails() {
    let output = run(&["select", "-r", "AAAA1111", "--signer", "BBBB2222"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).is_empty());
}

#[test]
fn test_select_unknown_recipient_fails() {
    let output = run(&["select", "-r", "DEADBEEF"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).is_empty());
}

#[test]
fn test_empty_keyring_skips_dialog() {
    // `true` prints nothing and succeeds: no public and no secret keys
    let output = run_with(Path::new("true"), &[]);

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), "MODE=symmetric\nRECIPIENTS=\nSIGNER=none\n");
}

#[test]
fn test_failing_gpg_exits_with_error() {
    let output = run_with(Path::new("false"), &["select", "--symmetric"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).is_empty());
}

#[test]
fn test_missing_gpg_exits_with_error() {
    let missing = PathBuf::from(env!("CARGO_TARGET_TMPDIR")).join("no-such-gpg");
    let output = run_with(&missing, &["list"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).is_empty());
}

#[test]
fn test_list_public_keys() {
    let output = run(&["list"]);
    let text = stdout(&output);

    assert_eq!(output.status.code(), Some(0));
    assert!(text.contains("AAAA1111"));
    assert!(text.contains("Alice <a@x.com>"));
    assert!(text.contains("Bob <b@x.com>"));
    assert!(!text.contains("Alice Work"), "Only the first uid is listed");
}

#[test]
fn test_list_secret_keys() {
    let output = run(&["list", "--secret"]);
    let text = stdout(&output);

    assert_eq!(output.status.code(), Some(0));
    assert!(text.contains("Alice <a@x.com>"));
    assert!(!text.contains("Bob"));
}

#[cfg(not(feature = "gui"))]
#[test]
fn test_dialog_load_failure_reported_once() {
    let output = run_with(Path::new("false"), &[]);
    let stderr = String::from_utf8(output.stderr).unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    assert_eq!(
        stderr.matches("Failed to retrieve GPG keys").count(),
        1,
        "stderr was: {}",
        stderr
    );
}
