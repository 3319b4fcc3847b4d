//! CLI argument handling tests
//!
//! These run the binary but only exercise paths that fail before any
//! network request is issued, so they are safe offline.

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

/// Helper function to create a test command
fn create_test_cmd() -> Command {
    let mut cmd = Command::cargo_bin("ntc").unwrap();
    // Keep ambient configuration out of argument-handling assertions
    cmd.env_remove("NETCHECK_IP_PROVIDER")
        .env_remove("NETCHECK_GEO_PROVIDER")
        .env_remove("NETCHECK_TIMEOUT_SECONDS")
        .env_remove("NETCHECK_ENABLE_COLOR");
    cmd
}

#[test]
fn test_help_lists_subcommands() {
    create_test_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("resolve"))
        .stdout(predicate::str::contains("geo"))
        .stdout(predicate::str::contains("speedtest"));
}

#[test]
fn test_version_flag() {
    create_test_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_unknown_geo_provider_is_usage_error() {
    create_test_cmd()
        .args(["geo", "1.2.3.4", "--geo-provider", "maxmind"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Unknown provider 'maxmind'"))
        .stderr(predicate::str::contains("ipapi, ipinfo"));
}

#[test]
fn test_unknown_ip_provider_is_usage_error() {
    create_test_cmd()
        .args(["ip", "--ip-provider", "ifconfig"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Unknown provider 'ifconfig'"));
}

#[test]
fn test_conflicting_color_flags_rejected() {
    create_test_cmd()
        .args(["speedtest", "--color", "--no-color"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("--color"));
}

#[test]
fn test_zero_timeout_rejected() {
    create_test_cmd()
        .args(["speedtest", "--timeout", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("greater than 0"));
}

#[test]
fn test_oversized_timeout_rejected() {
    create_test_cmd()
        .args(["speedtest", "--timeout", "301"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("300"));
}

#[test]
fn test_invalid_address_family_rejected() {
    create_test_cmd()
        .args(["ip", "--family", "v5"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("address family"));
}
