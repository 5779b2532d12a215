// Command-line driver checks: exit status and output shape.
use std::process::{Command, Output};

fn run_bin(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_ts_hashmap"))
        .args(args)
        .env("TS_HASHMAP_OPS", "200")
        .env_remove("TS_HASHMAP_KEYS")
        .env_remove("TS_HASHMAP_SEED")
        .output()
        .expect("spawn ts_hashmap")
}

// Test: bad or missing arguments are rejected before any table is built.
// Verifies: non-zero exit and a usage line on stderr.
#[test]
fn rejects_missing_and_non_positive_arguments() {
    for args in [&[][..], &["3"][..], &["0", "4"][..], &["2", "0"][..], &["-1", "4"][..], &["two", "4"][..]] {
        let out = run_bin(args);
        assert!(!out.status.success(), "{args:?} should fail");
        assert_eq!(out.status.code(), Some(1), "{args:?}");
        let stderr = String::from_utf8_lossy(&out.stderr);
        assert!(stderr.contains("Usage:"), "{args:?}: {stderr}");
        assert!(out.stdout.is_empty(), "{args:?} printed a table");
    }
}

#[test]
fn rejects_bad_environment_override() {
    let out = Command::new(env!("CARGO_BIN_EXE_ts_hashmap"))
        .args(["2", "4"])
        .env("TS_HASHMAP_KEYS", "0")
        .output()
        .expect("spawn ts_hashmap");
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("TS_HASHMAP_KEYS"));
}

// Test: a valid run prints every bucket, then size and load factor.
#[test]
fn valid_run_prints_table_and_succeeds() {
    let out = run_bin(&["4", "8"]);
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    let stdout = String::from_utf8_lossy(&out.stdout);
    for i in 0..8 {
        assert!(stdout.contains(&format!("[{i}] -> ")), "bucket {i} missing:\n{stdout}");
    }
    assert!(stdout.contains("size: "));
    assert!(stdout.contains("load factor: "));
}

// Test: arguments past the second are reported and ignored.
#[test]
fn extra_arguments_are_ignored_with_notice() {
    let out = run_bin(&["1", "4", "surplus"]);
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("will be lost"));
    assert!(stdout.contains("[3] -> "));
}
