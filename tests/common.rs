#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn slog() -> Command {
    cargo_bin_cmd!("shiftlog")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_shiftlog.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Initialize schema + default shift catalog on the given DB
pub fn init_db(db_path: &str) {
    slog()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

/// Clock in at a fixed wall-clock instant (business timezone)
pub fn clock_in_at(db_path: &str, user: &str, at: &str, shift: Option<&str>) {
    let mut args = vec!["--db", db_path, "--user", user, "in", "--at", at];
    if let Some(code) = shift {
        args.push("--shift");
        args.push(code);
    }
    slog().args(&args).assert().success();
}

/// Clock out at a fixed wall-clock instant (business timezone)
pub fn clock_out_at(db_path: &str, user: &str, at: &str) {
    slog()
        .args(["--db", db_path, "--user", user, "out", "--at", at])
        .assert()
        .success();
}
