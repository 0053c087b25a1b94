#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn jt() -> Command {
    cargo_bin_cmd!("janitrack")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_janitrack.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Initialize the DB (schema only, no config file write)
pub fn init_db(db_path: &str) {
    jt().args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

/// Register a janitor through the CLI; the first one in a fresh DB gets id 1
pub fn add_worker(db_path: &str, name: &str, email: &str, shift: &str) {
    jt().args([
        "--db", db_path, "worker", "add", "--name", name, "--email", email, "--shift", shift,
    ])
    .assert()
    .success();
}

/// Run one status command (`clock`, `break`, ...) for worker `id` at a local time
pub fn at(db_path: &str, cmd: &str, id: &str, when: &str) {
    jt().args(["--db", db_path, cmd, id, "--at", when])
        .assert()
        .success();
}

/// Init, one worker (#1) and a full shift on 2025-03-10:
/// 08:00 in, 12:00-12:30 break, 16:00 out.
pub fn init_db_with_shift(db_path: &str) {
    init_db(db_path);
    add_worker(db_path, "Ana Ruiz", "ana@example.com", "morning");

    at(db_path, "clock", "1", "2025-03-10 08:00");
    at(db_path, "break", "1", "2025-03-10 12:00");
    at(db_path, "break", "1", "2025-03-10 12:30");
    at(db_path, "clock", "1", "2025-03-10 16:00");
}
