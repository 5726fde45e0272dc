//! Integration tests for the unipath CLI.
//!
//! These tests spawn the real binary with assert_cmd and check output and
//! exit codes against real temporary directories.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn unipath_cmd() -> Command {
    Command::cargo_bin("unipath").unwrap()
}

#[test]
fn test_norm_collapses_redundant_segments() {
    unipath_cmd()
        .args(["--style", "unix", "norm", "a//b/./c/../d"])
        .assert()
        .success()
        .stdout("a/b/d\n");
}

#[test]
fn test_norm_folded_windows_style() {
    unipath_cmd()
        .args(["--style", "windows", "norm", "--folded", "C:/Games/Data"])
        .assert()
        .success()
        .stdout("c:\\games\\data\n");
}

#[test]
fn test_info_decomposes_path() {
    unipath_cmd()
        .args(["--style", "windows", "info", "C:\\Games\\Data\\Armor.esp"])
        .assert()
        .success()
        .stdout(predicate::str::contains("parent:    C:\\Games\\Data"))
        .stdout(predicate::str::contains("name:      Armor.esp"))
        .stdout(predicate::str::contains("extension: .esp"))
        .stdout(predicate::str::contains("drive:     C:"))
        .stdout(predicate::str::contains("absolute:  true"));
}

#[test]
fn test_crc_known_value() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("v.bin");
    std::fs::write(&file, b"123456789").unwrap();

    unipath_cmd()
        .args(["crc", file.to_str().unwrap()])
        .assert()
        .success()
        .stdout("CBF43926\n");
}

#[test]
fn test_crc_chunk_size_does_not_change_digest() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("v.bin");
    std::fs::write(&file, b"123456789").unwrap();

    unipath_cmd()
        .args(["crc", "--chunk-size", "2", file.to_str().unwrap()])
        .assert()
        .success()
        .stdout("CBF43926\n");
}

#[test]
fn test_crc_missing_file_exit_code() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("missing.bin");

    unipath_cmd()
        .args(["crc", missing.to_str().unwrap()])
        .assert()
        .failure()
        .code(5)
        .stderr(predicate::str::contains("ERROR:"));
}

#[test]
fn test_crc_verbose_logs_progress() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("v.bin");
    std::fs::write(&file, b"123456789").unwrap();

    unipath_cmd()
        .args(["--verbose", "crc", file.to_str().unwrap()])
        .assert()
        .success()
        .stdout("CBF43926\n")
        .stderr(predicate::str::contains("INFO: hashed 9 bytes"));
}

#[test]
fn test_crc_progress_silent_without_verbose() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("v.bin");
    std::fs::write(&file, b"123456789").unwrap();

    unipath_cmd()
        .args(["crc", file.to_str().unwrap()])
        .assert()
        .success()
        .stderr(predicate::str::contains("hashed").not());
}

#[test]
fn test_size_of_directory_tree() {
    let temp = TempDir::new().unwrap();
    std::fs::create_dir(temp.path().join("sub")).unwrap();
    std::fs::write(temp.path().join("a"), vec![0_u8; 10]).unwrap();
    std::fs::write(temp.path().join("sub/b"), vec![0_u8; 5]).unwrap();

    unipath_cmd()
        .args(["size", temp.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout("15\n");
}

#[test]
fn test_resolve_order_prefers_first_dir() {
    let temp = TempDir::new().unwrap();
    let patch = temp.path().join("patch");
    let base = temp.path().join("base");
    std::fs::create_dir(&patch).unwrap();
    std::fs::create_dir(&base).unwrap();
    std::fs::write(patch.join("armor.esp"), b"p").unwrap();
    std::fs::write(base.join("armor.esp"), b"b").unwrap();

    unipath_cmd()
        .args([
            "resolve",
            "armor.esp",
            "--dir",
            patch.to_str().unwrap(),
            "--dir",
            base.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("patch"));
}

#[test]
fn test_resolve_reverse_inverts_priority() {
    let temp = TempDir::new().unwrap();
    let patch = temp.path().join("patch");
    let base = temp.path().join("base");
    std::fs::create_dir(&patch).unwrap();
    std::fs::create_dir(&base).unwrap();
    std::fs::write(patch.join("armor.esp"), b"p").unwrap();
    std::fs::write(base.join("armor.esp"), b"b").unwrap();

    unipath_cmd()
        .args([
            "resolve",
            "armor.esp",
            "--reverse",
            "--dir",
            patch.to_str().unwrap(),
            "--dir",
            base.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("base"));
}

#[test]
fn test_list_merges_directories() {
    let temp = TempDir::new().unwrap();
    let a = temp.path().join("a");
    let b = temp.path().join("b");
    std::fs::create_dir(&a).unwrap();
    std::fs::create_dir(&b).unwrap();
    std::fs::write(a.join("one.esp"), b"x").unwrap();
    std::fs::write(b.join("two.esp"), b"x").unwrap();

    unipath_cmd()
        .args(["list", a.to_str().unwrap(), b.to_str().unwrap()])
        .assert()
        .success()
        .stdout("one.esp\ntwo.esp\n");
}

#[test]
fn test_version_without_resource_is_zero() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("game.exe");
    std::fs::write(&file, b"not a real executable").unwrap();

    unipath_cmd()
        .args(["version", file.to_str().unwrap()])
        .assert()
        .success()
        .stdout("0.0.0.0\n");

    unipath_cmd()
        .args(["version", "--stripped", file.to_str().unwrap()])
        .assert()
        .success()
        .stdout("0\n");
}

#[test]
fn test_missing_subcommand_shows_usage() {
    unipath_cmd()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}
