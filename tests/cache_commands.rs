use crate::common::command::{compare, workspace_dir};
use crate::common::file::{FileSpec, read_file, write_file};
use crate::common::{REPORT_HEADER, sha1_hex};
use assert_fs::TempDir;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use rstest::rstest;

mod common;

fn write(dir: &TempDir, path: &str, content: &str) {
    write_file(FileSpec::new(dir.path().join(path), content.to_string()));
}

#[rstest]
fn cached_snapshots_are_trusted_without_rehashing(workspace_dir: TempDir) {
    write(&workspace_dir, "left/a.txt", "same\n");
    write(&workspace_dir, "right/a.txt", "same\n");
    compare(workspace_dir.path(), &[]).assert().success();

    // a stale cache wins over the current content
    write(&workspace_dir, "right/a.txt", "changed\n");
    compare(workspace_dir.path(), &["--use-cache"])
        .assert()
        .success()
        .stdout(predicate::str::contains(" - right/a.txt").not())
        .stdout(predicate::str::contains("# Total differences found: 0"));

    let report = workspace_dir.path().join("left-right/diff.csv");
    assert_eq!(read_file(&report), REPORT_HEADER);
}

#[rstest]
fn without_cache_flag_snapshots_are_regenerated(workspace_dir: TempDir) {
    write(&workspace_dir, "left/a.txt", "same\n");
    write(&workspace_dir, "right/a.txt", "same\n");
    compare(workspace_dir.path(), &[]).assert().success();

    write(&workspace_dir, "right/a.txt", "changed\n");
    compare(workspace_dir.path(), &[])
        .assert()
        .success()
        .stdout(predicate::str::contains("# Total differences found: 1"));

    assert_eq!(
        read_file(&workspace_dir.path().join("left-right/right-checksums.csv")),
        format!("a.txt,{}\n", sha1_hex("changed\n"))
    );
}

#[rstest]
fn missing_cache_is_generated_on_first_use(workspace_dir: TempDir) {
    write(&workspace_dir, "left/a.txt", "one\n");
    write(&workspace_dir, "right/a.txt", "two\n");

    compare(workspace_dir.path(), &["--use-cache"])
        .assert()
        .success()
        .stdout(predicate::str::contains("# Checksums for left generated"))
        .stdout(predicate::str::contains("# Checksums for right generated"));

    assert_eq!(
        read_file(&workspace_dir.path().join("left-right/left-checksums.csv")),
        format!("a.txt,{}\n", sha1_hex("one\n"))
    );
}

#[rstest]
fn corrupt_cache_is_regenerated(workspace_dir: TempDir) {
    write(&workspace_dir, "left/a.txt", "one\n");
    write(&workspace_dir, "right/a.txt", "two\n");
    write(
        &workspace_dir,
        "left-right/left-checksums.csv",
        "a.txt,not-a-checksum\n",
    );

    compare(workspace_dir.path(), &["--use-cache"])
        .assert()
        .success()
        .stdout(predicate::str::contains("# Checksums for left generated"))
        .stderr(predicate::str::contains("corrupt"));

    assert_eq!(
        read_file(&workspace_dir.path().join("left-right/left-checksums.csv")),
        format!("a.txt,{}\n", sha1_hex("one\n"))
    );
}
