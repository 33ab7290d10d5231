use crate::common::command::{run_dircmp_command, workspace_dir};
use assert_fs::TempDir;
use predicates::prelude::*;
use rstest::rstest;

mod common;

#[rstest]
fn single_directory_is_a_usage_error(workspace_dir: TempDir) {
    run_dircmp_command(workspace_dir.path(), &["left"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("required arguments"));
}

#[rstest]
fn non_numeric_line_limit_is_rejected(workspace_dir: TempDir) {
    run_dircmp_command(workspace_dir.path(), &["--lines", "many", "left", "right"])
        .assert()
        .failure();
}

#[rstest]
fn help_lists_every_flag(workspace_dir: TempDir) {
    run_dircmp_command(workspace_dir.path(), &["--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--lines"))
        .stdout(predicate::str::contains("--size-mb"))
        .stdout(predicate::str::contains("--use-cache"))
        .stdout(predicate::str::contains("--debug"))
        .stdout(predicate::str::contains("--external-tools"));
}
