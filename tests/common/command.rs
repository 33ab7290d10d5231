use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::Path;

/// Working directory holding empty `left` and `right` directories
#[fixture]
pub fn workspace_dir() -> TempDir {
    let dir = TempDir::new().expect("Failed to create temp dir");
    std::fs::create_dir(dir.path().join("left")).expect("Failed to create left directory");
    std::fs::create_dir(dir.path().join("right")).expect("Failed to create right directory");
    dir
}

pub fn run_dircmp_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("dircmp").expect("Failed to find dircmp binary");
    cmd.current_dir(dir);
    cmd.env_remove("RUST_LOG");
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

/// Compare `left` against `right` inside `dir`, so the output lands in `dir/left-right`
pub fn compare(dir: &Path, flags: &[&str]) -> Command {
    let mut args = flags.to_vec();
    args.extend(["left", "right"]);
    run_dircmp_command(dir, &args)
}
