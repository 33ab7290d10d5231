use crate::areas::workspace::Workspace;
use crate::artifacts::checksums::CHECKSUMS_FILE_SUFFIX;
use crate::artifacts::diff::DIFFS_DIR_NAME;
use crate::artifacts::reconcile::report::REPORT_FILE_NAME;
use derive_new::new;
use std::cell::{RefCell, RefMut};
use std::path::{Component, Path, PathBuf};

pub const DEFAULT_LINE_LIMIT: usize = 50;
pub const DEFAULT_SIZE_LIMIT_MB: u64 = 100;

/// Settings of one comparison run, passed explicitly to every stage
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct CompareOptions {
    /// Lines kept from the end of each file when using the tail window
    pub line_limit: usize,
    /// Files larger than this many MiB are compared on their tail only
    pub size_limit_mb: u64,
    /// Trust checksum snapshots left by a previous run
    pub use_cache: bool,
    /// Emit debug diagnostics on stderr
    pub debug: bool,
    /// Use the system `tail` and `diff` instead of the built-in ones
    pub external_tools: bool,
}

impl Default for CompareOptions {
    fn default() -> Self {
        CompareOptions::new(DEFAULT_LINE_LIMIT, DEFAULT_SIZE_LIMIT_MB, false, false, false)
    }
}

impl CompareOptions {
    pub fn size_limit_bytes(&self) -> u64 {
        self.size_limit_mb.saturating_mul(1024 * 1024)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    A,
    B,
}

/// Normalize a path lexically: drop `.` components and trailing separators
fn clean_path(path: &Path) -> PathBuf {
    let cleaned = path
        .components()
        .filter(|component| !matches!(component, Component::CurDir))
        .collect::<PathBuf>();

    if cleaned.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        cleaned
    }
}

/// Last component of a side's path, used to name its checksum snapshot
///
/// A filesystem root has no such component and is named `root`, so the
/// snapshot still lands inside the output directory.
fn base_name(path: &Path) -> String {
    match path.components().next_back() {
        Some(Component::Normal(name)) => name.to_string_lossy().into_owned(),
        Some(component @ (Component::CurDir | Component::ParentDir)) => {
            component.as_os_str().to_string_lossy().into_owned()
        }
        Some(Component::RootDir | Component::Prefix(_)) | None => "root".to_string(),
    }
}

/// State of a comparison between two directories
///
/// Everything the run produces lands in `<dirA>-<dirB>`: one checksum
/// snapshot per side, the `diff.csv` report and the `diffs/` artifacts.
pub struct Comparison {
    side_a: Workspace,
    side_b: Workspace,
    output_path: Box<Path>,
    options: CompareOptions,
    writer: RefCell<Box<dyn std::io::Write>>,
}

impl Comparison {
    pub fn new(
        dir_a: &Path,
        dir_b: &Path,
        options: CompareOptions,
        writer: Box<dyn std::io::Write>,
    ) -> Self {
        let dir_a = clean_path(dir_a);
        let dir_b = clean_path(dir_b);
        let output_path = clean_path(Path::new(&format!(
            "{}-{}",
            dir_a.to_string_lossy(),
            dir_b.to_string_lossy()
        )));

        Comparison {
            side_a: Workspace::new(dir_a.into_boxed_path()),
            side_b: Workspace::new(dir_b.into_boxed_path()),
            output_path: output_path.into_boxed_path(),
            options,
            writer: RefCell::new(writer),
        }
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn options(&self) -> &CompareOptions {
        &self.options
    }

    pub fn side(&self, side: Side) -> &Workspace {
        match side {
            Side::A => &self.side_a,
            Side::B => &self.side_b,
        }
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    pub fn report_path(&self) -> PathBuf {
        self.output_path.join(REPORT_FILE_NAME)
    }

    pub fn diffs_path(&self) -> PathBuf {
        self.output_path.join(DIFFS_DIR_NAME)
    }

    /// `<baseName>-checksums.csv`, numbered per side when both directories
    /// share a base name so the snapshots do not overwrite each other
    pub fn checksums_path(&self, side: Side) -> PathBuf {
        let name_a = base_name(self.side_a.path());
        let name_b = base_name(self.side_b.path());

        let file_name = match (side, name_a == name_b) {
            (Side::A, false) => format!("{name_a}{CHECKSUMS_FILE_SUFFIX}"),
            (Side::B, false) => format!("{name_b}{CHECKSUMS_FILE_SUFFIX}"),
            (Side::A, true) => format!("{name_a}-1{CHECKSUMS_FILE_SUFFIX}"),
            (Side::B, true) => format!("{name_b}-2{CHECKSUMS_FILE_SUFFIX}"),
        };

        self.output_path.join(file_name)
    }
}
