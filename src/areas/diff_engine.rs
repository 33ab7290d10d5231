//! Diff engine
//!
//! Resolves one reconciliation record at a time into an artifact under the
//! `diffs/` directory:
//!
//! - file missing on one side: the present file is copied there verbatim
//! - file present on both sides: `<name>.diff` holds their unified diff,
//!   computed over the full content, or over the last lines of each file
//!   when either one is larger than the size limit
//!
//! A record whose file is missing on both sides cannot come out of
//! reconciliation and is reported as an error instead of being skipped.
//! Two records whose artifacts would land on the same path (a one-sided
//! `x.diff` next to a diffed `x`) fail the second write.

use crate::areas::workspace::Workspace;
use crate::artifacts::core::size::human_readable_size;
use crate::artifacts::diff::DIFF_FILE_SUFFIX;
use crate::artifacts::diff::diff_outcome::{ComparisonStrategy, DiffOutcome};
use crate::artifacts::diff::last_lines::LastLinesReader;
use crate::artifacts::diff::unified::{DiffSide, UnifiedDiffer};
use crate::artifacts::reconcile::reconciliation_record::ReconciliationRecord;
use crate::errors::{CompareError, Result};
use bytes::Bytes;
use std::cell::RefCell;
use std::collections::HashSet;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

pub struct DiffEngine<'e> {
    side_a: &'e Workspace,
    side_b: &'e Workspace,
    diffs_path: Box<Path>,
    size_limit: u64,
    line_limit: usize,
    tail: Box<dyn LastLinesReader + 'e>,
    differ: Box<dyn UnifiedDiffer + 'e>,
    written: RefCell<HashSet<PathBuf>>,
}

impl<'e> DiffEngine<'e> {
    pub fn new(
        side_a: &'e Workspace,
        side_b: &'e Workspace,
        diffs_path: Box<Path>,
        size_limit: u64,
        line_limit: usize,
        tail: Box<dyn LastLinesReader + 'e>,
        differ: Box<dyn UnifiedDiffer + 'e>,
    ) -> Self {
        DiffEngine {
            side_a,
            side_b,
            diffs_path,
            size_limit,
            line_limit,
            tail,
            differ,
            written: RefCell::new(HashSet::new()),
        }
    }

    /// Where the artifact for `file_name` is written for a given outcome
    pub fn artifact_path(&self, file_name: &str, outcome: DiffOutcome) -> PathBuf {
        match outcome {
            DiffOutcome::CopiedFromA | DiffOutcome::CopiedFromB => self.diffs_path.join(file_name),
            DiffOutcome::UnifiedDiffProduced | DiffOutcome::NoDiffContentButListed => self
                .diffs_path
                .join(format!("{file_name}{DIFF_FILE_SUFFIX}")),
        }
    }

    pub fn resolve(
        &self,
        record: &ReconciliationRecord,
        progress: &mut dyn Write,
    ) -> Result<DiffOutcome> {
        let file_name = record.file_name.as_str();

        let stat_a = self.side_a.stat_file(file_name)?;
        let stat_b = self.side_b.stat_file(file_name)?;

        match (stat_a, stat_b) {
            (None, None) => Err(CompareError::MissingOnBothSides {
                file_name: file_name.to_string(),
                dir_a: self.side_a.path().to_path_buf(),
                dir_b: self.side_b.path().to_path_buf(),
            }),
            (None, Some(_)) => self.copy(self.side_b, file_name, DiffOutcome::CopiedFromB, progress),
            (Some(_), None) => self.copy(self.side_a, file_name, DiffOutcome::CopiedFromA, progress),
            (Some(a), Some(b)) => self.diff(file_name, a.len(), b.len(), progress),
        }
    }

    fn copy(
        &self,
        source: &Workspace,
        file_name: &str,
        outcome: DiffOutcome,
        progress: &mut dyn Write,
    ) -> Result<DiffOutcome> {
        let destination = self.artifact_path(file_name, outcome);
        self.claim(&destination)?;

        source.copy_file(file_name, &destination)?;
        writeln!(
            progress,
            "# File copied from {} to {}",
            source.file_path(file_name).display(),
            destination.display()
        )
        .map_err(CompareError::progress)?;

        Ok(outcome)
    }

    fn diff(
        &self,
        file_name: &str,
        size_a: u64,
        size_b: u64,
        progress: &mut dyn Write,
    ) -> Result<DiffOutcome> {
        let strategy = ComparisonStrategy::select(size_a, size_b, self.size_limit, self.line_limit);
        debug!(
            file = file_name,
            size_limit = self.size_limit,
            size_a,
            size_b,
            ?strategy,
            "comparing files"
        );

        let (content_a, content_b) = match strategy {
            ComparisonStrategy::Full => (
                self.side_a.read_file(file_name)?,
                self.side_b.read_file(file_name)?,
            ),
            ComparisonStrategy::TailWindow { lines } => (
                self.last_lines(self.side_a, file_name, lines)?,
                self.last_lines(self.side_b, file_name, lines)?,
            ),
        };

        let label_a = self.side_a.file_path(file_name);
        let label_b = self.side_b.file_path(file_name);
        let label_a = label_a.to_string_lossy();
        let label_b = label_b.to_string_lossy();
        let diff = self.differ.unified_diff(
            DiffSide::new(&label_a, &content_a),
            DiffSide::new(&label_b, &content_b),
        )?;

        let outcome = if diff.is_empty() {
            DiffOutcome::NoDiffContentButListed
        } else {
            DiffOutcome::UnifiedDiffProduced
        };

        let artifact = self.artifact_path(file_name, outcome);
        self.claim(&artifact)?;
        std::fs::write(&artifact, &diff).map_err(CompareError::output_write_failure(&artifact))?;

        writeln!(
            progress,
            " - diff generated for {} ({}) and {} ({})",
            label_a,
            human_readable_size(size_a),
            label_b,
            human_readable_size(size_b)
        )
        .map_err(CompareError::progress)?;
        if outcome == DiffOutcome::NoDiffContentButListed {
            debug!(
                file = file_name,
                "compared content is identical although checksums differ"
            );
        }

        Ok(outcome)
    }

    fn last_lines(&self, side: &Workspace, file_name: &str, lines: usize) -> Result<Bytes> {
        self.tail.last_lines(&side.file_path(file_name), lines)
    }

    /// Reserve `path` for a single artifact of this run
    fn claim(&self, path: &Path) -> Result<()> {
        if self.written.borrow_mut().insert(path.to_path_buf()) {
            return Ok(());
        }

        Err(CompareError::output_write_failure(path)(io::Error::new(
            io::ErrorKind::AlreadyExists,
            "artifact already written by another file of this comparison",
        )))
    }
}
