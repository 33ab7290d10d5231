//! Unified diff producers
//!
//! `MyersDiffer` computes the diff in-process; `SystemDiffer` delegates to a
//! `diff -u` compatible program. Both emit the same layout: `---`/`+++`
//! headers carrying the side labels, GNU-style hunk headers, and a
//! `\ No newline at end of file` marker after a final line without a newline.
//! Identical inputs produce no output at all.

use crate::artifacts::diff::diff_algorithm::MyersDiff;
use crate::artifacts::diff::hunk::{HUNK_CONTEXT, Hunk};
use crate::errors::{CompareError, Result};
use derive_new::new;
use std::io::Write;
use std::process::Command;
use tempfile::NamedTempFile;

const NO_NEWLINE_MARKER: &[u8] = b"\\ No newline at end of file\n";

/// Content of one side of a diff along with the name shown in its header
#[derive(Debug, Clone, Copy, new)]
pub struct DiffSide<'d> {
    pub label: &'d str,
    pub content: &'d [u8],
}

pub trait UnifiedDiffer {
    fn unified_diff(&self, old: DiffSide<'_>, new: DiffSide<'_>) -> Result<Vec<u8>>;
}

/// Split content into lines, each keeping its trailing `\n` if it has one
fn split_lines(content: &[u8]) -> Vec<&[u8]> {
    content.split_inclusive(|&byte| byte == b'\n').collect()
}

#[derive(Debug, Clone, new)]
pub struct MyersDiffer {
    context: usize,
}

impl Default for MyersDiffer {
    fn default() -> Self {
        MyersDiffer::new(HUNK_CONTEXT)
    }
}

impl UnifiedDiffer for MyersDiffer {
    fn unified_diff(&self, old: DiffSide<'_>, new: DiffSide<'_>) -> Result<Vec<u8>> {
        let a = split_lines(old.content);
        let b = split_lines(new.content);

        let edits = MyersDiff::new(&a, &b).diff();
        let hunks = Hunk::build(&edits, self.context);
        if hunks.is_empty() {
            return Ok(Vec::new());
        }

        let mut output = Vec::new();
        output.extend_from_slice(format!("--- {}\n+++ {}\n", old.label, new.label).as_bytes());

        for hunk in hunks {
            output.extend_from_slice(hunk.header().as_bytes());
            output.push(b'\n');

            for edit in hunk.edits() {
                let line = edit.value();
                output.push(edit.marker());
                output.extend_from_slice(line);
                if !line.ends_with(b"\n") {
                    output.push(b'\n');
                    output.extend_from_slice(NO_NEWLINE_MARKER);
                }
            }
        }

        Ok(output)
    }
}

/// Runs an external `diff -u` over temporary copies of both sides
#[derive(Debug, Clone, new)]
pub struct SystemDiffer {
    program: String,
}

impl Default for SystemDiffer {
    fn default() -> Self {
        SystemDiffer::new("diff".to_string())
    }
}

impl SystemDiffer {
    fn failure(&self, message: impl Into<String>) -> CompareError {
        CompareError::ExternalToolFailure {
            tool: self.program.clone(),
            message: message.into(),
        }
    }

    fn spill(&self, content: &[u8]) -> Result<NamedTempFile> {
        let mut file = NamedTempFile::new()
            .map_err(|e| self.failure(format!("unable to create temporary file: {e}")))?;
        file.write_all(content)
            .and_then(|_| file.flush())
            .map_err(|e| self.failure(format!("unable to write temporary file: {e}")))?;
        Ok(file)
    }
}

impl UnifiedDiffer for SystemDiffer {
    fn unified_diff(&self, old: DiffSide<'_>, new: DiffSide<'_>) -> Result<Vec<u8>> {
        let old_file = self.spill(old.content)?;
        let new_file = self.spill(new.content)?;

        let output = Command::new(&self.program)
            .arg("-u")
            .arg("--label")
            .arg(old.label)
            .arg("--label")
            .arg(new.label)
            .arg(old_file.path())
            .arg(new_file.path())
            .output()
            .map_err(|e| self.failure(format!("unable to run: {e}")))?;

        // exit status 1 only means the inputs differ
        match output.status.code() {
            Some(0) | Some(1) => Ok(output.stdout),
            _ if !output.stdout.is_empty() => Ok(output.stdout),
            _ => Err(self.failure(format!(
                "{} ({})",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            ))),
        }
    }
}
