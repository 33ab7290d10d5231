//! Diff algorithms and content comparison
//!
//! - `diff_algorithm`: Myers' diff for line-by-line comparison
//! - `hunk`: grouping an edit script into context hunks
//! - `unified`: unified diff producers (in-process and external `diff`)
//! - `last_lines`: tail-window readers (in-process and external `tail`)
//! - `diff_outcome`: how each differing file was resolved
//!
//! The two capabilities the diff engine depends on, `UnifiedDiffer` and
//! `LastLinesReader`, are traits so that either implementation, or a test
//! double, can be plugged in.

pub mod diff_algorithm;
pub mod diff_outcome;
pub mod hunk;
pub mod last_lines;
pub mod unified;

/// Suffix appended to the file name of a unified diff artifact
pub const DIFF_FILE_SUFFIX: &str = ".diff";
pub const DIFFS_DIR_NAME: &str = "diffs";
