//! Error types for directory comparison
//!
//! Every variant carries the path (or tool) that failed so the message printed
//! by the binary is enough to diagnose the problem without a backtrace.

use std::io;
use std::path::{Path, PathBuf};

pub type Result<T> = std::result::Result<T, CompareError>;

#[derive(Debug, thiserror::Error)]
pub enum CompareError {
    #[error("Unable to read directory {}: {source}", .path.display())]
    DirectoryUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Unable to read file {}: {source}", .path.display())]
    FileUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Checksum cache {} is corrupt: {reason}", .path.display())]
    CacheCorrupt { path: PathBuf, reason: String },

    #[error("Unable to write {}: {source}", .path.display())]
    OutputWriteFailure {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{tool} failed: {message}")]
    ExternalToolFailure { tool: String, message: String },

    #[error(
        "{file_name} is listed as different but exists in neither {} nor {}",
        .dir_a.display(),
        .dir_b.display()
    )]
    MissingOnBothSides {
        file_name: String,
        dir_a: PathBuf,
        dir_b: PathBuf,
    },

    #[error("Comparison report {} is malformed: {reason}", .path.display())]
    ReportMalformed { path: PathBuf, reason: String },

    #[error("File name {} is not valid UTF-8", .path.display())]
    UnsupportedFileName { path: PathBuf },

    #[error("Unable to write progress output: {source}")]
    Progress {
        #[source]
        source: io::Error,
    },
}

impl CompareError {
    pub(crate) fn directory_unreadable(path: &Path) -> impl FnOnce(io::Error) -> Self + '_ {
        move |source| CompareError::DirectoryUnreadable {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn file_unreadable(path: &Path) -> impl FnOnce(io::Error) -> Self + '_ {
        move |source| CompareError::FileUnreadable {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn output_write_failure(path: &Path) -> impl FnOnce(io::Error) -> Self + '_ {
        move |source| CompareError::OutputWriteFailure {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn progress(source: io::Error) -> Self {
        CompareError::Progress { source }
    }
}
