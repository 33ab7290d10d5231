//! Checksum data types
//!
//! - `checksum`: validated SHA-1 content digest
//! - `checksum_entry`: one `fileName,checksum` snapshot row
//! - `cache_writer`: locked, flush-per-row snapshot writer

pub mod cache_writer;
pub mod checksum;
pub mod checksum_entry;

/// Length of a hex-encoded SHA-1 digest
pub const CHECKSUM_LENGTH: usize = 40;
pub const CHECKSUMS_FILE_SUFFIX: &str = "-checksums.csv";
