//! Filesystem-facing components of a comparison
//!
//! - `workspace`: one of the two compared directories
//! - `checksum_store`: per-directory checksums, cached as CSV snapshots
//! - `diff_engine`: turns each differing file into a copy or a `.diff`
//! - `comparison`: the two sides, the output layout and the run options

pub mod checksum_store;
pub mod comparison;
pub mod diff_engine;
pub mod workspace;
