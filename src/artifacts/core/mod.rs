//! Core utilities and shared types
//!
//! - `csv`: record codec used by the checksum snapshots and `diff.csv`
//! - `size`: human-readable byte counts for progress output

pub mod csv;
pub mod size;
