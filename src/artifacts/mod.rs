//! Comparison data structures and algorithms
//!
//! - `checksums`: checksum values, snapshot rows and the locked snapshot writer
//! - `core`: shared utilities (CSV codec, human-readable sizes)
//! - `diff`: Myers' diff, unified output and tail-window reading
//! - `reconcile`: matching two checksum stores into the `diff.csv` report

pub mod checksums;
pub mod core;
pub mod diff;
pub mod reconcile;
