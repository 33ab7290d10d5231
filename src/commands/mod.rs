//! Command implementations
//!
//! - `compare`: the full run, from checksumming both sides to the diff artifacts

pub mod compare;
