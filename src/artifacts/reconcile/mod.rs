//! Reconciliation of two checksum stores
//!
//! - `reconciliation_record`: the per-file difference and the `reconcile` pass
//! - `report`: persisting the records as `diff.csv` and reading them back

pub mod reconciliation_record;
pub mod report;
