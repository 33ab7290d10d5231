//! Comparison report (`diff.csv`)
//!
//! The report is the hand-off between reconciliation and diffing: it is
//! written once, then read back and resolved row by row.
//!
//! ## Format
//!
//! ```text
//! File Name,Checksum <dirA>,Checksum <dirB>
//! a.txt,<checksum>,<checksum>
//! b.txt,,<checksum>
//! ```

use crate::artifacts::checksums::checksum::Checksum;
use crate::artifacts::core::csv;
use crate::artifacts::reconcile::reconciliation_record::ReconciliationRecord;
use crate::errors::{CompareError, Result};
use derive_new::new;
use std::io::Write;
use std::path::Path;

pub const REPORT_FILE_NAME: &str = "diff.csv";

const FILE_NAME_COLUMN: &str = "File Name";
const CHECKSUM_COLUMN_PREFIX: &str = "Checksum ";

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct ComparisonReport {
    /// How side A is named in the header, usually its directory path
    label_a: String,
    label_b: String,
    records: Vec<ReconciliationRecord>,
}

impl ComparisonReport {
    pub fn label_a(&self) -> &str {
        &self.label_a
    }

    pub fn label_b(&self) -> &str {
        &self.label_b
    }

    pub fn records(&self) -> &[ReconciliationRecord] {
        &self.records
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        let column_a = format!("{CHECKSUM_COLUMN_PREFIX}{}", self.label_a);
        let column_b = format!("{CHECKSUM_COLUMN_PREFIX}{}", self.label_b);

        let mut content = csv::encode_record(&[FILE_NAME_COLUMN, &column_a, &column_b]);
        for record in &self.records {
            content.push_str(&csv::encode_record(&[
                &record.file_name,
                record.checksum_a.as_ref().map_or("", |c| c.as_ref()),
                record.checksum_b.as_ref().map_or("", |c| c.as_ref()),
            ]));
        }

        let mut file =
            std::fs::File::create(path).map_err(CompareError::output_write_failure(path))?;
        file.write_all(content.as_bytes())
            .map_err(CompareError::output_write_failure(path))
    }

    pub fn read(path: &Path) -> Result<Self> {
        let malformed = |reason: String| CompareError::ReportMalformed {
            path: path.to_path_buf(),
            reason,
        };

        let content = std::fs::read(path).map_err(CompareError::file_unreadable(path))?;
        let content =
            String::from_utf8(content).map_err(|_| malformed("not valid UTF-8".to_string()))?;
        let mut records = csv::parse_records(&content)
            .map_err(|e| malformed(e.to_string()))?
            .into_iter();

        let header = records
            .next()
            .ok_or_else(|| malformed("missing header row".to_string()))?;
        let (label_a, label_b) = match header.as_slice() {
            [file_name, column_a, column_b] if file_name == FILE_NAME_COLUMN => {
                match (
                    column_a.strip_prefix(CHECKSUM_COLUMN_PREFIX),
                    column_b.strip_prefix(CHECKSUM_COLUMN_PREFIX),
                ) {
                    (Some(a), Some(b)) => (a.to_string(), b.to_string()),
                    _ => return Err(malformed(format!("unexpected header {header:?}"))),
                }
            }
            _ => return Err(malformed(format!("unexpected header {header:?}"))),
        };

        let records = records
            .enumerate()
            .map(|(row, record)| {
                let [file_name, checksum_a, checksum_b]: [String; 3] =
                    record.try_into().map_err(|record: Vec<String>| {
                        malformed(format!(
                            "row {}: expected 3 fields, found {}",
                            row + 2,
                            record.len()
                        ))
                    })?;

                let parse = |raw: String| -> Result<Option<Checksum>> {
                    if raw.is_empty() {
                        return Ok(None);
                    }
                    Checksum::try_parse(raw)
                        .map(Some)
                        .map_err(|e| malformed(format!("row {}: {e}", row + 2)))
                };

                Ok(ReconciliationRecord::new(
                    file_name,
                    parse(checksum_a)?,
                    parse(checksum_b)?,
                ))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(ComparisonReport::new(label_a, label_b, records))
    }
}
