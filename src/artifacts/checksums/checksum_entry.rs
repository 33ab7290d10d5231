use crate::artifacts::checksums::checksum::Checksum;
use crate::artifacts::core::csv;
use derive_new::new;

/// One row of a checksum snapshot: a file's base name and its checksum
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct ChecksumEntry {
    pub file_name: String,
    pub checksum: Checksum,
}

impl ChecksumEntry {
    /// Serialize as a `fileName,checksum` line
    pub fn to_csv_line(&self) -> String {
        csv::encode_record(&[&self.file_name, self.checksum.as_ref()])
    }

    /// Parse a record read from a snapshot
    ///
    /// Returns a human-readable reason on failure, which the caller reports as
    /// a corrupt cache.
    pub fn try_from_record(record: Vec<String>) -> Result<Self, String> {
        let [file_name, checksum]: [String; 2] = record
            .try_into()
            .map_err(|record: Vec<String>| format!("expected 2 fields, found {}", record.len()))?;
        let checksum = Checksum::try_parse(checksum).map_err(|e| e.to_string())?;

        Ok(ChecksumEntry::new(file_name, checksum))
    }
}
