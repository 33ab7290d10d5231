use crate::artifacts::checksums::checksum_entry::ChecksumEntry;
use file_guard::FileGuard;
use std::io::Write;
use std::ops::DerefMut;

/// Append-only writer for a checksum snapshot
///
/// Each entry goes out as a single complete line and is flushed before the
/// next one is hashed, so a run that dies half-way leaves a snapshot whose
/// rows are all whole. The snapshot stays exclusively locked while the
/// writer is alive.
#[derive(Debug)]
pub struct CacheWriter<'f> {
    file: FileGuard<&'f mut std::fs::File>,
}

impl<'f> CacheWriter<'f> {
    pub(crate) fn new(file: FileGuard<&'f mut std::fs::File>) -> Self {
        CacheWriter { file }
    }

    pub(crate) fn append(&mut self, entry: &ChecksumEntry) -> std::io::Result<()> {
        let line = entry.to_csv_line();

        self.file.deref_mut().write_all(line.as_bytes())?;
        self.file.deref_mut().flush()
    }
}
