//! Checksum store
//!
//! Maps the base name of every top-level file in one directory to the checksum
//! of its content. A store is either generated by hashing the directory or
//! loaded verbatim from the snapshot a previous run left in the output
//! directory.
//!
//! ## Snapshot format
//!
//! `fileName,checksum` rows without a header, one per file, appended while the
//! directory is being hashed.
//!
//! ## Cache semantics
//!
//! A cached snapshot is trusted as-is: its checksums are never checked against
//! the current content or modification time of the files. A malformed snapshot
//! is discarded and the directory is hashed again.

use crate::areas::workspace::Workspace;
use crate::artifacts::checksums::cache_writer::CacheWriter;
use crate::artifacts::checksums::checksum::Checksum;
use crate::artifacts::checksums::checksum_entry::ChecksumEntry;
use crate::artifacts::core::csv;
use crate::errors::{CompareError, Result};
use std::collections::BTreeMap;
use std::io::{self, Write};
use std::path::Path;
use tracing::{debug, warn};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChecksumStore {
    entries: BTreeMap<String, Checksum>,
}

impl ChecksumStore {
    /// Build the store for `workspace`
    ///
    /// With `use_cache`, a well-formed snapshot at `cache_path` is returned
    /// without touching the workspace. Otherwise any snapshot there is removed
    /// and regenerated, one flushed row per hashed file. A progress line per
    /// file is written to `progress`.
    pub fn build(
        workspace: &Workspace,
        use_cache: bool,
        cache_path: &Path,
        progress: &mut dyn Write,
    ) -> Result<Self> {
        if use_cache {
            match Self::load(cache_path) {
                Ok(Some(store)) => {
                    debug!(
                        cache = %cache_path.display(),
                        entries = store.len(),
                        "using cached checksums"
                    );
                    return Ok(store);
                }
                Ok(None) => {
                    debug!(cache = %cache_path.display(), "no cached checksums found");
                }
                Err(CompareError::CacheCorrupt { path, reason }) => {
                    warn!(
                        cache = %path.display(),
                        %reason,
                        "ignoring corrupt checksum cache, regenerating"
                    );
                }
                Err(e) => return Err(e),
            }
        }

        Self::discard(cache_path)?;
        Self::generate(workspace, cache_path, progress)
    }

    /// Load a snapshot, returning `None` if there is none at `cache_path`
    pub fn load(cache_path: &Path) -> Result<Option<Self>> {
        let content = match std::fs::read(cache_path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(CompareError::file_unreadable(cache_path)(e)),
        };

        let corrupt = |reason: String| CompareError::CacheCorrupt {
            path: cache_path.to_path_buf(),
            reason,
        };

        let content =
            String::from_utf8(content).map_err(|_| corrupt("not valid UTF-8".to_string()))?;
        let records = csv::parse_records(&content).map_err(|e| corrupt(e.to_string()))?;

        let mut entries = BTreeMap::new();
        for (row, record) in records.into_iter().enumerate() {
            let entry = ChecksumEntry::try_from_record(record)
                .map_err(|reason| corrupt(format!("row {}: {reason}", row + 1)))?;
            // later rows win if a name was written twice
            entries.insert(entry.file_name, entry.checksum);
        }

        Ok(Some(ChecksumStore { entries }))
    }

    fn discard(cache_path: &Path) -> Result<()> {
        match std::fs::remove_file(cache_path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(CompareError::output_write_failure(cache_path)(e)),
        }
    }

    fn generate(workspace: &Workspace, cache_path: &Path, progress: &mut dyn Write) -> Result<Self> {
        let file_names = workspace.list_files()?;

        let mut cache_file = std::fs::OpenOptions::new()
            .append(true)
            .create(true)
            .open(cache_path)
            .map_err(CompareError::output_write_failure(cache_path))?;
        let lock = file_guard::lock(&mut cache_file, file_guard::Lock::Exclusive, 0, 1)
            .map_err(CompareError::output_write_failure(cache_path))?;
        let mut cache = CacheWriter::new(lock);

        let mut entries = BTreeMap::new();
        for file_name in file_names {
            let checksum = workspace.checksum_file(&file_name)?;
            let entry = ChecksumEntry::new(file_name, checksum);

            cache
                .append(&entry)
                .map_err(CompareError::output_write_failure(cache_path))?;
            writeln!(
                progress,
                " - {}: {}",
                workspace.file_path(&entry.file_name).display(),
                entry.checksum
            )
            .map_err(CompareError::progress)?;

            entries.insert(entry.file_name, entry.checksum);
        }

        writeln!(
            progress,
            "# Checksums for {} generated ({})",
            workspace.path().display(),
            cache_path.display()
        )
        .map_err(CompareError::progress)?;

        Ok(ChecksumStore { entries })
    }

    pub fn get(&self, file_name: &str) -> Option<&Checksum> {
        self.entries.get(file_name)
    }

    pub fn file_names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<ChecksumEntry> for ChecksumStore {
    fn from_iter<I: IntoIterator<Item = ChecksumEntry>>(iter: I) -> Self {
        ChecksumStore {
            entries: iter
                .into_iter()
                .map(|entry| (entry.file_name, entry.checksum))
                .collect(),
        }
    }
}
