use crate::artifacts::checksums::checksum::Checksum;
use crate::errors::{CompareError, Result};
use bytes::Bytes;
use std::fs::Metadata;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// One side of a comparison: a directory whose top-level files are compared
#[derive(Debug, Clone)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn file_path(&self, file_name: &str) -> PathBuf {
        self.path.join(file_name)
    }

    /// Base names of every non-directory entry directly inside the workspace
    ///
    /// Subdirectories are skipped, not descended into. Names come back sorted.
    pub fn list_files(&self) -> Result<Vec<String>> {
        let metadata =
            std::fs::metadata(&self.path).map_err(CompareError::directory_unreadable(&self.path))?;
        if !metadata.is_dir() {
            return Err(CompareError::DirectoryUnreadable {
                path: self.path.to_path_buf(),
                source: io::Error::from(io::ErrorKind::NotADirectory),
            });
        }

        let mut file_names = Vec::new();
        for entry in WalkDir::new(&self.path)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|e| CompareError::DirectoryUnreadable {
                path: self.path.to_path_buf(),
                source: io::Error::from(e),
            })?;

            if entry.file_type().is_dir() {
                continue;
            }

            let file_name = entry
                .file_name()
                .to_str()
                .ok_or_else(|| CompareError::UnsupportedFileName {
                    path: entry.path().to_path_buf(),
                })?;
            file_names.push(file_name.to_string());
        }

        Ok(file_names)
    }

    /// Stat a file, mapping "does not exist" to `None`
    pub fn stat_file(&self, file_name: &str) -> Result<Option<Metadata>> {
        let file_path = self.file_path(file_name);

        match std::fs::metadata(&file_path) {
            Ok(metadata) => Ok(Some(metadata)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(CompareError::file_unreadable(&file_path)(e)),
        }
    }

    pub fn checksum_file(&self, file_name: &str) -> Result<Checksum> {
        let file_path = self.file_path(file_name);

        let file = std::fs::File::open(&file_path)
            .map_err(CompareError::file_unreadable(&file_path))?;
        Checksum::compute(&mut BufReader::new(file))
            .map_err(CompareError::file_unreadable(&file_path))
    }

    pub fn read_file(&self, file_name: &str) -> Result<Bytes> {
        let file_path = self.file_path(file_name);

        let content =
            std::fs::read(&file_path).map_err(CompareError::file_unreadable(&file_path))?;

        Ok(Bytes::from(content))
    }

    /// Copy a file verbatim to `destination`, returning the number of bytes copied
    pub fn copy_file(&self, file_name: &str, destination: &Path) -> Result<u64> {
        let file_path = self.file_path(file_name);

        let mut source =
            std::fs::File::open(&file_path).map_err(CompareError::file_unreadable(&file_path))?;
        let mut target = std::fs::File::create(destination)
            .map_err(CompareError::output_write_failure(destination))?;

        io::copy(&mut source, &mut target).map_err(CompareError::output_write_failure(destination))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::TempDir;
    use assert_fs::prelude::*;
    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};

    #[fixture]
    fn workspace_dir() -> TempDir {
        let dir = TempDir::new().expect("Failed to create temp dir");
        dir.child("b.txt").write_str("bee").unwrap();
        dir.child("a.txt").write_str("ay").unwrap();
        dir.child("nested").create_dir_all().unwrap();
        dir.child("nested").child("c.txt").write_str("sea").unwrap();
        dir
    }

    #[rstest]
    fn lists_only_top_level_files_sorted(workspace_dir: TempDir) {
        let workspace = Workspace::new(workspace_dir.path().into());

        let files = workspace.list_files().unwrap();

        assert_eq!(files, vec!["a.txt".to_string(), "b.txt".to_string()]);
    }

    #[rstest]
    fn missing_directory_is_unreadable(workspace_dir: TempDir) {
        let workspace = Workspace::new(workspace_dir.path().join("nope").into());

        let result = workspace.list_files();

        assert!(matches!(
            result,
            Err(CompareError::DirectoryUnreadable { .. })
        ));
    }

    #[rstest]
    fn regular_file_is_not_a_workspace(workspace_dir: TempDir) {
        let workspace = Workspace::new(workspace_dir.path().join("a.txt").into());

        assert!(matches!(
            workspace.list_files(),
            Err(CompareError::DirectoryUnreadable { .. })
        ));
    }

    #[rstest]
    fn stat_of_missing_file_is_none(workspace_dir: TempDir) {
        let workspace = Workspace::new(workspace_dir.path().into());

        assert!(workspace.stat_file("missing.txt").unwrap().is_none());
        assert_eq!(workspace.stat_file("a.txt").unwrap().map(|m| m.len()), Some(2));
    }

    #[rstest]
    fn copies_file_bytes_verbatim(workspace_dir: TempDir) {
        let workspace = Workspace::new(workspace_dir.path().into());
        let destination = workspace_dir.path().join("copy.bin");

        let copied = workspace.copy_file("b.txt", &destination).unwrap();

        assert_eq!(copied, 3);
        assert_eq!(std::fs::read(destination).unwrap(), b"bee".to_vec());
    }
}
