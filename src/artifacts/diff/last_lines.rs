//! Tail-window extraction
//!
//! Both readers follow `tail -n` semantics: lines end at `\n`, a final
//! newline does not start an extra empty line, and a last line without a
//! newline still counts as a line.

use crate::errors::{CompareError, Result};
use bytes::Bytes;
use derive_new::new;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;
use std::process::Command;

pub trait LastLinesReader {
    fn last_lines(&self, path: &Path, count: usize) -> Result<Bytes>;
}

const DEFAULT_BLOCK_SIZE: usize = 64 * 1024;

/// Reads backwards from the end of the file one block at a time, so only the
/// requested window is ever held in memory
#[derive(Debug, Clone, new)]
pub struct TailReader {
    block_size: usize,
}

impl Default for TailReader {
    fn default() -> Self {
        TailReader::new(DEFAULT_BLOCK_SIZE)
    }
}

impl LastLinesReader for TailReader {
    fn last_lines(&self, path: &Path, count: usize) -> Result<Bytes> {
        let mut file = std::fs::File::open(path).map_err(CompareError::file_unreadable(path))?;
        let len = file
            .metadata()
            .map_err(CompareError::file_unreadable(path))?
            .len();

        if count == 0 || len == 0 {
            return Ok(Bytes::new());
        }

        let block_size = self.block_size.max(1) as u64;
        // blocks collected from the end of the file towards its start
        let mut blocks: Vec<Vec<u8>> = Vec::new();
        let mut newlines = 0;
        let mut position = len;

        while position > 0 {
            let start = position.saturating_sub(block_size);
            let mut block = vec![0; (position - start) as usize];
            file.seek(SeekFrom::Start(start))
                .and_then(|_| file.read_exact(&mut block))
                .map_err(CompareError::file_unreadable(path))?;

            for i in (0..block.len()).rev() {
                // the newline terminating the last line does not open a new one
                if block[i] != b'\n' || start + i as u64 == len - 1 {
                    continue;
                }

                newlines += 1;
                if newlines == count {
                    block.drain(..=i);
                    blocks.push(block);
                    return Ok(join_reversed(blocks));
                }
            }

            blocks.push(block);
            position = start;
        }

        // fewer lines than requested: the whole file
        Ok(join_reversed(blocks))
    }
}

fn join_reversed(blocks: Vec<Vec<u8>>) -> Bytes {
    Bytes::from(blocks.into_iter().rev().flatten().collect::<Vec<_>>())
}

/// Runs an external `tail -n`
#[derive(Debug, Clone, new)]
pub struct SystemTail {
    program: String,
}

impl Default for SystemTail {
    fn default() -> Self {
        SystemTail::new("tail".to_string())
    }
}

impl LastLinesReader for SystemTail {
    fn last_lines(&self, path: &Path, count: usize) -> Result<Bytes> {
        let failure = |message: String| CompareError::ExternalToolFailure {
            tool: self.program.clone(),
            message,
        };

        let output = Command::new(&self.program)
            .arg("-n")
            .arg(count.to_string())
            .arg(path)
            .output()
            .map_err(|e| failure(format!("unable to run on {}: {e}", path.display())))?;

        if !output.status.success() {
            return Err(failure(format!(
                "{} on {} ({})",
                output.status,
                path.display(),
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        Ok(Bytes::from(output.stdout))
    }
}
