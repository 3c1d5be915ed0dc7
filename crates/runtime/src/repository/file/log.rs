//! Append-only JSON-lines action log.
//!
//! Each accepted action becomes one line:
//!
//! ```text
//! {"sequence":0,"round":1,"action":{"Attack":{"target":0}},"digest":"9f86…"}
//! ```
//!
//! The digest is the session digest *after* the action committed, which lets
//! [`crate::verify_log`] pinpoint the first divergent step on replay.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use encounter_core::Action;

use crate::repository::{RepositoryError, Result};

/// One accepted action and the state it produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionLogEntry {
    /// Zero-based position in the log
    pub sequence: u64,

    /// Round the session was in after the action
    pub round: u32,

    /// The action that was accepted
    pub action: Action,

    /// Hex SHA-256 of the session after the action
    pub digest: String,
}

/// Append-only action log backed by a file.
pub struct ActionLog {
    path: PathBuf,
    writer: BufWriter<File>,
    next_sequence: u64,
}

impl ActionLog {
    /// Create a new log file.
    ///
    /// # Errors
    ///
    /// Returns error if the file already exists (prevents accidental overwrites).
    pub fn create(base_dir: impl AsRef<Path>, filename: impl AsRef<str>) -> Result<Self> {
        let base_dir = base_dir.as_ref();
        std::fs::create_dir_all(base_dir).map_err(RepositoryError::Io)?;

        let path = base_dir.join(filename.as_ref());
        if path.exists() {
            return Err(RepositoryError::LogAlreadyExists(
                path.display().to_string(),
            ));
        }

        let file = OpenOptions::new()
            .create_new(true)
            .write(true)
            .open(&path)
            .map_err(RepositoryError::Io)?;

        tracing::debug!("Created action log: {}", path.display());

        Ok(Self {
            path,
            writer: BufWriter::new(file),
            next_sequence: 0,
        })
    }

    /// Open an existing log for appending, continuing its sequence.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let next_sequence = Self::read_all(&path)?.len() as u64;

        let file = OpenOptions::new()
            .append(true)
            .open(&path)
            .map_err(RepositoryError::Io)?;

        tracing::debug!(
            "Opened action log: {} at sequence {}",
            path.display(),
            next_sequence
        );

        Ok(Self {
            path,
            writer: BufWriter::new(file),
            next_sequence,
        })
    }

    /// Append one entry and flush it.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::OutOfSequence`] unless the entry's sequence
    /// is [`Self::next_sequence`]; nothing is written in that case.
    pub fn append(&mut self, entry: &ActionLogEntry) -> Result<()> {
        if entry.sequence != self.next_sequence {
            return Err(RepositoryError::OutOfSequence {
                expected: self.next_sequence,
                found: entry.sequence,
            });
        }

        serde_json::to_writer(&mut self.writer, entry)?;
        self.writer.write_all(b"\n").map_err(RepositoryError::Io)?;
        self.writer.flush().map_err(RepositoryError::Io)?;
        self.next_sequence += 1;
        Ok(())
    }

    /// Flush buffered writes to disk
    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush().map_err(RepositoryError::Io)
    }

    pub fn next_sequence(&self) -> u64 {
        self.next_sequence
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every entry of a log file in order. Blank lines are skipped.
    pub fn read_all(path: impl AsRef<Path>) -> Result<Vec<ActionLogEntry>> {
        let file = File::open(path.as_ref()).map_err(RepositoryError::Io)?;
        let mut entries = Vec::new();
        for line in BufReader::new(file).lines() {
            let line = line.map_err(RepositoryError::Io)?;
            if line.trim().is_empty() {
                continue;
            }
            entries.push(serde_json::from_str(&line)?);
        }
        Ok(entries)
    }
}

impl Drop for ActionLog {
    fn drop(&mut self) {
        let _ = self.writer.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use encounter_core::AdversaryId;

    fn entry(sequence: u64) -> ActionLogEntry {
        ActionLogEntry {
            sequence,
            round: 1,
            action: Action::attack(AdversaryId(0)),
            digest: "00".repeat(32),
        }
    }

    #[test]
    fn appends_and_reads_back_in_order() {
        let dir = tempfile::tempdir().expect("temp dir");
        let mut log = ActionLog::create(dir.path(), "actions.jsonl").expect("create");
        log.append(&entry(0)).expect("append");
        log.append(&entry(1)).expect("append");
        log.flush().expect("flush");

        let entries = ActionLog::read_all(log.path()).expect("read");
        assert_eq!(entries, vec![entry(0), entry(1)]);
        assert_eq!(log.next_sequence(), 2);
    }

    #[test]
    fn rejects_entries_out_of_sequence() {
        let dir = tempfile::tempdir().expect("temp dir");
        let mut log = ActionLog::create(dir.path(), "actions.jsonl").expect("create");
        log.append(&entry(0)).expect("append");

        for sequence in [0, 2, 7] {
            assert!(matches!(
                log.append(&entry(sequence)),
                Err(RepositoryError::OutOfSequence { expected: 1, found }) if found == sequence
            ));
        }
        assert_eq!(log.next_sequence(), 1);
        assert_eq!(ActionLog::read_all(log.path()).expect("read"), vec![entry(0)]);
    }

    #[test]
    fn appended_entries_are_on_disk_without_flush() {
        let dir = tempfile::tempdir().expect("temp dir");
        let mut log = ActionLog::create(dir.path(), "actions.jsonl").expect("create");
        log.append(&entry(0)).expect("append");

        assert_eq!(ActionLog::read_all(log.path()).expect("read"), vec![entry(0)]);
    }

    #[test]
    fn refuses_to_overwrite_existing_log() {
        let dir = tempfile::tempdir().expect("temp dir");
        let _log = ActionLog::create(dir.path(), "actions.jsonl").expect("create");
        assert!(matches!(
            ActionLog::create(dir.path(), "actions.jsonl"),
            Err(RepositoryError::LogAlreadyExists(_))
        ));
    }

    #[test]
    fn reopening_continues_the_sequence() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = {
            let mut log = ActionLog::create(dir.path(), "actions.jsonl").expect("create");
            log.append(&entry(0)).expect("append");
            log.path().to_path_buf()
        };

        let mut log = ActionLog::open(&path).expect("open");
        assert_eq!(log.next_sequence(), 1);
        log.append(&entry(1)).expect("append");
        log.flush().expect("flush");
        assert_eq!(ActionLog::read_all(&path).expect("read").len(), 2);
    }

    #[test]
    fn corrupt_line_is_a_json_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("broken.jsonl");
        std::fs::write(&path, "{not json}\n").expect("write");
        assert!(matches!(
            ActionLog::read_all(&path),
            Err(RepositoryError::Json(_))
        ));
    }
}
