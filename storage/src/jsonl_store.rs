//! Structured record stream: one JSON object per line, append-only.
//!
//! Each append opens the file, writes one complete line, flushes and closes it, so a
//! crash can only tear the last line. The reader skips lines that do not parse.

use crate::append::append_line;
use crate::error::StorageError;
use crate::models::RecordQuery;
use crate::repository::RecordSink;
use msglog_core::MessageRecord;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;
use tracing::{debug, info, warn};

#[derive(Debug, Clone)]
pub struct JsonlRecordStore {
    path: PathBuf,
}

impl JsonlRecordStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Serializes `record` and appends it as one line.
    pub fn append(&self, record: &MessageRecord) -> Result<(), StorageError> {
        let line = serde_json::to_string(record)?;
        append_line(&self.path, &line).map_err(|source| StorageError::Write {
            path: self.path.clone(),
            source,
        })?;
        debug!(
            chat_id = record.chat_id,
            message_id = record.message_id,
            path = %self.path.display(),
            "Appended record"
        );
        Ok(())
    }

    /// Reads every record from the start of the stream. A missing file reads as empty.
    pub fn load_all(&self) -> Result<Vec<MessageRecord>, StorageError> {
        let file = match File::open(&self.path) {
            Ok(f) => f,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!(path = %self.path.display(), "Record stream does not exist yet");
                return Ok(Vec::new());
            }
            Err(source) => {
                return Err(StorageError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        let mut reader = BufReader::new(file);
        let mut records = Vec::new();
        let mut skipped = 0usize;
        let mut buf = Vec::new();
        let mut line_no = 0usize;
        loop {
            buf.clear();
            let read = reader
                .read_until(b'\n', &mut buf)
                .map_err(|source| StorageError::Read {
                    path: self.path.clone(),
                    source,
                })?;
            if read == 0 {
                break;
            }
            line_no += 1;
            if buf.iter().all(u8::is_ascii_whitespace) {
                continue;
            }
            // Torn writes can leave invalid UTF-8 as well as invalid JSON; both are skipped.
            match serde_json::from_slice::<MessageRecord>(&buf) {
                Ok(record) => records.push(record),
                Err(e) => {
                    skipped += 1;
                    warn!(line = line_no, error = %e, "Skipping unreadable record line");
                }
            }
        }

        info!(
            path = %self.path.display(),
            loaded = records.len(),
            skipped = skipped,
            "Loaded records"
        );
        Ok(records)
    }

    /// Reads all records and keeps those matching `query`, in stream order.
    pub fn query(&self, query: &RecordQuery) -> Result<Vec<MessageRecord>, StorageError> {
        let matching = self
            .load_all()?
            .into_iter()
            .filter(|r| query.matches(r));
        Ok(match query.limit {
            Some(limit) => matching.take(limit).collect(),
            None => matching.collect(),
        })
    }
}

impl RecordSink for JsonlRecordStore {
    fn append(&self, record: &MessageRecord) -> Result<(), StorageError> {
        JsonlRecordStore::append(self, record)
    }
}
