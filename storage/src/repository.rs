//! Sink abstraction for structured records, so callers can substitute a test double.

use crate::error::StorageError;
use msglog_core::MessageRecord;

pub trait RecordSink: Send + Sync {
    /// Appends one record. Either the whole entry is written or an error is returned.
    fn append(&self, record: &MessageRecord) -> Result<(), StorageError>;
}
