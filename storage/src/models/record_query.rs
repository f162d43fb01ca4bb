//! Filter parameters for reading back records.
//!
//! Used by JsonlRecordStore::query.

use msglog_core::{MessageRecord, MessageType};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordQuery {
    pub chat_id: Option<i64>,
    pub user_id: Option<i64>,
    pub message_type: Option<MessageType>,
    /// Keep at most this many records (the oldest ones, in stream order).
    pub limit: Option<usize>,
}

impl RecordQuery {
    pub fn matches(&self, record: &MessageRecord) -> bool {
        self.chat_id.map_or(true, |id| record.chat_id == id)
            && self.user_id.map_or(true, |id| record.user_id == Some(id))
            && self.message_type.map_or(true, |t| record.message_type == t)
    }
}
