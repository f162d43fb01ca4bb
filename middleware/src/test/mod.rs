//! Unit test module
//!
//! Middleware unit tests live here, separate from source files.
//! Tests interact with middleware via public and pub(crate) APIs.


use chrono::{TimeZone, Utc};
use msglog_core::{ChatKind, MessageRecord, MessageType, NormalizedMessage};

/// Builds a text message in chat 456 from user 123.
pub(crate) fn sample_message(chat_id: i64, text: &str) -> NormalizedMessage {
    NormalizedMessage {
        record: MessageRecord {
            chat_id,
            chat_title: "Test Group".to_string(),
            chat_type: ChatKind::Group,
            user_id: Some(123),
            username: Some("testuser".to_string()),
            display_name: Some("Test User".to_string()),
            message_id: 9,
            timestamp: Utc.with_ymd_and_hms(2024, 2, 2, 8, 0, 0).unwrap(),
            message_type: MessageType::Text,
            text: Some(text.to_string()),
            metadata: Some(msglog_core::extract(text)),
            is_forwarded: false,
            reply_to_message_id: None,
        },
        summary: text.to_string(),
    }
}
