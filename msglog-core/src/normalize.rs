//! Builds a [`MessageRecord`] from an [`InboundEvent`].
//!
//! Text messages get their text copied verbatim and metadata attached. Every other
//! content type leaves `text`/`metadata` absent in the record and carries a
//! placeholder only in the human-log summary.

use crate::error::{MsglogError, Result};
use crate::extract::extract;
use crate::types::{InboundEvent, MessageContent, MessageRecord, NormalizedMessage};

/// Normalizes one event. Fails with [`MsglogError::MalformedEvent`] when
/// `chat_id`, `message_id` or `timestamp` is missing.
pub fn normalize(event: &InboundEvent) -> Result<NormalizedMessage> {
    let chat_id = event
        .chat_id
        .ok_or_else(|| MsglogError::MalformedEvent("chat_id".to_string()))?;
    let message_id = event
        .message_id
        .ok_or_else(|| MsglogError::MalformedEvent("message_id".to_string()))?;
    let timestamp = event
        .timestamp
        .ok_or_else(|| MsglogError::MalformedEvent("timestamp".to_string()))?;

    let (text, metadata) = match &event.content {
        MessageContent::Text(t) if !t.is_empty() => (Some(t.clone()), Some(extract(t))),
        _ => (None, None),
    };

    let sender = event.sender.as_ref();
    let record = MessageRecord {
        chat_id,
        chat_title: event.chat_title.clone(),
        chat_type: event.chat_type,
        user_id: sender.map(|s| s.id),
        username: sender.and_then(|s| s.username.clone()),
        display_name: sender.map(|s| s.display_name()),
        message_id,
        timestamp,
        message_type: event.content.message_type(),
        text,
        metadata,
        is_forwarded: event.is_forwarded,
        reply_to_message_id: event.reply_to_message_id,
    };

    Ok(NormalizedMessage {
        record,
        summary: summarize(&event.content),
    })
}

/// Content shown in the human-readable log for each content type.
pub fn summarize(content: &MessageContent) -> String {
    match content {
        MessageContent::Text(t) => t.clone(),
        MessageContent::Photo { caption: Some(c) } if !c.is_empty() => format!("[Photo] {}", c),
        MessageContent::Photo { .. } => "[Photo]".to_string(),
        MessageContent::Document { file_name: Some(name) } => format!("[Document: {}]", name),
        MessageContent::Document { file_name: None } => "[Document]".to_string(),
        MessageContent::Audio => "[Audio]".to_string(),
        MessageContent::Video => "[Video]".to_string(),
        MessageContent::Voice => "[Voice Message]".to_string(),
        MessageContent::Sticker { emoji: Some(e) } => format!("[Sticker: {}]", e),
        MessageContent::Sticker { emoji: None } => "[Sticker]".to_string(),
        MessageContent::Other { label: Some(l) } => l.clone(),
        MessageContent::Other { label: None } => "[Other]".to_string(),
    }
}
