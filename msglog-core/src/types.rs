//! Core types: inbound event, content variants, message record, metadata, and the Handler / Middleware traits.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed set of message types. Declaration order is the dispatch precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageType {
    Text,
    Photo,
    Document,
    Audio,
    Video,
    Voice,
    Sticker,
    Other,
}

impl MessageType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageType::Text => "text",
            MessageType::Photo => "photo",
            MessageType::Document => "document",
            MessageType::Audio => "audio",
            MessageType::Video => "video",
            MessageType::Voice => "voice",
            MessageType::Sticker => "sticker",
            MessageType::Other => "other",
        }
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of conversation a message came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatKind {
    Private,
    Group,
    Supergroup,
    Channel,
}

impl ChatKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatKind::Private => "private",
            ChatKind::Group => "group",
            ChatKind::Supergroup => "supergroup",
            ChatKind::Channel => "channel",
        }
    }

    /// True for group and supergroup chats.
    pub fn is_group(&self) -> bool {
        matches!(self, ChatKind::Group | ChatKind::Supergroup)
    }
}

impl fmt::Display for ChatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sender identity as delivered by the platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sender {
    pub id: i64,
    pub username: Option<String>,
    pub first_name: String,
    pub last_name: Option<String>,
}

impl Sender {
    /// "First Last", or just the first name.
    pub fn display_name(&self) -> String {
        match &self.last_name {
            Some(last) if !last.is_empty() => format!("{} {}", self.first_name, last),
            _ => self.first_name.clone(),
        }
    }
}

/// The one populated content field of an inbound message.
#[derive(Debug, Clone, PartialEq)]
pub enum MessageContent {
    Text(String),
    Photo { caption: Option<String> },
    Document { file_name: Option<String> },
    Audio,
    Video,
    Voice,
    Sticker { emoji: Option<String> },
    /// Anything else (locations, polls, service messages). `label` is shown in the human log.
    Other { label: Option<String> },
}

impl MessageContent {
    pub fn message_type(&self) -> MessageType {
        match self {
            MessageContent::Text(_) => MessageType::Text,
            MessageContent::Photo { .. } => MessageType::Photo,
            MessageContent::Document { .. } => MessageType::Document,
            MessageContent::Audio => MessageType::Audio,
            MessageContent::Video => MessageType::Video,
            MessageContent::Voice => MessageType::Voice,
            MessageContent::Sticker { .. } => MessageType::Sticker,
            MessageContent::Other { .. } => MessageType::Other,
        }
    }
}

/// Transport-neutral inbound event. Identity fields are optional so that the
/// normalizer can reject events that lack them.
#[derive(Debug, Clone, PartialEq)]
pub struct InboundEvent {
    pub chat_id: Option<i64>,
    pub chat_title: String,
    pub chat_type: ChatKind,
    pub sender: Option<Sender>,
    pub message_id: Option<i32>,
    pub timestamp: Option<DateTime<Utc>>,
    pub content: MessageContent,
    pub is_forwarded: bool,
    pub reply_to_message_id: Option<i32>,
}

/// Text features derived from a text message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    pub mentions: Vec<String>,
    pub hashtags: Vec<String>,
    pub urls: Vec<String>,
    pub word_count: usize,
    pub char_count: usize,
}

/// One persisted entry of the structured stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageRecord {
    pub chat_id: i64,
    pub chat_title: String,
    pub chat_type: ChatKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    pub message_id: i32,
    pub timestamp: DateTime<Utc>,
    pub message_type: MessageType,
    /// Present only for text messages; `metadata` is set together with it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
    #[serde(default)]
    pub is_forwarded: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_to_message_id: Option<i32>,
}

/// A record plus the content summary shown in the human-readable log.
/// The summary may carry a placeholder (e.g. `[Photo]`) that the record does not.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedMessage {
    pub record: MessageRecord,
    pub summary: String,
}

/// Handler result for the chain. `Reply(text)` carries the response body so middleware can see it in `after()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerResponse {
    /// Pass to next handler.
    Continue,
    /// Stop the chain; no response body.
    Stop,
    /// Skip this handler, try next.
    Ignore,
    /// Stop the chain with the reply that was sent.
    Reply(String),
}

/// Converts a transport-specific message into an [`InboundEvent`].
pub trait ToInboundEvent: Send + Sync {
    fn to_event(&self) -> InboundEvent;
}

/// Processes a normalized message. Return Stop or Reply to end the handle phase.
#[async_trait]
pub trait Handler: Send + Sync {
    async fn handle(&self, message: &NormalizedMessage) -> crate::error::Result<HandlerResponse>;
}

/// Runs around the handlers: `before` in insertion order, `after` in reverse.
#[async_trait]
pub trait Middleware: Send + Sync {
    /// Return false to drop the message silently (handlers and `after` are skipped).
    async fn before(&self, message: &NormalizedMessage) -> crate::error::Result<bool>;

    async fn after(
        &self,
        _message: &NormalizedMessage,
        _response: &HandlerResponse,
    ) -> crate::error::Result<()> {
        Ok(())
    }
}
