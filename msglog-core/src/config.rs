//! Ingestion config: keyword highlighting, chat filter, and output stream paths.
//! Loaded from env (HIGHLIGHT_KEYWORDS, MONITORED_CHAT_IDS, SAVE_TO_STRUCTURED_STREAM,
//! STRUCTURED_STREAM_PATH, HUMAN_LOG_PATH) and passed by value to each component.

use crate::error::{MsglogError, Result};
use std::collections::HashSet;
use std::env;
use std::path::PathBuf;

pub const DEFAULT_STRUCTURED_STREAM_PATH: &str = "messages_data.jsonl";
pub const DEFAULT_HUMAN_LOG_PATH: &str = "telegram_messages.log";

#[derive(Debug, Clone, PartialEq)]
pub struct IngestConfig {
    /// Lowercased keywords; a text containing any of them is logged at warning level.
    pub highlight_keywords: Vec<String>,
    /// When set, only events from these chats are processed.
    pub monitored_chat_ids: Option<HashSet<i64>>,
    pub save_to_structured_stream: bool,
    pub structured_stream_path: PathBuf,
    pub human_log_path: PathBuf,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            highlight_keywords: Vec::new(),
            monitored_chat_ids: None,
            save_to_structured_stream: true,
            structured_stream_path: PathBuf::from(DEFAULT_STRUCTURED_STREAM_PATH),
            human_log_path: PathBuf::from(DEFAULT_HUMAN_LOG_PATH),
        }
    }
}

impl IngestConfig {
    /// Loads from environment variables; unset variables take the defaults.
    pub fn from_env() -> Result<Self> {
        let highlight_keywords = env::var("HIGHLIGHT_KEYWORDS")
            .map(|s| parse_keywords(&s))
            .unwrap_or_default();
        let monitored_chat_ids = match env::var("MONITORED_CHAT_IDS") {
            Ok(s) if !s.trim().is_empty() => Some(parse_chat_ids(&s)?),
            _ => None,
        };
        let save_to_structured_stream = match env::var("SAVE_TO_STRUCTURED_STREAM") {
            Ok(s) => s.trim().parse().map_err(|_| {
                MsglogError::Config(format!("SAVE_TO_STRUCTURED_STREAM must be true or false, got {}", s))
            })?,
            Err(_) => true,
        };
        let structured_stream_path = env::var("STRUCTURED_STREAM_PATH")
            .unwrap_or_else(|_| DEFAULT_STRUCTURED_STREAM_PATH.to_string())
            .into();
        let human_log_path = env::var("HUMAN_LOG_PATH")
            .unwrap_or_else(|_| DEFAULT_HUMAN_LOG_PATH.to_string())
            .into();

        Ok(Self {
            highlight_keywords,
            monitored_chat_ids,
            save_to_structured_stream,
            structured_stream_path,
            human_log_path,
        })
    }

    /// True when the chat passes the `monitored_chat_ids` filter.
    pub fn is_monitored(&self, chat_id: i64) -> bool {
        self.monitored_chat_ids
            .as_ref()
            .map_or(true, |ids| ids.contains(&chat_id))
    }
}

/// Splits a comma separated list, trims and lowercases entries, drops empties.
pub fn parse_keywords(s: &str) -> Vec<String> {
    s.split(',')
        .map(|k| k.trim().to_lowercase())
        .filter(|k| !k.is_empty())
        .collect()
}

/// Parses a comma separated list of chat ids.
pub fn parse_chat_ids(s: &str) -> Result<HashSet<i64>> {
    s.split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(|id| {
            id.parse::<i64>()
                .map_err(|_| MsglogError::Config(format!("invalid chat id in MONITORED_CHAT_IDS: {}", id)))
        })
        .collect()
}
