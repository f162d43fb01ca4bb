//! Human-readable logging with keyword highlighting, and the monitored-chat filter.

use async_trait::async_trait;
use msglog_core::{
    find_keyword, HandlerResponse, IngestConfig, Middleware, NormalizedMessage, Result,
};
use storage::{HumanLog, Severity};
use tracing::{debug, error, info, instrument, warn};

/// Writes one line per message to the human log. Messages containing a highlight
/// keyword are written at WARN with a `HIGHLIGHT: <keyword>` annotation.
/// A failed write is logged and the message continues down the chain.
pub struct HumanLogMiddleware {
    log: HumanLog,
    keywords: Vec<String>,
}

impl HumanLogMiddleware {
    pub fn new(log: HumanLog, keywords: Vec<String>) -> Self {
        Self { log, keywords }
    }

    pub fn from_config(config: &IngestConfig) -> Self {
        Self::new(
            HumanLog::new(config.human_log_path.clone()),
            config.highlight_keywords.clone(),
        )
    }
}

#[async_trait]
impl Middleware for HumanLogMiddleware {
    #[instrument(skip(self, message))]
    async fn before(&self, message: &NormalizedMessage) -> Result<bool> {
        let record = &message.record;
        info!(
            chat_id = record.chat_id,
            user_id = ?record.user_id,
            username = %record.username.as_deref().unwrap_or("unknown"),
            message_type = %record.message_type,
            content = %message.summary,
            "Received message"
        );
        if record.chat_type.is_group() {
            debug!("Group message from {}", record.chat_title);
        }

        let highlight = find_keyword(&message.summary, &self.keywords);
        let (severity, annotation) = match highlight {
            Some(keyword) => {
                warn!(
                    chat_id = record.chat_id,
                    keyword = %keyword,
                    content = %message.summary,
                    "IMPORTANT MESSAGE DETECTED"
                );
                (Severity::Warn, Some(format!("HIGHLIGHT: {}", keyword)))
            }
            None => (Severity::Info, None),
        };

        if let Err(e) = self.log.append(message, severity, annotation.as_deref()) {
            error!(
                error = %e,
                chat_id = record.chat_id,
                message_id = record.message_id,
                "Failed to write human log"
            );
        }
        Ok(true)
    }

    #[instrument(skip(self, message, response))]
    async fn after(&self, message: &NormalizedMessage, response: &HandlerResponse) -> Result<()> {
        debug!(
            message_id = message.record.message_id,
            response = ?response,
            "Processed message"
        );
        Ok(())
    }
}

/// Silently drops messages from chats outside `monitored_chat_ids`. With no set configured, everything passes.
pub struct ChatFilterMiddleware {
    config: IngestConfig,
}

impl ChatFilterMiddleware {
    pub fn from_config(config: &IngestConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }
}

#[async_trait]
impl Middleware for ChatFilterMiddleware {
    #[instrument(skip(self, message))]
    async fn before(&self, message: &NormalizedMessage) -> Result<bool> {
        let chat_id = message.record.chat_id;
        let allowed = self.config.is_monitored(chat_id);
        if !allowed {
            debug!(chat_id = chat_id, "Chat not monitored, message dropped");
        }
        Ok(allowed)
    }
}
