use async_trait::async_trait;
use msglog_core::{Bot, Handler, HandlerResponse, NormalizedMessage, Result};
use std::sync::Arc;
use tracing::{info, instrument};

pub const GREETING: &str = "Hello! I'm listening to this chat.";

/// Answers the `/hello` command; every other message passes through.
pub struct GreetingHandler {
    bot: Arc<dyn Bot>,
}

impl GreetingHandler {
    pub fn new(bot: Arc<dyn Bot>) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl Handler for GreetingHandler {
    #[instrument(skip(self, message))]
    async fn handle(&self, message: &NormalizedMessage) -> Result<HandlerResponse> {
        let is_hello = message
            .record
            .text
            .as_deref()
            .map(|t| t.trim_start().to_lowercase().starts_with("/hello"))
            .unwrap_or(false);
        if !is_hello {
            return Ok(HandlerResponse::Continue);
        }

        self.bot
            .reply_to(message.record.chat_id, message.record.message_id, GREETING)
            .await?;
        info!(chat_id = message.record.chat_id, "Replied to /hello");
        Ok(HandlerResponse::Reply(GREETING.to_string()))
    }
}
