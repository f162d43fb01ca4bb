//! Wraps teloxide::Bot and implements [`msglog_core::Bot`]. Production code replies via Telegram; tests can substitute another Bot impl.

use async_trait::async_trait;
use msglog_core::{Bot as CoreBot, MsglogError, Result};
use teloxide::payloads::SendMessageSetters;
use teloxide::prelude::*;
use teloxide::types::{ChatId, MessageId, ReplyParameters};

/// Thin wrapper around teloxide::Bot that implements msglog-core's Bot trait.
pub struct TelegramBotAdapter {
    bot: teloxide::Bot,
}

impl TelegramBotAdapter {
    /// Creates an adapter from an existing teloxide Bot.
    pub fn new(bot: teloxide::Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl CoreBot for TelegramBotAdapter {
    async fn reply_to(&self, chat_id: i64, message_id: i32, text: &str) -> Result<()> {
        self.bot
            .send_message(ChatId(chat_id), text.to_string())
            .reply_parameters(ReplyParameters::new(MessageId(message_id)))
            .await
            .map_err(|e| MsglogError::Bot(e.to_string()))?;
        Ok(())
    }
}
