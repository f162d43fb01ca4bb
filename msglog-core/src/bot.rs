//! Outbound side of the bot: the replies the listener sends.
//!
//! [`Bot`] is transport-agnostic; `msglog-telegram` implements it via teloxide.

use crate::error::Result;
use async_trait::async_trait;

#[async_trait]
pub trait Bot: Send + Sync {
    /// Sends a reply to the given message in the same chat.
    async fn reply_to(&self, chat_id: i64, message_id: i32, text: &str) -> Result<()>;
}
