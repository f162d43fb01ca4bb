//! Adapters from Telegram (teloxide) types to msglog_core types.
//! Depends only on teloxide and msglog_core type definitions.

use msglog_core::{ChatKind, InboundEvent, MessageContent, Sender, ToInboundEvent};

/// Wraps a teloxide User for conversion to core [`Sender`].
pub struct TelegramUserWrapper<'a>(pub &'a teloxide::types::User);

impl<'a> TelegramUserWrapper<'a> {
    pub fn to_sender(&self) -> Sender {
        Sender {
            id: self.0.id.0 as i64,
            username: self.0.username.clone(),
            first_name: self.0.first_name.clone(),
            last_name: self.0.last_name.clone(),
        }
    }
}

/// Wraps a teloxide Message for conversion to an [`InboundEvent`].
pub struct TelegramEventWrapper<'a>(pub &'a teloxide::types::Message);

impl<'a> ToInboundEvent for TelegramEventWrapper<'a> {
    fn to_event(&self) -> InboundEvent {
        let msg = self.0;
        let sender = msg.from.as_ref().map(|u| TelegramUserWrapper(u).to_sender());
        InboundEvent {
            chat_id: Some(msg.chat.id.0),
            chat_title: self.chat_title(sender.as_ref()),
            chat_type: self.chat_kind(),
            sender,
            message_id: Some(msg.id.0),
            timestamp: Some(msg.date),
            content: self.content(),
            is_forwarded: msg.forward_origin().is_some(),
            reply_to_message_id: msg.reply_to_message().map(|m| m.id.0),
        }
    }
}

impl<'a> TelegramEventWrapper<'a> {
    fn chat_kind(&self) -> ChatKind {
        let chat = &self.0.chat;
        if chat.is_channel() {
            ChatKind::Channel
        } else if chat.is_supergroup() {
            ChatKind::Supergroup
        } else if chat.is_group() {
            ChatKind::Group
        } else {
            ChatKind::Private
        }
    }

    /// Chat title; private chats fall back to the sender's name, then the chat username.
    fn chat_title(&self, sender: Option<&Sender>) -> String {
        let chat = &self.0.chat;
        chat.title()
            .map(str::to_string)
            .or_else(|| sender.map(|s| s.display_name()))
            .or_else(|| chat.username().map(str::to_string))
            .unwrap_or_else(|| "Unknown".to_string())
    }

    /// Content variant, checked in precedence order text > photo > document > audio > video > voice > sticker > other.
    fn content(&self) -> MessageContent {
        let msg = self.0;
        if let Some(text) = msg.text() {
            return MessageContent::Text(text.to_string());
        }
        if msg.photo().is_some() {
            return MessageContent::Photo {
                caption: msg.caption().map(str::to_string),
            };
        }
        if let Some(doc) = msg.document() {
            return MessageContent::Document {
                file_name: doc.file_name.clone(),
            };
        }
        if msg.audio().is_some() {
            return MessageContent::Audio;
        }
        if msg.video().is_some() {
            return MessageContent::Video;
        }
        if msg.voice().is_some() {
            return MessageContent::Voice;
        }
        if let Some(sticker) = msg.sticker() {
            return MessageContent::Sticker {
                emoji: sticker.emoji.clone(),
            };
        }
        let label = msg
            .location()
            .map(|loc| format!("[Location: {}, {}]", loc.latitude, loc.longitude));
        MessageContent::Other { label }
    }
}
