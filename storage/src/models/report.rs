//! Summary statistics over the structured stream.
//!
//! Produced by report::aggregate; rendered as text via Display or as JSON via Serialize.

use chrono::{DateTime, Utc};
use msglog_core::MessageType;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

const TOP_CHATS: usize = 5;
const TOP_TERMS: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatCount {
    pub chat_id: i64,
    pub chat_title: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserCount {
    pub user_id: i64,
    pub display_name: Option<String>,
    pub count: usize,
}

/// Frequency of one hashtag or mention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TermCount {
    pub term: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub total: usize,
    pub by_type: BTreeMap<MessageType, usize>,
    /// Sorted by count descending, then chat_id ascending.
    pub chats: Vec<ChatCount>,
    /// Sorted by count descending, then user_id ascending. Channel posts without a sender are not counted.
    pub users: Vec<UserCount>,
    pub hashtags: Vec<TermCount>,
    pub mentions: Vec<TermCount>,
    pub first_message: Option<DateTime<Utc>>,
    pub last_message: Option<DateTime<Utc>>,
}

impl Report {
    pub fn unique_chats(&self) -> usize {
        self.chats.len()
    }

    pub fn unique_users(&self) -> usize {
        self.users.len()
    }

    pub fn count_of(&self, message_type: MessageType) -> usize {
        self.by_type.get(&message_type).copied().unwrap_or(0)
    }
}

fn write_terms(f: &mut fmt::Formatter<'_>, heading: &str, terms: &[TermCount]) -> fmt::Result {
    if terms.is_empty() {
        return Ok(());
    }
    writeln!(f)?;
    writeln!(f, "{}:", heading)?;
    for t in terms.iter().take(TOP_TERMS) {
        writeln!(f, "  {}: {}", t.term, t.count)?;
    }
    Ok(())
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.total == 0 {
            return writeln!(f, "No messages found.");
        }

        writeln!(f, "MESSAGE SUMMARY REPORT")?;
        writeln!(f, "======================")?;
        writeln!(f, "Total Messages: {}", self.total)?;
        writeln!(f, "Unique Chats: {}", self.unique_chats())?;
        writeln!(f, "Unique Users: {}", self.unique_users())?;
        if let (Some(first), Some(last)) = (self.first_message, self.last_message) {
            writeln!(f, "First Message: {}", first.to_rfc3339())?;
            writeln!(f, "Last Message: {}", last.to_rfc3339())?;
        }

        writeln!(f)?;
        writeln!(f, "Message Types:")?;
        for (ty, count) in &self.by_type {
            writeln!(f, "  {}: {}", ty, count)?;
        }

        writeln!(f)?;
        writeln!(f, "Most Active Chats:")?;
        for c in self.chats.iter().take(TOP_CHATS) {
            writeln!(f, "  {} ({}): {} messages", c.chat_title, c.chat_id, c.count)?;
        }

        write_terms(f, "Top Hashtags", &self.hashtags)?;
        write_terms(f, "Top Mentions", &self.mentions)
    }
}
