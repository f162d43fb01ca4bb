//! Report aggregation over a full sequence of records.
//!
//! Read-only and deterministic: the same records in the same order always give the same report.

use crate::models::{ChatCount, Report, TermCount, UserCount};
use msglog_core::MessageRecord;
use std::collections::{BTreeMap, HashMap};

/// Aggregates totals, per-type / per-chat / per-user counts, and hashtag / mention frequencies.
pub fn aggregate(records: &[MessageRecord]) -> Report {
    let mut by_type = BTreeMap::new();
    let mut chats: HashMap<i64, ChatCount> = HashMap::new();
    let mut users: HashMap<i64, UserCount> = HashMap::new();
    let mut hashtags: BTreeMap<String, usize> = BTreeMap::new();
    let mut mentions: BTreeMap<String, usize> = BTreeMap::new();

    for record in records {
        *by_type.entry(record.message_type).or_insert(0) += 1;

        let chat = chats.entry(record.chat_id).or_insert_with(|| ChatCount {
            chat_id: record.chat_id,
            chat_title: String::new(),
            count: 0,
        });
        chat.count += 1;
        chat.chat_title = record.chat_title.clone();

        if let Some(user_id) = record.user_id {
            let user = users.entry(user_id).or_insert_with(|| UserCount {
                user_id,
                display_name: None,
                count: 0,
            });
            user.count += 1;
            if record.display_name.is_some() {
                user.display_name = record.display_name.clone();
            }
        }

        if let Some(meta) = &record.metadata {
            for tag in &meta.hashtags {
                *hashtags.entry(tag.clone()).or_insert(0) += 1;
            }
            for mention in &meta.mentions {
                *mentions.entry(mention.clone()).or_insert(0) += 1;
            }
        }
    }

    let mut chats: Vec<ChatCount> = chats.into_values().collect();
    chats.sort_by(|a, b| b.count.cmp(&a.count).then(a.chat_id.cmp(&b.chat_id)));

    let mut users: Vec<UserCount> = users.into_values().collect();
    users.sort_by(|a, b| b.count.cmp(&a.count).then(a.user_id.cmp(&b.user_id)));

    Report {
        total: records.len(),
        by_type,
        chats,
        users,
        hashtags: ranked(hashtags),
        mentions: ranked(mentions),
        first_message: records.iter().map(|r| r.timestamp).min(),
        last_message: records.iter().map(|r| r.timestamp).max(),
    }
}

/// Count descending; ties keep the map's ascending term order.
fn ranked(counts: BTreeMap<String, usize>) -> Vec<TermCount> {
    let mut terms: Vec<TermCount> = counts
        .into_iter()
        .map(|(term, count)| TermCount { term, count })
        .collect();
    terms.sort_by(|a, b| b.count.cmp(&a.count));
    terms
}
