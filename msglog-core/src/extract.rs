//! Text feature extraction: mentions, hashtags, URLs, word and character counts.
//!
//! [`extract`] is total over any `&str`; there is no error path.

use crate::types::Metadata;
use once_cell::sync::Lazy;
use regex::Regex;

static MENTION_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"@\w+").expect("valid mention regex"));
static HASHTAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"#\w+").expect("valid hashtag regex"));
static URL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"https?://\S+").expect("valid url regex"));

fn find_all(re: &Regex, text: &str) -> Vec<String> {
    re.find_iter(text).map(|m| m.as_str().to_string()).collect()
}

/// Extracts metadata from message text. Matches are kept left to right, duplicates included.
pub fn extract(text: &str) -> Metadata {
    Metadata {
        mentions: find_all(&MENTION_RE, text),
        hashtags: find_all(&HASHTAG_RE, text),
        urls: find_all(&URL_RE, text),
        word_count: text.split_whitespace().count(),
        char_count: text.chars().count(),
    }
}

/// Returns the first keyword (already lowercased) contained in `text`, ignoring case.
pub fn find_keyword<'a>(text: &str, keywords: &'a [String]) -> Option<&'a str> {
    if keywords.is_empty() {
        return None;
    }
    let lower = text.to_lowercase();
    keywords
        .iter()
        .find(|k| lower.contains(k.as_str()))
        .map(|k| k.as_str())
}
