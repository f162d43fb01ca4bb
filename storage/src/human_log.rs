//! Operator-facing log: one formatted line per event, never read back.

use crate::append::append_line;
use crate::error::StorageError;
use chrono::{SecondsFormat, Utc};
use msglog_core::NormalizedMessage;
use std::fmt;
use std::path::PathBuf;

/// Longest content summary written to a line, in characters.
pub const MAX_SUMMARY_CHARS: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warn,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
        })
    }
}

#[derive(Debug, Clone)]
pub struct HumanLog {
    path: PathBuf,
}

impl HumanLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Appends the line for one message, with an optional trailing annotation.
    pub fn append(
        &self,
        message: &NormalizedMessage,
        severity: Severity,
        annotation: Option<&str>,
    ) -> Result<(), StorageError> {
        self.append_line(severity, &render(message, annotation))
    }

    /// Appends a free-form line (used for errors that have no record).
    pub fn append_line(&self, severity: Severity, text: &str) -> Result<(), StorageError> {
        let line = format!(
            "{} [{}] {}",
            Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            severity,
            one_line(text)
        );
        append_line(&self.path, &line).map_err(|source| StorageError::Write {
            path: self.path.clone(),
            source,
        })
    }
}

/// `[timestamp] Chat: title (type) | User: name (@handle) | Type: t | Message: summary`
pub fn render(message: &NormalizedMessage, annotation: Option<&str>) -> String {
    let r = &message.record;
    let user = match (&r.display_name, &r.username) {
        (Some(name), Some(handle)) => format!("{} (@{})", name, handle),
        (Some(name), None) => name.clone(),
        (None, Some(handle)) => format!("@{}", handle),
        (None, None) => "-".to_string(),
    };
    let mut line = format!(
        "[{}] Chat: {} ({}) | User: {} | Type: {} | Message: {}",
        r.timestamp.to_rfc3339(),
        r.chat_title,
        r.chat_type,
        user,
        r.message_type,
        truncate(&message.summary, MAX_SUMMARY_CHARS)
    );
    if let Some(note) = annotation {
        line.push_str(" | ");
        line.push_str(note);
    }
    line
}

fn truncate(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &s[..idx]),
        None => s.to_string(),
    }
}

fn one_line(s: &str) -> String {
    s.replace(['\r', '\n'], " ")
}
