//! CLI parser.

use clap::{Parser, Subcommand};
use msglog_core::config::DEFAULT_STRUCTURED_STREAM_PATH;
use std::path::PathBuf;
use storage::RecordQuery;

#[derive(Parser, Debug)]
#[command(name = "msglog")]
#[command(about = "Telegram chat logger: listen and record, or report on recorded messages", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Listen for messages (config from env; token can override BOT_TOKEN).
    Run {
        #[arg(short, long)]
        token: Option<String>,
    },
    /// Aggregate the structured stream into a summary report.
    Report {
        /// Structured stream to read; defaults to STRUCTURED_STREAM_PATH or messages_data.jsonl.
        #[arg(short, long)]
        path: Option<PathBuf>,
        /// Only messages from this chat.
        #[arg(long, allow_hyphen_values = true)]
        chat: Option<i64>,
        /// Only messages from this user.
        #[arg(long)]
        user: Option<i64>,
        /// Print the report as JSON instead of text.
        #[arg(long)]
        json: bool,
    },
}

/// Resolves the stream path: explicit flag, then STRUCTURED_STREAM_PATH, then the default.
pub fn resolve_stream_path(path: Option<PathBuf>) -> PathBuf {
    path.or_else(|| std::env::var("STRUCTURED_STREAM_PATH").ok().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_STRUCTURED_STREAM_PATH))
}

pub fn report_query(chat: Option<i64>, user: Option<i64>) -> RecordQuery {
    RecordQuery {
        chat_id: chat,
        user_id: user,
        ..RecordQuery::default()
    }
}
