//! msglog CLI: listen to Telegram and record every message, or report on what was recorded.
//! Config from env (and .env) plus optional CLI args.

use anyhow::{Context, Result};
use clap::Parser;
use msglog_cli::{report_query, resolve_stream_path, Cli, Commands};
use msglog_core::{init_tracing, Bot, IngestConfig};
use msglog_telegram::{run_dispatcher, Ingestor, TelegramBotAdapter, TelegramConfig};
use std::path::PathBuf;
use std::sync::Arc;
use storage::{aggregate, JsonlRecordStore};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { token } => handle_run(token).await,
        Commands::Report {
            path,
            chat,
            user,
            json,
        } => handle_report(resolve_stream_path(path), chat, user, json),
    }
}

/// Handle the run command: load config, start tracing, dispatch updates until Ctrl+C.
async fn handle_run(token: Option<String>) -> Result<()> {
    let telegram = TelegramConfig::from_env(token)?;
    let ingest = IngestConfig::from_env().context("Load ingest config from env")?;

    init_tracing(&telegram.log_file)?;
    info!(
        structured_stream = %ingest.structured_stream_path.display(),
        human_log = %ingest.human_log_path.display(),
        structured_enabled = ingest.save_to_structured_stream,
        keywords = ingest.highlight_keywords.len(),
        "Starting msglog"
    );

    let bot = telegram.build_bot()?;
    let adapter: Arc<dyn Bot> = Arc::new(TelegramBotAdapter::new(bot.clone()));
    let ingestor = Arc::new(Ingestor::from_config(&ingest, Some(adapter)));

    run_dispatcher(bot, ingestor).await
}

/// Handle the report command: read the structured stream, aggregate, print.
///
/// Logs go to stderr so `--json` output stays parseable.
fn handle_report(path: PathBuf, chat: Option<i64>, user: Option<i64>, json: bool) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".to_string()))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let store = JsonlRecordStore::new(&path);
    let records = store
        .query(&report_query(chat, user))
        .with_context(|| format!("Read structured stream {}", path.display()))?;
    let report = aggregate(&records);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report);
    }
    Ok(())
}
