//! # msglog-telegram
//!
//! Telegram layer: teloxide adapters, [`msglog_core::Bot`] implementation, connectivity config,
//! the per-event [`Ingestor`], and the sequential dispatcher loop.

mod adapters;
mod bot_adapter;
mod config;
mod ingest;
mod runner;

pub use adapters::{TelegramEventWrapper, TelegramUserWrapper};
pub use bot_adapter::TelegramBotAdapter;
pub use config::{TelegramConfig, DEFAULT_LOG_FILE};
pub use ingest::{build_handler_chain, Ingestor};
pub use runner::run_dispatcher;
