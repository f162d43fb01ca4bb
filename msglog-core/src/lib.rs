//! # msglog-core
//!
//! Core of the message listener: inbound event and record types, the metadata extractor,
//! the normalizer, ingestion config, error taxonomy, the [`Handler`] / [`Middleware`] / [`Bot`]
//! traits, and tracing initialization. Transport-agnostic; used by handler-chain, storage,
//! middleware and msglog-telegram.

pub mod bot;
pub mod config;
pub mod error;
pub mod extract;
pub mod logger;
pub mod normalize;
pub mod types;

pub use bot::Bot;
pub use config::IngestConfig;
pub use error::{MsglogError, Result};
pub use extract::{extract, find_keyword};
pub use logger::init_tracing;
pub use normalize::{normalize, summarize};
pub use types::{
    ChatKind, Handler, HandlerResponse, InboundEvent, MessageContent, MessageRecord, MessageType,
    Metadata, Middleware, NormalizedMessage, Sender, ToInboundEvent,
};
