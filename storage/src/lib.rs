//! Storage crate: the two append-only output streams and the report aggregator.
//!
//! ## Modules
//!
//! - [`error`] – Storage error types
//! - [`models`] – RecordQuery, Report and its count rows
//! - [`repository`] – RecordSink trait
//! - [`jsonl_store`] – JsonlRecordStore (structured stream)
//! - [`human_log`] – HumanLog (operator log) and Severity
//! - [`report`] – aggregate()

mod append;
mod error;
mod human_log;
mod jsonl_store;
mod models;
mod report;
mod repository;

pub use error::StorageError;
pub use human_log::{render as render_log_line, HumanLog, Severity, MAX_SUMMARY_CHARS};
pub use jsonl_store::JsonlRecordStore;
pub use models::{ChatCount, RecordQuery, Report, TermCount, UserCount};
pub use report::aggregate;
pub use repository::RecordSink;
