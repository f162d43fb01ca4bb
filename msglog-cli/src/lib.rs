//! # msglog-cli
//!
//! Argument parsing for the `msglog` binary.

pub mod cli;

pub use cli::{report_query, resolve_stream_path, Cli, Commands};
