//! Storage error types.
//!
//! Used by the record store and the human log; the middleware maps them to
//! `MsglogError::StorageFailure`.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Write to {} failed: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Read from {} failed: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Serialize error: {0}")]
    Serialize(#[from] serde_json::Error),
}
