use thiserror::Error;

#[derive(Error, Debug)]
pub enum MsglogError {
    /// Event lacks a required identity field (chat_id, message_id or timestamp).
    #[error("Malformed event: missing {0}")]
    MalformedEvent(String),

    /// Write or read failure on one of the output streams.
    #[error("Storage failure: {0}")]
    StorageFailure(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Bot error: {0}")]
    Bot(String),
}

impl MsglogError {
    /// Severity tag used when the error is written to the human-readable log.
    pub fn kind(&self) -> &'static str {
        match self {
            MsglogError::MalformedEvent(_) => "MalformedEvent",
            MsglogError::StorageFailure(_) => "StorageFailure",
            MsglogError::Config(_) => "Config",
            MsglogError::Bot(_) => "Bot",
        }
    }
}

pub type Result<T> = std::result::Result<T, MsglogError>;
