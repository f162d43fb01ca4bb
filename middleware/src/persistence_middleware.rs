use async_trait::async_trait;
use msglog_core::{Middleware, MsglogError, NormalizedMessage, Result};
use std::sync::Arc;
use storage::RecordSink;
use tracing::{error, info, instrument};

/// Appends each message's record to the structured stream.
#[derive(Clone)]
pub struct PersistenceMiddleware {
    sink: Arc<dyn RecordSink>,
}

impl PersistenceMiddleware {
    pub fn new(sink: Arc<dyn RecordSink>) -> Self {
        Self { sink }
    }
}

#[async_trait]
impl Middleware for PersistenceMiddleware {
    #[instrument(skip(self, message))]
    async fn before(&self, message: &NormalizedMessage) -> Result<bool> {
        let record = &message.record;
        self.sink.append(record).map_err(|e| {
            error!(
                error = %e,
                chat_id = record.chat_id,
                message_id = record.message_id,
                "Failed to save record"
            );
            MsglogError::StorageFailure(e.to_string())
        })?;

        info!(
            chat_id = record.chat_id,
            message_id = record.message_id,
            message_type = %record.message_type,
            "step: record saved"
        );
        Ok(true)
    }
}
