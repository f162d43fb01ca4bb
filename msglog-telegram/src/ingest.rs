//! Per-event driver: normalize → handler chain → error reporting.
//!
//! Every error stops at this boundary: it is logged through tracing and as an ERROR
//! line in the human log, then handed back to the caller, which keeps receiving events.

use handler_chain::HandlerChain;
use middleware::{ChatFilterMiddleware, GreetingHandler, HumanLogMiddleware, PersistenceMiddleware};
use msglog_core::{normalize, Bot, HandlerResponse, InboundEvent, IngestConfig, MsglogError, Result};
use std::sync::Arc;
use storage::{HumanLog, JsonlRecordStore, Severity};
use tracing::{error, info, instrument};

/// Builds the chain: chat filter → human log → structured persistence (if enabled), then the `/hello` handler when a bot is given.
pub fn build_handler_chain(config: &IngestConfig, bot: Option<Arc<dyn Bot>>) -> HandlerChain {
    let mut chain = HandlerChain::new()
        .add_middleware(Arc::new(ChatFilterMiddleware::from_config(config)))
        .add_middleware(Arc::new(HumanLogMiddleware::from_config(config)));

    if config.save_to_structured_stream {
        let store = JsonlRecordStore::new(config.structured_stream_path.clone());
        chain = chain.add_middleware(Arc::new(PersistenceMiddleware::new(Arc::new(store))));
    } else {
        info!("Structured stream disabled; only the human log is written");
    }

    if let Some(bot) = bot {
        chain = chain.add_handler(Arc::new(GreetingHandler::new(bot)));
    }
    chain
}

pub struct Ingestor {
    chain: HandlerChain,
    human_log: HumanLog,
}

impl Ingestor {
    pub fn new(chain: HandlerChain, human_log: HumanLog) -> Self {
        Self { chain, human_log }
    }

    pub fn from_config(config: &IngestConfig, bot: Option<Arc<dyn Bot>>) -> Self {
        Self::new(
            build_handler_chain(config, bot),
            HumanLog::new(config.human_log_path.clone()),
        )
    }

    /// Processes one event to completion. Returns `Stop` when the chat filter dropped it.
    #[instrument(skip(self, event), fields(chat_id = ?event.chat_id, message_id = ?event.message_id))]
    pub async fn handle_event(&self, event: &InboundEvent) -> Result<HandlerResponse> {
        let result = match normalize(event) {
            Ok(message) => self.chain.handle(&message).await,
            Err(e) => Err(e),
        };
        if let Err(e) = &result {
            self.report_failure(event, e);
        }
        result
    }

    fn report_failure(&self, event: &InboundEvent, e: &MsglogError) {
        error!(kind = e.kind(), error = %e, "Event processing failed");
        let line = format!(
            "{} (chat_id={}, message_id={})",
            e,
            event.chat_id.map_or_else(|| "-".to_string(), |id| id.to_string()),
            event.message_id.map_or_else(|| "-".to_string(), |id| id.to_string()),
        );
        if let Err(log_err) = self.human_log.append_line(Severity::Error, &line) {
            error!(error = %log_err, "Failed to write error to human log");
        }
    }
}
