//! Dispatcher loop: converts teloxide messages (chat messages and channel posts) to
//! InboundEvents and hands them to the Ingestor one at a time, in arrival order.

use crate::adapters::TelegramEventWrapper;
use crate::ingest::Ingestor;
use anyhow::Result;
use msglog_core::ToInboundEvent;
use std::sync::Arc;
use teloxide::prelude::*;
use tracing::{debug, info, instrument};

async fn on_message(msg: Message, ingestor: Arc<Ingestor>) -> ResponseResult<()> {
    let event = TelegramEventWrapper(&msg).to_event();
    // Failures were already reported by the ingestor; keep receiving.
    let _ = ingestor.handle_event(&event).await;
    Ok(())
}

/// Runs long polling until Ctrl-C. Every update maps to the same distribution key,
/// so the dispatcher handles them strictly one after another.
#[instrument(skip(bot, ingestor))]
pub async fn run_dispatcher(bot: teloxide::Bot, ingestor: Arc<Ingestor>) -> Result<()> {
    match bot.get_me().await {
        Ok(me) => info!(username = ?me.user.username, "Bot identity resolved"),
        Err(e) => info!(error = %e, "get_me failed, continuing"),
    }

    let handler = dptree::entry()
        .branch(Update::filter_message().endpoint(on_message))
        .branch(Update::filter_channel_post().endpoint(on_message));

    info!("Listening for messages. Press Ctrl+C to stop.");

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![ingestor])
        .distribution_function(|_| Some(()))
        .default_handler(|upd| async move {
            debug!(update = ?upd.id, "Ignoring non-message update");
        })
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    info!("Listener stopped");
    Ok(())
}
