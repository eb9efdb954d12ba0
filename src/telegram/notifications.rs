//! Restock broadcast delivery.
//!
//! Consumes the watcher channel and pushes each event to the broadcast
//! chat. Send failures get a couple of immediate retries, then the
//! message is dropped and logged; a flaky network never builds a backlog.

use std::sync::Arc;

use teloxide::prelude::*;
use teloxide::types::ParseMode;
use tokio::sync::mpsc;

use crate::core::retry::{retry, RetryConfig};
use crate::core::utils::escape_markdown_v2;
use crate::stock::Catalog;
use crate::telegram::Bot;
use crate::watcher::RestockEvent;

/// Push message for one rising-edge event.
pub fn format_restock(event: &RestockEvent, catalog: &Catalog) -> String {
    let glyph = catalog.item_glyph(&event.id);
    let name = escape_markdown_v2(catalog.display_name(&event.id, &event.name));
    let mut text = format!("🔔 *Restock\\!* {} {}: x{}", glyph, name, event.quantity);
    if let Some(price) = catalog.item_info(&event.id).and_then(|i| i.price) {
        text.push_str(&format!(" · 💰{}", price));
    }
    text
}

/// Spawns the broadcast task.
pub fn start_restock_notifier(
    bot: Bot,
    chat_id: ChatId,
    catalog: Arc<Catalog>,
    mut rx: mpsc::UnboundedReceiver<RestockEvent>,
) {
    tokio::spawn(async move {
        let retry_config = RetryConfig::quick();

        while let Some(event) = rx.recv().await {
            let text = format_restock(&event, &catalog);

            let result = retry(&retry_config, || {
                let bot = bot.clone();
                let text = text.clone();
                async move {
                    bot.send_message(chat_id, text)
                        .parse_mode(ParseMode::MarkdownV2)
                        .await
                }
            })
            .await;

            match result.result {
                Ok(_) => log::info!("Broadcast restock of {} to chat {}", event.name, chat_id),
                Err(e) => log::error!("Dropping restock notification for {}: {}", event.name, e),
            }
        }

        log::info!("Restock notifier stopped (channel closed)");
    });
}
