//! Dispatcher schema and handler chain builders
//!
//! Every user action is stateless: fetch, format, reply, done. The only
//! guard is a per-user cooldown that rejects rapid re-triggering with a
//! friendly message.

use std::sync::Arc;

use teloxide::dispatching::{UpdateFilterExt, UpdateHandler};
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;

use crate::core::rate_limiter::RateLimiter;
use crate::stock::{format, Catalog, StockCategory, StockClient};
use crate::telegram::bot::Command;
use crate::telegram::markdown::send_message_markdown_v2;
use crate::telegram::menu::main_keyboard;
use crate::telegram::Bot;

/// Error type for handlers
pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Categories shown by the stock view; cosmetics get their own view.
const STOCK_VIEW: [StockCategory; 4] = [
    StockCategory::Seeds,
    StockCategory::Gear,
    StockCategory::Eggs,
    StockCategory::Event,
];

const WELCOME_TEXT: &str = "👋 Hi! I track the Grow a Garden shop.\nPick what to look at:";
const DATA_UNAVAILABLE_TEXT: &str = "😕 Stock data is unavailable right now, try again in a minute.";

/// Dependencies required by handlers
#[derive(Clone)]
pub struct HandlerDeps {
    pub stock_client: Arc<StockClient>,
    pub catalog: Arc<Catalog>,
    pub rate_limiter: Arc<RateLimiter>,
}

impl HandlerDeps {
    /// Create new handler dependencies
    pub fn new(stock_client: Arc<StockClient>, catalog: Arc<Catalog>, rate_limiter: Arc<RateLimiter>) -> Self {
        Self {
            stock_client,
            catalog,
            rate_limiter,
        }
    }
}

/// Creates the main dispatcher schema for the Telegram bot.
///
/// Returns a handler tree for teloxide's Dispatcher. The same schema is
/// used in production and in integration tests.
pub fn schema(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    let deps_commands = deps.clone();
    let deps_callback = deps;

    dptree::entry()
        .branch(command_handler(deps_commands))
        .branch(callback_handler(deps_callback))
}

/// Handler for bot commands (/start, /stock, /cosmetics, /weather, /help)
fn command_handler(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    Update::filter_message().branch(dptree::entry().filter_command::<Command>().endpoint(
        move |bot: Bot, msg: Message, cmd: Command| {
            let deps = deps.clone();
            async move {
                log::info!("Received command {:?} from chat {}", cmd, msg.chat.id);

                match cmd {
                    Command::Start => {
                        bot.send_message(msg.chat.id, WELCOME_TEXT)
                            .reply_markup(main_keyboard())
                            .await?;
                    }
                    Command::Stock => show_stock(&bot, msg.chat.id, &deps).await,
                    Command::Cosmetics => show_cosmetics(&bot, msg.chat.id, &deps).await,
                    Command::Weather => show_weather(&bot, msg.chat.id, &deps).await,
                    Command::Help => {
                        bot.send_message(msg.chat.id, Command::descriptions().to_string())
                            .await?;
                    }
                }
                Ok(())
            }
        },
    ))
}

/// Handler for callback queries (inline keyboard buttons)
fn callback_handler(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    Update::filter_callback_query().endpoint(move |bot: Bot, q: CallbackQuery| {
        let deps = deps.clone();
        async move {
            let Some(data) = q.data.clone() else {
                return Ok(());
            };
            // Acknowledge first so the button stops spinning
            let _ = bot.answer_callback_query(q.id.clone()).await;

            let Some(chat_id) = q.message.as_ref().map(|m| m.chat().id) else {
                return Ok(());
            };

            match data.as_str() {
                "show:stock" => show_stock(&bot, chat_id, &deps).await,
                "show:cosmetics" => show_cosmetics(&bot, chat_id, &deps).await,
                "show:weather" => show_weather(&bot, chat_id, &deps).await,
                other => log::debug!("Ignoring unknown callback data: {}", other),
            }
            Ok(())
        }
    })
}

/// Returns `true` when the user may act; otherwise replies with the
/// remaining wait and takes no other action.
async fn pass_cooldown(bot: &Bot, chat_id: ChatId, deps: &HandlerDeps) -> bool {
    if deps.rate_limiter.is_rate_limited(chat_id).await {
        let remaining = deps
            .rate_limiter
            .remaining(chat_id)
            .await
            .map(|d| d.as_secs().max(1))
            .unwrap_or(1);
        let _ = bot
            .send_message(chat_id, format!("⏳ Easy there! Try again in {}s.", remaining))
            .await;
        return false;
    }
    deps.rate_limiter.touch(chat_id).await;
    true
}

async fn show_stock(bot: &Bot, chat_id: ChatId, deps: &HandlerDeps) {
    if !pass_cooldown(bot, chat_id, deps).await {
        return;
    }
    match deps.stock_client.fetch_categories(&STOCK_VIEW).await {
        Ok(report) => {
            let text = format::format_report(&report, &deps.catalog);
            if let Err(e) = send_message_markdown_v2(bot, chat_id, text, None).await {
                log::error!("Failed to send stock report to {}: {}", chat_id, e);
            }
        }
        Err(e) => {
            log::warn!("Stock fetch for chat {} failed: {}", chat_id, e);
            let _ = bot.send_message(chat_id, DATA_UNAVAILABLE_TEXT).await;
        }
    }
}

async fn show_cosmetics(bot: &Bot, chat_id: ChatId, deps: &HandlerDeps) {
    if !pass_cooldown(bot, chat_id, deps).await {
        return;
    }
    match deps.stock_client.fetch_categories(&[StockCategory::Cosmetics]).await {
        Ok(report) => {
            let text = format::format_report(&report, &deps.catalog);
            if let Err(e) = send_message_markdown_v2(bot, chat_id, text, None).await {
                log::error!("Failed to send cosmetics report to {}: {}", chat_id, e);
            }
        }
        Err(e) => {
            log::warn!("Cosmetics fetch for chat {} failed: {}", chat_id, e);
            let _ = bot.send_message(chat_id, DATA_UNAVAILABLE_TEXT).await;
        }
    }
}

async fn show_weather(bot: &Bot, chat_id: ChatId, deps: &HandlerDeps) {
    if !pass_cooldown(bot, chat_id, deps).await {
        return;
    }
    match deps.stock_client.fetch_weather().await {
        Ok(report) => {
            let text = format::format_weather(&report);
            if let Err(e) = send_message_markdown_v2(bot, chat_id, text, None).await {
                log::error!("Failed to send weather to {}: {}", chat_id, e);
            }
        }
        Err(e) => {
            log::warn!("Weather fetch for chat {} failed: {}", chat_id, e);
            let _ = bot.send_message(chat_id, DATA_UNAVAILABLE_TEXT).await;
        }
    }
}
