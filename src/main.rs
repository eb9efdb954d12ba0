use anyhow::Result;
use dotenvy::dotenv;
use std::sync::Arc;
use teloxide::prelude::*;

use gardenwatch::cli::{Cli, Commands};
use gardenwatch::core::{config, init_logger, log_startup_summary, web_server, RateLimiter};
use gardenwatch::stock::{format as stock_format, Catalog, StockCategory, StockClient};
use gardenwatch::telegram::{create_bot, schema, setup_bot_commands, start_restock_notifier, HandlerDeps};
use gardenwatch::watcher::{start_scheduler, SchedulePolicy};

/// Main entry point for the Telegram bot
///
/// Parses CLI arguments and dispatches to the appropriate subcommand.
///
/// # Errors
/// Returns an error if initialization fails (logging, bot creation).
#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse_args();

    // Load environment variables from .env before any config is read
    let _ = dotenv();

    // Initialize logger (console + file)
    init_logger(&config::LOG_FILE_PATH)?;

    match cli.command {
        Some(Commands::Fetch { category, json }) => run_fetch(category, json).await,
        Some(Commands::Run) | None => run_bot().await,
    }
}

/// Run the Telegram bot
async fn run_bot() -> Result<()> {
    log::info!("Starting gardenwatch...");
    log_startup_summary();

    // Create bot instance
    let bot = create_bot()?;

    // Retry briefly in case the Bot API is still coming up
    let bot_info = {
        let mut attempt = 0;
        loop {
            match bot.get_me().await {
                Ok(info) => break info,
                Err(e) if attempt < 3 => {
                    attempt += 1;
                    log::warn!("Bot API not ready (attempt {}): {}. Retrying in 5 seconds...", attempt, e);
                    tokio::time::sleep(std::time::Duration::from_secs(5)).await;
                }
                Err(e) => return Err(anyhow::anyhow!("Failed to connect to Bot API: {}", e)),
            }
        }
    };
    log::info!("Bot username: {:?}, Bot ID: {}", bot_info.username, bot_info.id);

    setup_bot_commands(&bot).await?;

    let catalog = Arc::new(Catalog::builtin());
    log::info!("Watch-list: {} item(s)", catalog.watch_list().count());
    let stock_client = Arc::new(StockClient::from_env()?);

    let rate_limiter = Arc::new(RateLimiter::new());
    // Periodic cleanup of expired cooldown entries (every 5 minutes)
    Arc::clone(&rate_limiter).spawn_cleanup_task(std::time::Duration::from_secs(300));

    // Liveness server keeps the hosting platform's port check green
    let health_port = *config::HEALTH_PORT;
    tokio::spawn(async move {
        if let Err(e) = web_server::start_health_server(health_port).await {
            log::error!("Health server error: {}", e);
        }
    });

    // Background restock watcher, only when a broadcast destination exists
    if let Some(chat_id) = *config::BROADCAST_CHAT_ID {
        let policy = SchedulePolicy::from_env();
        let rx = start_scheduler(Arc::clone(&stock_client), Arc::clone(&catalog), policy);
        start_restock_notifier(bot.clone(), ChatId(chat_id), Arc::clone(&catalog), rx);
        log::info!("Restock broadcasts enabled (chat {})", chat_id);
    } else {
        log::warn!("BROADCAST_CHAT_ID not set, restock broadcasts disabled");
    }

    // Create the dispatcher handler tree
    let deps = HandlerDeps::new(stock_client, catalog, rate_limiter);
    let handler = schema(deps);

    log::info!("Ready to receive updates");

    Dispatcher::builder(bot, handler)
        .dependencies(DependencyMap::new())
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}

/// Run a one-shot fetch and print the result (debugging aid)
async fn run_fetch(category: Option<String>, json: bool) -> Result<()> {
    let client = StockClient::from_env()?;
    let catalog = Catalog::builtin();

    let categories: Vec<StockCategory> = match category {
        Some(name) => {
            let parsed = StockCategory::from_name(&name)
                .ok_or_else(|| anyhow::anyhow!("Unknown category: {} (try seeds, gear, eggs, cosmetics, event)", name))?;
            vec![parsed]
        }
        None => StockCategory::ALL.to_vec(),
    };

    let report = client.fetch_categories(&categories).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", stock_format::format_report(&report, &catalog));
    }

    Ok(())
}
