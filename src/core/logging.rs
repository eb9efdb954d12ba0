//! Logging initialization and startup diagnostics
//!
//! This module provides:
//! - Logger initialization (console + file)
//! - A startup summary of the effective configuration

use anyhow::Result;
use simplelog::*;
use std::fs::File;

use crate::core::config;

/// Initialize logger for both console and file output
///
/// # Arguments
/// * `log_file_path` - Path to the log file
///
/// # Returns
/// * `Ok(())` - Logger initialized successfully
/// * `Err(anyhow::Error)` - Failed to initialize logger
pub fn init_logger(log_file_path: &str) -> Result<()> {
    let log_file = File::create(log_file_path).map_err(|e| anyhow::anyhow!("Failed to create log file: {}", e))?;

    CombinedLogger::init(vec![
        TermLogger::new(
            LevelFilter::Info,
            Config::default(),
            TerminalMode::Mixed,
            ColorChoice::Auto,
        ),
        WriteLogger::new(LevelFilter::Info, Config::default(), log_file),
    ])
    .map_err(|e| anyhow::anyhow!("Failed to initialize logger: {}", e))?;

    Ok(())
}

/// Logs the effective configuration at application startup
///
/// Secrets are reported as set/unset, never by value.
pub fn log_startup_summary() {
    log::info!("Stock API: {}", config::STOCK_API_URL.as_str());
    log::info!("Weather API: {}", config::STOCK_WEATHER_URL.as_str());

    if config::STOCK_API_KEY.is_some() {
        log::info!("STOCK_API_KEY: set");
    } else {
        log::warn!("STOCK_API_KEY: not set (upstream may reject anonymous requests)");
    }

    match *config::BROADCAST_CHAT_ID {
        Some(chat_id) => log::info!("Broadcast destination: chat {}", chat_id),
        None => log::warn!("BROADCAST_CHAT_ID: not set, restock broadcasts disabled"),
    }

    log::info!(
        "Poll schedule: {} (period {}s, offset {}s)",
        config::poll::SCHEDULE.as_str(),
        *config::poll::INTERVAL_SECS,
        *config::poll::ALIGN_OFFSET_SECS,
    );
    log::info!("Command cooldown: {}s", *config::rate_limit::COOLDOWN_SECS);
}
