//! Telegram bot integration and handlers

pub mod bot;
pub mod handlers;
pub mod markdown;
pub mod menu;
pub mod notifications;

pub use teloxide::Bot;

// Re-exports for convenience
pub use bot::{create_bot, setup_bot_commands, Command};
pub use handlers::{schema, HandlerDeps, HandlerError};
pub use menu::main_keyboard;
pub use notifications::start_restock_notifier;
