//! Inline keyboards

use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

/// Shorthand for a callback button.
pub fn cb(text: impl Into<String>, data: impl Into<String>) -> InlineKeyboardButton {
    InlineKeyboardButton::callback(text, data)
}

/// Main menu shown by /start.
pub fn main_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![cb("📦 Show stock", "show:stock")],
        vec![cb("💎 Cosmetics", "show:cosmetics"), cb("🌦 Weather", "show:weather")],
    ])
}
