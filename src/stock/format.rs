//! Message formatting.
//!
//! Pure functions, deterministic for a given input order. Output is
//! MarkdownV2 with dynamic fields escaped; literal decorations avoid
//! reserved characters so the text also reads fine as plain terminal
//! output (CLI `fetch`).

use crate::core::utils::escape_markdown_v2;

use super::catalog::Catalog;
use super::types::{StockItem, StockReport, WeatherReport};

/// One decorated category block.
///
/// An empty item list produces an empty string so absent categories are
/// omitted, never shown as "0 items".
pub fn format_block(title: &str, glyph: &str, items: &[StockItem], catalog: &Catalog) -> String {
    if items.is_empty() {
        return String::new();
    }

    let mut text = format!("━ {} {} ━\n", glyph, title);
    for item in items {
        let item_glyph = catalog.item_glyph(&item.id);
        let name = escape_markdown_v2(catalog.display_name(&item.id, &item.name));
        text.push_str(&format!("   {} {}: x{}", item_glyph, name, item.quantity));
        if let Some(price) = catalog.item_info(&item.id).and_then(|i| i.price) {
            text.push_str(&format!(" · 💰{}", price));
        }
        text.push('\n');
    }
    text.push('\n');
    text
}

/// The full stock report: timestamp header plus every non-empty block.
pub fn format_report(report: &StockReport, catalog: &Catalog) -> String {
    // "%d %b %Y" keeps the header free of MarkdownV2 reserved characters
    let timestamp = report.fetched_at.format("%d %b %Y %H:%M:%S UTC");
    let mut text = format!("🕒 {}\n\n📊 *Grow a Garden stock*\n\n", timestamp);

    let mut any = false;
    for (category, items) in &report.categories {
        let block = format_block(category.title(), catalog.category_glyph(*category), items, catalog);
        if !block.is_empty() {
            any = true;
            text.push_str(&block);
        }
    }

    if !any {
        text.push_str("The shop is empty right now, check back soon\\.\n");
    }
    text
}

/// Current weather, or a calm-skies line when nothing is active.
pub fn format_weather(report: &WeatherReport) -> String {
    let mut lines: Vec<String> = report
        .active()
        .map(|event| format!("   🌀 {}", escape_markdown_v2(&event.name)))
        .collect();

    if lines.is_empty() {
        return "☀️ Clear skies, no active weather events\\.".to_string();
    }

    lines.insert(0, "🌦 *Current weather*".to_string());
    lines.join("\n")
}
