//! Typed stock records and snapshots.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Shop categories tracked by the bot. `ALL` is the display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum StockCategory {
    Seeds,
    Gear,
    Eggs,
    Cosmetics,
    Event,
}

impl StockCategory {
    pub const ALL: [StockCategory; 5] = [
        StockCategory::Seeds,
        StockCategory::Gear,
        StockCategory::Eggs,
        StockCategory::Cosmetics,
        StockCategory::Event,
    ];

    /// Value used in the upstream `type=eq.<slug>` filter.
    pub fn slug(self) -> &'static str {
        match self {
            StockCategory::Seeds => "seed_stock",
            StockCategory::Gear => "gear_stock",
            StockCategory::Eggs => "egg_stock",
            StockCategory::Cosmetics => "cosmetic_stock",
            StockCategory::Event => "event_stock",
        }
    }

    /// Block title shown to users.
    pub fn title(self) -> &'static str {
        match self {
            StockCategory::Seeds => "Seeds",
            StockCategory::Gear => "Gear",
            StockCategory::Eggs => "Eggs",
            StockCategory::Cosmetics => "Cosmetics",
            StockCategory::Event => "Event Shop",
        }
    }

    /// Parses a user-supplied category name (CLI `fetch --category`).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "seeds" | "seed" => Some(StockCategory::Seeds),
            "gear" => Some(StockCategory::Gear),
            "eggs" | "egg" => Some(StockCategory::Eggs),
            "cosmetics" | "cosmetic" => Some(StockCategory::Cosmetics),
            "event" | "eventshop" => Some(StockCategory::Event),
            _ => None,
        }
    }
}

/// One row as the upstream API returns it.
///
/// Parsed once at the client boundary; defaulting and validation happen
/// in [`RawStockRecord::into_item`] and nowhere else.
#[derive(Debug, Clone, Deserialize)]
pub struct RawStockRecord {
    #[serde(default)]
    pub item_id: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub multiplier: Option<i64>,
}

impl RawStockRecord {
    /// A record without a display name is dropped; a missing id falls back
    /// to the display name; a missing or negative quantity clamps to zero.
    pub fn into_item(self) -> Option<StockItem> {
        let name = self.display_name?;
        if name.trim().is_empty() {
            return None;
        }
        let id = match self.item_id {
            Some(id) if !id.trim().is_empty() => id,
            _ => name.clone(),
        };
        let quantity = self.multiplier.unwrap_or(0).max(0) as u32;
        Some(StockItem { id, name, quantity })
    }
}

/// A validated shop line item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StockItem {
    pub id: String,
    pub name: String,
    pub quantity: u32,
}

/// The full shop state captured by one successful fetch, in display order.
#[derive(Debug, Clone, Serialize)]
pub struct StockReport {
    pub fetched_at: DateTime<Utc>,
    pub categories: Vec<(StockCategory, Vec<StockItem>)>,
}

impl StockReport {
    /// All items across categories, in report order.
    pub fn items(&self) -> impl Iterator<Item = &StockItem> {
        self.categories.iter().flat_map(|(_, items)| items.iter())
    }

    /// Rebuilds the id-to-quantity snapshot from scratch.
    ///
    /// An item listed in several categories keeps its highest quantity, so
    /// "in stock anywhere" reads as in stock.
    pub fn snapshot(&self) -> StockSnapshot {
        let mut snapshot = StockSnapshot::default();
        for item in self.items() {
            let entry = snapshot.items.entry(item.id.clone()).or_insert(0);
            *entry = (*entry).max(item.quantity);
        }
        snapshot
    }
}

/// Mapping from item id to quantity, rebuilt on every poll.
///
/// Exactly one previous snapshot is retained, owned by the poll loop; a
/// process restart starts from an empty snapshot (every stocked item then
/// reads as newly-in-stock, an accepted quirk).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StockSnapshot {
    items: HashMap<String, u32>,
}

impl StockSnapshot {
    /// Quantity for `id`; absent ids read as zero.
    pub fn quantity(&self, id: &str) -> u32 {
        self.items.get(id).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl FromIterator<(String, u32)> for StockSnapshot {
    fn from_iter<I: IntoIterator<Item = (String, u32)>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

/// One row of the upstream weather table.
#[derive(Debug, Clone, Deserialize)]
pub struct RawWeatherRecord {
    #[serde(default)]
    pub weather_name: Option<String>,
    #[serde(default)]
    pub active: Option<bool>,
}

impl RawWeatherRecord {
    pub fn into_event(self) -> Option<WeatherEvent> {
        let name = self.weather_name?;
        if name.trim().is_empty() {
            return None;
        }
        Some(WeatherEvent {
            name,
            active: self.active.unwrap_or(false),
        })
    }
}

/// A single in-game weather condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherEvent {
    pub name: String,
    pub active: bool,
}

/// Current weather listing.
#[derive(Debug, Clone, Default)]
pub struct WeatherReport {
    pub events: Vec<WeatherEvent>,
}

impl WeatherReport {
    /// Only the events currently in effect.
    pub fn active(&self) -> impl Iterator<Item = &WeatherEvent> {
        self.events.iter().filter(|e| e.active)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    fn raw(id: Option<&str>, name: Option<&str>, qty: Option<i64>) -> RawStockRecord {
        RawStockRecord {
            item_id: id.map(String::from),
            display_name: name.map(String::from),
            multiplier: qty,
        }
    }

    #[test]
    fn test_record_without_name_is_dropped() {
        assert!(raw(Some("carrot"), None, Some(3)).into_item().is_none());
        assert!(raw(None, Some("   "), Some(3)).into_item().is_none());
    }

    #[test]
    fn test_missing_id_falls_back_to_name() {
        let item = raw(None, Some("Carrot"), Some(3)).into_item().unwrap();
        assert_eq!(item.id, "Carrot");
        assert_eq!(item.name, "Carrot");
        assert_eq!(item.quantity, 3);
    }

    #[test]
    fn test_quantity_defaults_and_clamps() {
        assert_eq!(raw(None, Some("Carrot"), None).into_item().unwrap().quantity, 0);
        assert_eq!(raw(None, Some("Carrot"), Some(-4)).into_item().unwrap().quantity, 0);
    }

    #[test]
    fn test_snapshot_absent_reads_as_zero() {
        let snapshot: StockSnapshot = [("Carrot".to_string(), 3)].into_iter().collect();
        assert_eq!(snapshot.quantity("Carrot"), 3);
        assert_eq!(snapshot.quantity("Grape"), 0);
    }

    #[test]
    fn test_report_snapshot_keeps_highest_quantity() {
        let report = StockReport {
            fetched_at: Utc::now(),
            categories: vec![
                (
                    StockCategory::Seeds,
                    vec![StockItem {
                        id: "Carrot".to_string(),
                        name: "Carrot".to_string(),
                        quantity: 2,
                    }],
                ),
                (
                    StockCategory::Event,
                    vec![StockItem {
                        id: "Carrot".to_string(),
                        name: "Carrot".to_string(),
                        quantity: 5,
                    }],
                ),
            ],
        };
        assert_eq!(report.snapshot().quantity("Carrot"), 5);
    }

    #[test]
    fn test_category_from_name() {
        assert_eq!(StockCategory::from_name("seeds"), Some(StockCategory::Seeds));
        assert_eq!(StockCategory::from_name(" Gear "), Some(StockCategory::Gear));
        assert_eq!(StockCategory::from_name("weather"), None);
    }
}
