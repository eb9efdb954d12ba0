//! Read-only display catalog: glyphs, labels, prices and the watch-list.
//!
//! Loaded once at startup from the source-embedded tables and shared
//! behind an `Arc`. Unknown items fall back to a generic glyph instead of
//! failing, so an upstream catalog change never breaks formatting.

use std::collections::{HashMap, HashSet};

use super::types::StockCategory;

/// Glyph used for items the catalog does not know.
pub const FALLBACK_GLYPH: &str = "•";

/// Display attributes for one shop item.
#[derive(Debug, Clone, Copy)]
pub struct ItemInfo {
    pub glyph: &'static str,
    /// Human label when the upstream id is not presentable as-is.
    pub label: Option<&'static str>,
    /// Sheckle price, when known. Display-only.
    pub price: Option<u32>,
}

const fn info(glyph: &'static str, label: Option<&'static str>, price: Option<u32>) -> ItemInfo {
    ItemInfo { glyph, label, price }
}

#[rustfmt::skip]
const ITEM_TABLE: &[(&str, ItemInfo)] = &[
    // Seeds
    ("Carrot",          info("🥕", None, Some(10))),
    ("Strawberry",      info("🍓", None, Some(50))),
    ("Blueberry",       info("🫐", None, Some(400))),
    ("Tomato",          info("🍅", None, Some(800))),
    ("Cauliflower",     info("🥦", None, Some(1_300))),
    ("Watermelon",      info("🍉", None, Some(2_500))),
    ("Green Apple",     info("🍏", None, Some(3_500))),
    ("Avocado",         info("🥑", None, Some(5_000))),
    ("Banana",          info("🍌", None, Some(7_000))),
    ("Pineapple",       info("🍍", None, Some(7_500))),
    ("Kiwi",            info("🥝", None, Some(10_000))),
    ("Bell Pepper",     info("🌶️", None, Some(55_000))),
    ("Prickly Pear",    info("🌵", None, Some(555_000))),
    ("Loquat",          info("🍑", None, Some(900_000))),
    ("Feijoa",          info("🥝", None, Some(2_750_000))),
    ("Pitcher Plant",   info("🌱", None, Some(7_500_000))),
    ("Sugar Apple",     info("🍏", None, Some(25_000_000))),
    ("Rafflesia",       info("🌺", None, None)),
    // Gear
    ("Watering Can",    info("🚿", None, Some(50_000))),
    ("Trowel",          info("⛏️", None, Some(100_000))),
    ("Recall Wrench",   info("🔧", None, Some(150_000))),
    ("Basic Sprinkler", info("🌦️", None, Some(25_000))),
    ("Advanced Sprinkler", info("💦", None, Some(50_000))),
    ("Godly Sprinkler", info("⚡", None, Some(120_000))),
    ("Master Sprinkler", info("💧", None, Some(10_000_000))),
    ("Cleaning Spray",  info("🧴", None, Some(15_000))),
    ("Favorite Tool",   info("❤️", None, Some(20_000))),
    ("Harvest Tool",    info("🧲", None, Some(30_000))),
    ("Magnifying Glass", info("🔍", None, Some(10_000_000))),
    ("Tanning Mirror",  info("🪞", None, Some(1_000_000))),
    ("Friendship Pot",  info("🌻", None, Some(15_000_000))),
    // Eggs
    ("Common Egg",      info("🥚", None, Some(50_000))),
    ("Mythical Egg",    info("🥚", None, Some(8_000_000))),
    ("Bug Egg",         info("🐛", None, Some(50_000_000))),
    // Cosmetics
    ("Green Tractor",   info("🚜", None, None)),
    ("Large Wood Flooring", info("🪵", None, None)),
    ("Sign Crate",      info("📦", None, None)),
    ("Small Wood Table", info("🪑", None, None)),
    ("Large Path Tile", info("🛤️", None, None)),
    ("Medium Path Tile", info("⬛", None, None)),
    ("Wood Fence",      info("🪵", None, None)),
    ("Axe Stump",       info("🪨", None, None)),
    ("Shovel",          info("🪓", None, None)),
    // Snake_case ids some upstream variants report instead of names
    ("sugar_apple",     info("🍏", Some("Sugar Apple"), Some(25_000_000))),
    ("master_sprinkler", info("💧", Some("Master Sprinkler"), Some(10_000_000))),
    ("bug_egg",         info("🐛", Some("Bug Egg"), Some(50_000_000))),
];

/// Rare, high-value items worth a push notification when they restock.
const WATCH_TABLE: &[&str] = &[
    "Sugar Apple",
    "Rafflesia",
    "Feijoa",
    "Pitcher Plant",
    "Prickly Pear",
    "Loquat",
    "Master Sprinkler",
    "Godly Sprinkler",
    "Friendship Pot",
    "Mythical Egg",
    "Bug Egg",
    // Snake_case aliases
    "sugar_apple",
    "master_sprinkler",
    "bug_egg",
];

/// Read-only lookup tables shared by the formatter, the handlers and the
/// restock watcher.
#[derive(Debug, Clone)]
pub struct Catalog {
    category_glyphs: HashMap<StockCategory, &'static str>,
    items: HashMap<&'static str, ItemInfo>,
    watch_list: HashSet<String>,
}

impl Catalog {
    /// The source-embedded tables.
    pub fn builtin() -> Self {
        let category_glyphs = HashMap::from([
            (StockCategory::Seeds, "🌱"),
            (StockCategory::Gear, "🧰"),
            (StockCategory::Eggs, "🥚"),
            (StockCategory::Cosmetics, "💎"),
            (StockCategory::Event, "🌴"),
        ]);
        Self {
            category_glyphs,
            items: ITEM_TABLE.iter().copied().collect(),
            watch_list: WATCH_TABLE.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Replaces the watch-list (deployment-specific tuning).
    #[must_use]
    pub fn with_watch_list<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.watch_list = ids.into_iter().map(Into::into).collect();
        self
    }

    pub fn category_glyph(&self, category: StockCategory) -> &'static str {
        self.category_glyphs.get(&category).copied().unwrap_or("📦")
    }

    pub fn item_info(&self, id: &str) -> Option<&ItemInfo> {
        self.items.get(id)
    }

    /// Glyph for an item, falling back to [`FALLBACK_GLYPH`].
    pub fn item_glyph(&self, id: &str) -> &'static str {
        self.items.get(id).map(|i| i.glyph).unwrap_or(FALLBACK_GLYPH)
    }

    /// Presentable name for an item: the catalog label when one exists,
    /// otherwise the upstream name itself.
    /// Presentable name for an item: the catalog label when one exists,
    /// otherwise the upstream display name.
    pub fn display_name<'a>(&self, id: &str, name: &'a str) -> &'a str {
        self.items.get(id).and_then(|i| i.label).unwrap_or(name)
    }

    pub fn is_watched(&self, id: &str) -> bool {
        self.watch_list.contains(id)
    }

    pub fn watch_list(&self) -> impl Iterator<Item = &str> {
        self.watch_list.iter().map(String::as_str)
    }
}
