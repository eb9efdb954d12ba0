//! Stock domain: upstream API client, typed records, display catalog and
//! message formatting.
//!
//! Upstream payloads are parsed into typed records exactly once, at the
//! client boundary; everything downstream works with [`StockItem`] and
//! never touches raw JSON.

pub mod catalog;
pub mod fetch;
pub mod format;
pub mod types;

pub use catalog::{Catalog, ItemInfo};
pub use fetch::StockClient;
pub use types::{StockCategory, StockItem, StockReport, StockSnapshot, WeatherEvent, WeatherReport};
