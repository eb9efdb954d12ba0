//! Rising-edge detection between two consecutive stock snapshots.

use std::collections::HashSet;

use crate::stock::{Catalog, StockReport, StockSnapshot};

/// A watch-list item that came back in stock this cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestockEvent {
    pub id: String,
    pub name: String,
    pub quantity: u32,
}

/// Finds every watch-list item whose quantity crossed zero → positive
/// between `previous` and the items in `report`.
///
/// Fires ONLY on that transition: an item that merely grew from 2 to 5
/// produces nothing, so a user gets at most one ping per restock, never
/// one per poll. An item listed in several categories yields one event.
pub fn rising_edges(previous: &StockSnapshot, report: &StockReport, catalog: &Catalog) -> Vec<RestockEvent> {
    let mut seen = HashSet::new();
    let mut events = Vec::new();

    for item in report.items() {
        if item.quantity == 0 || !catalog.is_watched(&item.id) {
            continue;
        }
        if previous.quantity(&item.id) > 0 {
            continue;
        }
        if !seen.insert(item.id.clone()) {
            continue;
        }
        events.push(RestockEvent {
            id: item.id.clone(),
            name: item.name.clone(),
            quantity: item.quantity,
        });
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stock::types::{StockCategory, StockItem};
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    fn report(items: &[(&str, u32)]) -> StockReport {
        StockReport {
            fetched_at: Utc::now(),
            categories: vec![(
                StockCategory::Seeds,
                items
                    .iter()
                    .map(|(id, qty)| StockItem {
                        id: id.to_string(),
                        name: id.to_string(),
                        quantity: *qty,
                    })
                    .collect(),
            )],
        }
    }

    fn snapshot(items: &[(&str, u32)]) -> StockSnapshot {
        items.iter().map(|(id, qty)| (id.to_string(), *qty)).collect()
    }

    fn watching(ids: &[&str]) -> Catalog {
        Catalog::builtin().with_watch_list(ids.iter().copied())
    }

    #[test]
    fn test_new_watched_item_fires_once() {
        let catalog = watching(&["grape"]);
        let events = rising_edges(&snapshot(&[]), &report(&[("grape", 2)]), &catalog);
        assert_eq!(
            events,
            vec![RestockEvent {
                id: "grape".to_string(),
                name: "grape".to_string(),
                quantity: 2,
            }]
        );
    }

    #[test]
    fn test_increase_from_nonzero_is_silent() {
        let catalog = watching(&["grape"]);
        let events = rising_edges(&snapshot(&[("grape", 2)]), &report(&[("grape", 5)]), &catalog);
        assert!(events.is_empty());
    }

    #[test]
    fn test_unwatched_item_is_ignored() {
        let catalog = watching(&["grape"]);
        let events = rising_edges(&snapshot(&[]), &report(&[("carrot", 10)]), &catalog);
        assert!(events.is_empty());
    }

    #[test]
    fn test_zero_quantity_never_fires() {
        let catalog = watching(&["grape"]);
        let events = rising_edges(&snapshot(&[]), &report(&[("grape", 0)]), &catalog);
        assert!(events.is_empty());
    }

    #[test]
    fn test_explicit_zero_in_previous_counts_as_absent() {
        let catalog = watching(&["grape"]);
        let events = rising_edges(&snapshot(&[("grape", 0)]), &report(&[("grape", 3)]), &catalog);
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_duplicate_listing_yields_one_event() {
        let catalog = watching(&["grape"]);
        let current = StockReport {
            fetched_at: Utc::now(),
            categories: vec![
                (
                    StockCategory::Seeds,
                    vec![StockItem {
                        id: "grape".to_string(),
                        name: "grape".to_string(),
                        quantity: 2,
                    }],
                ),
                (
                    StockCategory::Event,
                    vec![StockItem {
                        id: "grape".to_string(),
                        name: "grape".to_string(),
                        quantity: 4,
                    }],
                ),
            ],
        };
        let events = rising_edges(&snapshot(&[]), &current, &catalog);
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_only_edge_crossers_fire() {
        let catalog = watching(&["grape", "mango", "cacao"]);
        let previous = snapshot(&[("grape", 1), ("cacao", 0)]);
        let current = report(&[("grape", 3), ("mango", 2), ("cacao", 1), ("carrot", 9)]);
        let events = rising_edges(&previous, &current, &catalog);
        let ids: Vec<&str> = events.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["mango", "cacao"]);
    }
}
