//! Background scheduler that periodically polls the shop and diffs it
//! against the previous snapshot.
//!
//! Runs as a `tokio::spawn`ed task, emitting `RestockEvent`s through an
//! mpsc channel. The Telegram layer receives these and broadcasts
//! formatted messages.

use std::sync::Arc;

use chrono::{DateTime, Timelike, Utc};
use tokio::sync::mpsc;
use tokio::time::Duration;

use crate::core::config;
use crate::stock::{Catalog, StockClient, StockSnapshot};

use super::diff::{rising_edges, RestockEvent};

/// When the next poll happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulePolicy {
    /// Fixed sleep between cycles.
    Interval(Duration),
    /// Next multiple of `period` past the hour, plus `offset`. Matches
    /// the upstream shop's own restock cadence so polls land just after
    /// a restock.
    Aligned { period: Duration, offset: Duration },
}

impl SchedulePolicy {
    /// Builds the policy from POLL_SCHEDULE / POLL_INTERVAL_SECS /
    /// POLL_ALIGN_OFFSET_SECS.
    pub fn from_env() -> Self {
        let period = Duration::from_secs((*config::poll::INTERVAL_SECS).max(1));
        match config::poll::SCHEDULE.as_str() {
            "interval" => SchedulePolicy::Interval(period),
            _ => SchedulePolicy::Aligned {
                period,
                offset: Duration::from_secs(*config::poll::ALIGN_OFFSET_SECS),
            },
        }
    }

    /// Time to sleep from `now` until the next tick. Pure.
    pub fn next_delay(&self, now: DateTime<Utc>) -> Duration {
        match *self {
            SchedulePolicy::Interval(period) => period,
            SchedulePolicy::Aligned { period, offset } => {
                let period_secs = period.as_secs().max(1);
                let into_hour = u64::from(now.minute()) * 60 + u64::from(now.second());
                let next_boundary = (into_hour / period_secs + 1) * period_secs;
                Duration::from_secs(next_boundary - into_hour) + offset
            }
        }
    }
}

/// Start the restock watcher background task.
///
/// Returns a receiver for `RestockEvent`s that should be consumed by the
/// Telegram broadcast dispatcher. The task owns the one mutable piece of
/// state, the previous snapshot, and never terminates on a bad cycle.
pub fn start_scheduler(
    client: Arc<StockClient>,
    catalog: Arc<Catalog>,
    policy: SchedulePolicy,
) -> mpsc::UnboundedReceiver<RestockEvent> {
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        // Warm-up fetch: seed the previous snapshot so a restart does not
        // re-announce everything already in stock.
        let mut previous = match client.fetch_report().await {
            Ok(report) => report.snapshot(),
            Err(e) => {
                log::warn!("Warm-up fetch failed, starting from an empty snapshot: {}", e);
                StockSnapshot::default()
            }
        };

        log::info!(
            "Stock watcher started ({:?}, {} item(s) in warm-up snapshot)",
            policy,
            previous.len()
        );

        loop {
            let delay = policy.next_delay(Utc::now());
            log::debug!("Next stock poll in {:?}", delay);
            tokio::time::sleep(delay).await;

            match client.fetch_report().await {
                Err(e) => {
                    // "No data" must not read as "zero stock": keep the
                    // previous snapshot and emit nothing this cycle.
                    log::warn!("Stock fetch failed, skipping cycle: {}", e);
                }
                Ok(report) => {
                    let events = rising_edges(&previous, &report, &catalog);
                    for event in events {
                        log::info!("Restock: {} x{}", event.name, event.quantity);
                        if tx.send(event).is_err() {
                            log::warn!("Notification channel closed, stopping watcher");
                            return;
                        }
                    }
                    // Full replacement, never merged: items that vanished
                    // must read as absent on their next appearance.
                    previous = report.snapshot();
                }
            }
        }
    });

    rx
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_interval_policy_is_constant() {
        let policy = SchedulePolicy::Interval(Duration::from_secs(120));
        let now = Utc.with_ymd_and_hms(2025, 7, 13, 14, 3, 10).unwrap();
        assert_eq!(policy.next_delay(now), Duration::from_secs(120));
    }

    #[test]
    fn test_aligned_policy_snaps_to_next_boundary() {
        let policy = SchedulePolicy::Aligned {
            period: Duration::from_secs(300),
            offset: Duration::from_secs(30),
        };
        // 14:03:10 → next boundary 14:05:00, plus 30s offset = 140s
        let now = Utc.with_ymd_and_hms(2025, 7, 13, 14, 3, 10).unwrap();
        assert_eq!(policy.next_delay(now), Duration::from_secs(140));
    }

    #[test]
    fn test_aligned_policy_on_boundary_waits_full_period() {
        let policy = SchedulePolicy::Aligned {
            period: Duration::from_secs(300),
            offset: Duration::from_secs(0),
        };
        let now = Utc.with_ymd_and_hms(2025, 7, 13, 14, 5, 0).unwrap();
        assert_eq!(policy.next_delay(now), Duration::from_secs(300));
    }

    #[test]
    fn test_aligned_policy_crosses_hour_boundary() {
        let policy = SchedulePolicy::Aligned {
            period: Duration::from_secs(300),
            offset: Duration::from_secs(15),
        };
        let now = Utc.with_ymd_and_hms(2025, 7, 13, 14, 58, 40).unwrap();
        // Next boundary is 15:00:00, 80s away, plus offset
        assert_eq!(policy.next_delay(now), Duration::from_secs(95));
    }
}
