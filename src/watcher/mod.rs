//! Background restock watcher: poll the shop, diff against the previous
//! snapshot, emit notifications for watch-list items that came back.
//!
//! Architecture: the watcher is independent from teloxide. It emits
//! [`RestockEvent`] structs through a `tokio::mpsc` channel; the Telegram
//! layer (`telegram/notifications.rs`) receives, formats and broadcasts
//! them.

pub mod diff;
pub mod scheduler;

pub use diff::{rising_edges, RestockEvent};
pub use scheduler::{start_scheduler, SchedulePolicy};
