use std::collections::HashMap;
use std::sync::Arc;
use teloxide::types::ChatId;
use tokio::sync::Mutex;
use tokio::time::{Duration, Instant};

use crate::core::config;

/// Per-user command cooldown.
///
/// Rejects repeat invocations inside a short window so an accidental
/// double-tap does not trigger two upstream fetches. This is a soft rate
/// limit: a rejected user gets a friendly reply and nothing else happens.
#[derive(Clone)]
pub struct RateLimiter {
    /// Expiry instant of the active cooldown window per chat
    limits: Arc<Mutex<HashMap<ChatId, Instant>>>,
    /// Time a user has to wait between accepted commands
    cooldown: Duration,
}

impl RateLimiter {
    /// Creates a rate limiter with the cooldown from config (COOLDOWN_SECS).
    pub fn new() -> Self {
        Self::with_cooldown(config::rate_limit::duration())
    }

    /// Creates a rate limiter with a custom cooldown.
    pub fn with_cooldown(cooldown: Duration) -> Self {
        Self {
            limits: Arc::new(Mutex::new(HashMap::new())),
            cooldown,
        }
    }

    /// Returns `true` while the user is still inside the cooldown window.
    pub async fn is_rate_limited(&self, chat_id: ChatId) -> bool {
        let limits = self.limits.lock().await;
        if let Some(&until) = limits.get(&chat_id) {
            if Instant::now() < until {
                return true;
            }
        }
        false
    }

    /// Remaining wait time, or `None` when the user may act again.
    pub async fn remaining(&self, chat_id: ChatId) -> Option<Duration> {
        let limits = self.limits.lock().await;
        if let Some(&until) = limits.get(&chat_id) {
            let now = Instant::now();
            if now < until {
                return Some(until - now);
            }
        }
        None
    }

    /// Opens a new cooldown window for the user.
    ///
    /// Called after an accepted command; rejected invocations do not
    /// extend the window.
    pub async fn touch(&self, chat_id: ChatId) {
        let mut limits = self.limits.lock().await;
        limits.insert(chat_id, Instant::now() + self.cooldown);
    }

    /// Removes the cooldown for a user.
    pub async fn remove(&self, chat_id: ChatId) {
        let mut limits = self.limits.lock().await;
        limits.remove(&chat_id);
    }

    /// Spawns a background task that drops expired entries every `every`.
    ///
    /// The map only grows on user activity, so this keeps memory flat on
    /// long uptimes.
    pub fn spawn_cleanup_task(self: Arc<Self>, every: std::time::Duration) {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            loop {
                ticker.tick().await;
                let now = Instant::now();
                let mut limits = self.limits.lock().await;
                let before = limits.len();
                limits.retain(|_, &mut until| until > now);
                let dropped = before - limits.len();
                if dropped > 0 {
                    log::debug!("Rate limiter cleanup: dropped {} expired entr(ies)", dropped);
                }
            }
        });
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_not_limited_initially() {
        let limiter = RateLimiter::with_cooldown(Duration::from_secs(10));
        assert!(!limiter.is_rate_limited(ChatId(1)).await);
        assert!(limiter.remaining(ChatId(1)).await.is_none());
    }

    #[tokio::test]
    async fn test_limited_after_touch() {
        let limiter = RateLimiter::with_cooldown(Duration::from_secs(10));
        limiter.touch(ChatId(1)).await;
        assert!(limiter.is_rate_limited(ChatId(1)).await);
        assert!(limiter.remaining(ChatId(1)).await.is_some());
        // Other users are unaffected
        assert!(!limiter.is_rate_limited(ChatId(2)).await);
    }

    #[tokio::test]
    async fn test_expires_after_cooldown() {
        let limiter = RateLimiter::with_cooldown(Duration::from_millis(20));
        limiter.touch(ChatId(1)).await;
        tokio::time::sleep(Duration::from_millis(40)).await;
        assert!(!limiter.is_rate_limited(ChatId(1)).await);
    }

    #[tokio::test]
    async fn test_remove_clears_window() {
        let limiter = RateLimiter::with_cooldown(Duration::from_secs(60));
        limiter.touch(ChatId(1)).await;
        limiter.remove(ChatId(1)).await;
        assert!(!limiter.is_rate_limited(ChatId(1)).await);
    }
}
