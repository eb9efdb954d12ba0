use once_cell::sync::Lazy;
use std::env;
use std::time::Duration;

/// Bot token
/// Read from BOT_TOKEN or TELOXIDE_TOKEN environment variable
pub static BOT_TOKEN: Lazy<String> = Lazy::new(|| {
    env::var("BOT_TOKEN")
        .or_else(|_| env::var("TELOXIDE_TOKEN"))
        .unwrap_or_else(|_| String::new())
});

/// Upstream stock API endpoint
/// Read from STOCK_API_URL environment variable
/// Default: the hosted growagarden_stock REST table
pub static STOCK_API_URL: Lazy<String> = Lazy::new(|| {
    env::var("STOCK_API_URL")
        .unwrap_or_else(|_| "https://vextbzatpprnksyutbcp.supabase.co/rest/v1/growagarden_stock".to_string())
});

/// Upstream weather endpoint
/// Read from STOCK_WEATHER_URL environment variable
/// Default: the sibling growagarden_weather REST table next to STOCK_API_URL
pub static STOCK_WEATHER_URL: Lazy<String> = Lazy::new(|| {
    env::var("STOCK_WEATHER_URL").unwrap_or_else(|_| {
        match STOCK_API_URL.rsplit_once('/') {
            Some((base, _)) => format!("{}/growagarden_weather", base),
            None => STOCK_API_URL.clone(),
        }
    })
});

/// API key for the upstream stock API, sent as `apikey` + bearer headers
/// Read from STOCK_API_KEY environment variable
pub static STOCK_API_KEY: Lazy<Option<String>> = Lazy::new(|| env::var("STOCK_API_KEY").ok());

/// Chat (channel or group) that receives restock broadcasts
/// Read from BROADCAST_CHAT_ID environment variable; broadcasts are
/// disabled when unset or unparseable
pub static BROADCAST_CHAT_ID: Lazy<Option<i64>> =
    Lazy::new(|| env::var("BROADCAST_CHAT_ID").ok().and_then(|s| s.parse::<i64>().ok()));

/// Port for the liveness web server (hosting platform port check)
/// Read from PORT environment variable
/// Default: 10000
pub static HEALTH_PORT: Lazy<u16> = Lazy::new(|| {
    env::var("PORT")
        .ok()
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(10000)
});

/// Log file path
/// Read from LOG_FILE_PATH environment variable
/// Default: gardenwatch.log
pub static LOG_FILE_PATH: Lazy<String> =
    Lazy::new(|| env::var("LOG_FILE_PATH").unwrap_or_else(|_| "gardenwatch.log".to_string()));

/// Network configuration
pub mod network {
    use super::Duration;

    /// Timeout for a single upstream HTTP request (in seconds)
    /// Bounds the fetch step so the poll cadence stays predictable
    pub const REQUEST_TIMEOUT_SECS: u64 = 10;

    /// Immediate retries after a failed fetch (one retry, no backoff)
    pub const FETCH_RETRIES: u32 = 1;

    /// HTTP request timeout duration
    pub fn timeout() -> Duration {
        Duration::from_secs(REQUEST_TIMEOUT_SECS)
    }
}

/// Per-user command cooldown configuration
pub mod rate_limit {
    use super::{env, Duration, Lazy};

    /// Seconds between accepted commands per user
    /// Read from COOLDOWN_SECS environment variable
    /// Default: 10
    pub static COOLDOWN_SECS: Lazy<u64> = Lazy::new(|| {
        env::var("COOLDOWN_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(10)
    });

    /// Cooldown duration
    pub fn duration() -> Duration {
        Duration::from_secs(*COOLDOWN_SECS)
    }
}

/// Poll loop scheduling configuration
pub mod poll {
    use super::{env, Lazy};

    /// Schedule mode: "aligned" (default) snaps ticks to wall-clock
    /// multiples of the interval, "interval" sleeps a fixed amount
    /// Read from POLL_SCHEDULE environment variable
    pub static SCHEDULE: Lazy<String> =
        Lazy::new(|| env::var("POLL_SCHEDULE").unwrap_or_else(|_| "aligned".to_string()));

    /// Poll period in seconds; the upstream shop restocks every 5 minutes
    /// Read from POLL_INTERVAL_SECS environment variable
    /// Default: 300
    pub static INTERVAL_SECS: Lazy<u64> = Lazy::new(|| {
        env::var("POLL_INTERVAL_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(300)
    });

    /// Seconds past the aligned boundary before polling, so the upstream
    /// tracker has refreshed by the time we ask
    /// Read from POLL_ALIGN_OFFSET_SECS environment variable
    /// Default: 30
    pub static ALIGN_OFFSET_SECS: Lazy<u64> = Lazy::new(|| {
        env::var("POLL_ALIGN_OFFSET_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(30)
    });
}
