//! Core utilities: configuration, errors, logging, rate limiting, retry
//! and the liveness web server.

pub mod config;
pub mod error;
pub mod logging;
pub mod rate_limiter;
pub mod retry;
pub mod utils;
pub mod web_server;

pub use error::{AppError, AppResult};
pub use logging::{init_logger, log_startup_summary};
pub use rate_limiter::RateLimiter;
pub use utils::escape_markdown_v2;
