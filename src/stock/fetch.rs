//! Upstream stock API client.
//!
//! Contract: a failed fetch (transport error, non-2xx status, malformed
//! body) surfaces as an `AppError`, never a panic. The poll loop skips
//! the cycle on error and user handlers reply with a short notice, so a
//! bad upstream can never crash the process.

use chrono::Utc;
use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::core::{config, AppError, AppResult};

use super::types::{
    RawStockRecord, RawWeatherRecord, StockCategory, StockItem, StockReport, WeatherReport,
};

/// HTTP client for the game-stock REST API.
///
/// One instance per process; cheap to share behind an `Arc`. Every
/// request is bounded by the configured timeout so the poll cadence
/// stays predictable.
pub struct StockClient {
    http: Client,
    base_url: String,
    weather_url: String,
    api_key: Option<String>,
}

impl StockClient {
    /// Builds a client from the environment-backed config.
    pub fn from_env() -> AppResult<Self> {
        Self::new(
            config::STOCK_API_URL.clone(),
            config::STOCK_WEATHER_URL.clone(),
            config::STOCK_API_KEY.clone(),
        )
    }

    /// Builds a client against explicit endpoints (tests, staging).
    pub fn new(
        base_url: impl Into<String>,
        weather_url: impl Into<String>,
        api_key: Option<String>,
    ) -> AppResult<Self> {
        let base_url = base_url.into();
        if base_url.trim().is_empty() {
            return Err(AppError::Validation("stock API URL is empty".to_string()));
        }
        let http = Client::builder().timeout(config::network::timeout()).build()?;
        Ok(Self {
            http,
            base_url,
            weather_url: weather_url.into(),
            api_key,
        })
    }

    /// One GET with auth headers, status check and typed decode.
    async fn get_json<T: DeserializeOwned>(&self, url: &str, params: &[(&str, &str)]) -> AppResult<T> {
        let mut request = self.http.get(url).query(params);
        if let Some(key) = &self.api_key {
            request = request.header("apikey", key).bearer_auth(key);
        }
        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(AppError::HttpStatus(response.status()));
        }
        Ok(response.json::<T>().await?)
    }

    /// Fetches one category, with a single immediate retry on failure.
    pub async fn fetch_category(&self, category: StockCategory) -> AppResult<Vec<StockItem>> {
        let type_filter = format!("eq.{}", category.slug());
        let params = [
            ("select", "*"),
            ("type", type_filter.as_str()),
            ("active", "eq.true"),
            ("order", "created_at.desc"),
        ];

        let mut attempt = 0;
        loop {
            match self.get_json::<Vec<RawStockRecord>>(&self.base_url, &params).await {
                Ok(rows) => {
                    return Ok(rows.into_iter().filter_map(RawStockRecord::into_item).collect());
                }
                Err(e) if attempt < config::network::FETCH_RETRIES => {
                    attempt += 1;
                    log::warn!(
                        "Fetch {} failed (attempt {}): {}, retrying",
                        category.slug(),
                        attempt,
                        e
                    );
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Fetches the given categories into one report.
    ///
    /// Sequential, all-or-nothing: any category failure fails the whole
    /// report, so a partial result can never replace the previous
    /// snapshot in the poll loop.
    pub async fn fetch_categories(&self, categories: &[StockCategory]) -> AppResult<StockReport> {
        let mut fetched = Vec::with_capacity(categories.len());
        for &category in categories {
            let items = self.fetch_category(category).await?;
            fetched.push((category, items));
        }
        Ok(StockReport {
            fetched_at: Utc::now(),
            categories: fetched,
        })
    }

    /// Fetches every category.
    pub async fn fetch_report(&self) -> AppResult<StockReport> {
        self.fetch_categories(&StockCategory::ALL).await
    }

    /// Fetches the current weather listing. Inactive rows are kept so the
    /// formatter decides what to show.
    pub async fn fetch_weather(&self) -> AppResult<WeatherReport> {
        let params = [("select", "*"), ("order", "weather_name.asc")];
        let rows: Vec<RawWeatherRecord> = self.get_json(&self.weather_url, &params).await?;
        Ok(WeatherReport {
            events: rows.into_iter().filter_map(RawWeatherRecord::into_event).collect(),
        })
    }
}
