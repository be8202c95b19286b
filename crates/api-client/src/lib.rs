use crate::error::ApiError;
use async_trait::async_trait;
use configuration::settings::ApiConfig;
use core_types::{SummaryStats, Trade};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

pub mod error;
pub mod responses;

// --- Public API ---
pub use responses::{ApiErrorResponse, RawSummaryStats, RawTrade};

/// The backend caps list responses; a short page marks the end.
const TRADES_PAGE_SIZE: usize = 200;

/// The generic, abstract interface for the journal's trade data source.
/// This trait is the contract the CLI consumes, allowing the underlying
/// implementation (live HTTP or an in-memory stub) to be swapped out.
#[async_trait]
pub trait JournalApi: Send + Sync {
    /// Fetches the full, chronologically ordered trade collection.
    async fn fetch_trades(&self) -> Result<Vec<Trade>, ApiError>;

    /// Fetches the backend's pre-aggregated summary counters.
    async fn fetch_summary_stats(&self) -> Result<SummaryStats, ApiError>;
}

/// A concrete `JournalApi` backed by the hosted journal backend's HTTP API.
#[derive(Clone)]
pub struct HttpJournalClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpJournalClient {
    pub fn new(api_config: &ApiConfig) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        if !api_config.api_key.is_empty() {
            let bearer = format!("Bearer {}", api_config.api_key);
            let value = HeaderValue::from_str(&bearer)
                .map_err(|e| ApiError::InvalidData(format!("Invalid API key: {e}")))?;
            headers.insert(AUTHORIZATION, value);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(api_config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: api_config.base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self.client.get(&url).query(query).send().await?;
        let status = response.status();
        let text = response.text().await?;

        if status.is_success() {
            serde_json::from_str::<T>(&text).map_err(|e| ApiError::Deserialization(e.to_string()))
        } else {
            let api_error: ApiErrorResponse = serde_json::from_str(&text).map_err(|e| {
                ApiError::Deserialization(format!(
                    "Failed to deserialize error response: {e}. Original text: {text}"
                ))
            })?;
            Err(ApiError::Api(api_error.message, api_error.code))
        }
    }
}

#[async_trait]
impl JournalApi for HttpJournalClient {
    async fn fetch_trades(&self) -> Result<Vec<Trade>, ApiError> {
        let mut trades = Vec::new();
        let mut page = 1u32;

        loop {
            let batch: Vec<RawTrade> = self
                .get_json(
                    "/api/v1/trades",
                    &[
                        ("page", page.to_string()),
                        ("perPage", TRADES_PAGE_SIZE.to_string()),
                    ],
                )
                .await?;
            let batch_len = batch.len();
            debug!(page, batch_len, "fetched trades page");

            for raw in batch {
                trades.push(Trade::try_from(raw)?);
            }

            if batch_len < TRADES_PAGE_SIZE {
                break;
            }
            page += 1;
        }

        Ok(trades)
    }

    async fn fetch_summary_stats(&self) -> Result<SummaryStats, ApiError> {
        let raw: RawSummaryStats = self.get_json("/api/v1/stats", &[]).await?;
        Ok(raw.into())
    }
}
