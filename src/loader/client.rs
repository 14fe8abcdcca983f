//! Journal API Client
//!
//! HTTP client for the journal backend's `GET /entries` endpoint.

use crate::history::Entry;
use crate::loader::EntrySource;
use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;

/// Journal API client
pub struct EntriesClient {
    client: Client,
    config: ClientConfig,
}

/// Configuration for the journal API client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the journal API (e.g., "http://127.0.0.1:5000")
    pub base_url: String,
    /// Request timeout in milliseconds
    pub request_timeout_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            request_timeout_ms: 10_000,
        }
    }
}

impl EntriesClient {
    /// Create a new client with the given configuration
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_millis(config.request_timeout_ms))
            .build()
            .map_err(ClientError::Request)?;

        Ok(Self { client, config })
    }

    /// Get the current configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn entries_url(&self) -> String {
        format!("{}/entries", self.config.base_url.trim_end_matches('/'))
    }

    /// Fetch the full entry history
    ///
    /// One request, no retries. Records that cannot be decoded are skipped.
    pub async fn fetch_entries(&self) -> Result<Vec<Entry>, ClientError> {
        let url = self.entries_url();
        tracing::debug!(%url, "Fetching journal entries");

        let response = self.client.get(&url).send().await.map_err(classify)?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(ClientError::ApiError {
                status: status.as_u16(),
                message: text,
            });
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))?;

        Entry::decode_list(body)
            .ok_or_else(|| ClientError::Decode("expected a JSON array of entries".to_string()))
    }
}

#[async_trait]
impl EntrySource for EntriesClient {
    fn name(&self) -> &str {
        &self.config.base_url
    }

    async fn fetch_entries(&self) -> Result<Vec<Entry>, ClientError> {
        EntriesClient::fetch_entries(self).await
    }
}

fn classify(e: reqwest::Error) -> ClientError {
    if e.is_timeout() {
        ClientError::Timeout
    } else if e.is_connect() {
        ClientError::Unavailable
    } else {
        ClientError::Request(e)
    }
}

/// Errors that can occur when loading entries
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Journal API unavailable")]
    Unavailable,

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("Request timeout")]
    Timeout,

    #[error("Invalid response body: {0}")]
    Decode(String),
}
