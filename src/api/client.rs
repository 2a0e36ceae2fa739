//! API client for communicating with the CoinCap REST API.
//!
//! This module provides the `ApiClient` struct for making authenticated
//! requests against the versioned CoinCap endpoints.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{header, Client};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::models::{AssetDetailResponse, AssetsResponse};

use super::{ApiError, AssetSource};

// ============================================================================
// Constants
// ============================================================================

/// Base URL for the CoinCap REST API, versioned base path.
pub const API_BASE_URL: &str = "https://rest.coincap.io/v3";

/// HTTP request timeout in seconds.
/// 30s allows for slow API responses while failing fast enough for good UX.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Connection timeout in seconds, bounded separately from the full request.
const CONNECT_TIMEOUT_SECS: u64 = 30;

/// Maximum number of retries for rate-limited (429) requests.
/// 3 retries with exponential backoff usually succeeds without excessive delay.
const MAX_RATE_LIMIT_RETRIES: u32 = 3;

/// Initial backoff delay in milliseconds for rate limiting.
const INITIAL_BACKOFF_MS: u64 = 1000;

/// API client for CoinCap.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl ApiClient {
    /// Create a new API client against the default CoinCap base URL.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_base_url(api_key, API_BASE_URL)
    }

    /// Create a client against a non-default base URL (staging, local stub).
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()?;

        let base_url: String = base_url.into();
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    fn auth_headers(&self) -> Result<header::HeaderMap> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&format!("Bearer {}", self.api_key))?,
        );
        Ok(headers)
    }

    /// Check if response is successful, returning an error with body if not.
    /// Returns Ok(Some(response)) for success, Ok(None) for rate limit (should
    /// retry), or Err for other errors.
    async fn check_response_for_retry(
        response: reqwest::Response,
    ) -> Result<Option<reqwest::Response>> {
        if response.status().is_success() {
            Ok(Some(response))
        } else if response.status().as_u16() == 429 {
            // Rate limited - signal to retry
            Ok(None)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body).into())
        }
    }

    async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let mut retries = 0;
        let mut backoff_ms = INITIAL_BACKOFF_MS;

        loop {
            let response = self
                .client
                .get(url)
                .headers(self.auth_headers()?)
                .send()
                .await
                .map_err(ApiError::from)
                .with_context(|| format!("Failed to send GET request to {}", url))?;

            match Self::check_response_for_retry(response).await? {
                Some(response) => {
                    return response
                        .json()
                        .await
                        .with_context(|| format!("Failed to parse JSON response from {}", url));
                }
                None => {
                    retries += 1;
                    if retries > MAX_RATE_LIMIT_RETRIES {
                        return Err(ApiError::RateLimited.into());
                    }
                    warn!(url, retry = retries, backoff_ms, "Rate limited, backing off");
                    tokio::time::sleep(Duration::from_millis(backoff_ms)).await;
                    backoff_ms *= 2; // Exponential backoff
                }
            }
        }
    }

    /// Fetch the full asset listing, in the order the API returns it.
    pub async fn fetch_assets(&self) -> Result<AssetsResponse> {
        let url = format!("{}/assets", self.base_url);
        let response: AssetsResponse = self.get(&url).await?;
        debug!(count = response.data.len(), "Fetched asset list");
        Ok(response)
    }

    /// Fetch a single asset by identifier. An unknown id surfaces as an error
    /// (404 from the API), never an empty payload.
    pub async fn fetch_asset_detail(&self, id: &str) -> Result<AssetDetailResponse> {
        let url = format!("{}/assets/{}", self.base_url, id);
        self.get(&url).await
    }

    /// Release transport resources. Idempotent; dropping the last clone closes
    /// the underlying connection pool, so this only logs the intent.
    pub fn shutdown(&self) {
        debug!("API client shut down");
    }
}

#[async_trait]
impl AssetSource for ApiClient {
    async fn fetch_assets(&self) -> Result<AssetsResponse> {
        ApiClient::fetch_assets(self).await
    }

    async fn fetch_asset_detail(&self, id: &str) -> Result<AssetDetailResponse> {
        ApiClient::fetch_asset_detail(self, id).await
    }

    fn shutdown(&self) {
        ApiClient::shutdown(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_trailing_slash_from_base_url() {
        let client =
            ApiClient::with_base_url("key", "https://rest.coincap.io/v3/").expect("build client");
        assert_eq!(client.base_url, "https://rest.coincap.io/v3");
    }

    #[tokio::test]
    async fn transport_faults_surface_as_network_errors() {
        // Nothing listens on this port; the connection is refused locally
        // without touching the real network.
        let client = ApiClient::with_base_url("key", "http://127.0.0.1:1").expect("build client");
        let err = client.fetch_assets().await.expect_err("must fail");
        assert!(matches!(
            err.downcast_ref::<ApiError>(),
            Some(ApiError::Network(_))
        ));
    }

    #[test]
    fn builds_bearer_auth_header() {
        let client = ApiClient::new("s3cr3t").expect("build client");
        let headers = client.auth_headers().expect("headers");
        assert_eq!(
            headers.get(header::AUTHORIZATION).and_then(|v| v.to_str().ok()),
            Some("Bearer s3cr3t")
        );
    }
}
