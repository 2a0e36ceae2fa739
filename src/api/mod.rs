//! REST API client module for the CoinCap service.
//!
//! This module provides the `ApiClient` for fetching asset listings and
//! per-asset detail from the CoinCap v3 API, and the `AssetSource` trait the
//! repository depends on so tests can substitute a local source.
//!
//! The API uses bearer-token authorization; requests are bounded by 30-second
//! connect and request timeouts so callers are never blocked indefinitely.

pub mod client;
pub mod error;

use anyhow::Result;
use async_trait::async_trait;

use crate::models::{AssetDetailResponse, AssetsResponse};

pub use client::ApiClient;
pub use error::ApiError;

/// Remote source of asset data. Implemented by `ApiClient` for production and
/// by counting mocks in tests.
#[async_trait]
pub trait AssetSource: Send + Sync {
    /// Retrieve the full asset listing and the server timestamp.
    async fn fetch_assets(&self) -> Result<AssetsResponse>;

    /// Retrieve one asset by identifier; an unknown id is an error.
    async fn fetch_asset_detail(&self, id: &str) -> Result<AssetDetailResponse>;

    /// Release transport resources. Idempotent and safe to call even if the
    /// source was never used.
    fn shutdown(&self) {}
}
