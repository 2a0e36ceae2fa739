//! Data models for CoinCap asset data.
//!
//! This module contains the data structures shared by the API client, the
//! cache store, and the repository:
//!
//! - `Asset`: a single cryptocurrency listing
//! - `AssetsResponse`, `AssetDetailResponse`: API response envelopes

pub mod asset;

pub use asset::{Asset, AssetDetailResponse, AssetsResponse};
