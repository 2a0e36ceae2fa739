//! coincache - an offline-first data layer for CoinCap asset data.
//!
//! This crate is the data-access core of a cryptocurrency asset browser. It
//! fetches asset listings and per-asset detail from the CoinCap REST API,
//! persists the last successful listing locally, and supports an explicit
//! offline mode that forces cache-only reads even when the network is up.
//! When a live fetch fails and any snapshot exists, stale data is served in
//! place of an error.
//!
//! The pieces compose bottom-up:
//!
//! - [`models`]: serde data models for the API wire format
//! - [`api`]: the reqwest-backed [`api::ApiClient`] and the [`api::AssetSource`]
//!   trait the repository depends on
//! - [`cache`]: the durable [`cache::CacheStore`] (snapshot + offline flag)
//! - [`repository`]: [`repository::AssetRepository`], the online/offline
//!   decision policy
//! - [`controller`]: [`controller::AssetController`], the observable state
//!   machine a presentation layer drives with intents
//!
//! Presentation is out of scope; a frontend constructs the stack and
//! subscribes to state:
//!
//! ```no_run
//! use coincache::api::ApiClient;
//! use coincache::cache::CacheStore;
//! use coincache::config::Config;
//! use coincache::controller::AssetController;
//! use coincache::repository::AssetRepository;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let config = Config::load()?;
//! let api_key = config.api_key().unwrap_or_default();
//! let client = ApiClient::new(api_key)?;
//! let store = CacheStore::new(config.cache_dir()?)?;
//!
//! let controller = AssetController::new(AssetRepository::new(client, store)).await;
//! let state = controller.state();
//! println!("{} assets (from cache: {})", state.assets.len(), state.is_from_cache);
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod cache;
pub mod config;
pub mod controller;
pub mod models;
pub mod repository;

pub use api::{ApiClient, ApiError, AssetSource};
pub use cache::{CacheStore, CachedSnapshot};
pub use config::Config;
pub use controller::{AssetController, UiState};
pub use models::{Asset, AssetDetailResponse, AssetsResponse};
pub use repository::{AssetListPage, AssetRepository, FetchError, FetchOutcome};
