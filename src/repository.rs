//! Repository coordinating the remote API and the local cache.
//!
//! This is where the offline/online decision lives. For every list request the
//! repository reads the persisted offline flag, then either serves the cached
//! snapshot or goes to the network, falling back to stale cached data whenever
//! a live fetch fails and any snapshot exists. Detail lookups always go to the
//! network and are never cached - an intentional asymmetry versus the list path.

use chrono::Utc;
use thiserror::Error;
use tracing::{debug, warn};

use crate::api::AssetSource;
use crate::cache::CacheStore;
use crate::models::Asset;

/// Terminal outcome of a repository operation. Loading is not represented
/// here; in-flight state belongs to the controller, not the data layer.
pub type FetchOutcome<T> = Result<T, FetchError>;

#[derive(Debug, Error)]
pub enum FetchError {
    /// The remote call failed (transport, timeout, non-success status,
    /// deserialization) and no cached data could stand in for it.
    #[error("network request failed: {0}")]
    Network(String),

    /// Cache-only read requested (offline mode or fallback) but the store
    /// holds no snapshot.
    #[error("no cached data available; enable online mode to fetch")]
    NoCachedData,

    /// An internal fault during orchestration (flag or cache reads). Never
    /// propagated as a panic or raw I/O error.
    #[error("unexpected error: {0}")]
    Unexpected(String),
}

/// A returned asset listing with its provenance.
#[derive(Debug, Clone)]
pub struct AssetListPage {
    /// Records in the order the origin produced them; never re-sorted here.
    pub assets: Vec<Asset>,
    /// True when the data came from the durable store rather than a live call.
    pub is_from_cache: bool,
    /// Server timestamp for a live fetch, stored write timestamp for a cached
    /// read.
    pub last_updated: Option<i64>,
}

/// Repository over an injected remote source and cache store. No ambient or
/// global state - both collaborators are passed in at construction.
pub struct AssetRepository<S: AssetSource> {
    source: S,
    store: CacheStore,
}

impl<S: AssetSource> AssetRepository<S> {
    pub fn new(source: S, store: CacheStore) -> Self {
        Self { source, store }
    }

    /// Fetch the asset listing per the offline/cache policy.
    ///
    /// `force_refresh` always attempts the network, even while offline mode is
    /// enabled, so a user-initiated refresh can still try a live fetch.
    /// Without it, offline mode fully short-circuits network access: presence
    /// of a snapshot is the only criterion, staleness is never evaluated.
    pub async fn get_assets(&self, force_refresh: bool) -> FetchOutcome<AssetListPage> {
        let offline = self
            .store
            .read_offline_flag()
            .await
            .map_err(|e| FetchError::Unexpected(format!("{e:#}")))?;

        if !force_refresh && offline {
            return match self.cached_page().await {
                Ok(Some(page)) => Ok(page),
                Ok(None) => Err(FetchError::NoCachedData),
                Err(e) => Err(FetchError::Unexpected(format!("{e:#}"))),
            };
        }

        match self.source.fetch_assets().await {
            Ok(response) => {
                // Stamp the snapshot with local time; the server timestamp is
                // what callers see for a live fetch.
                let cached_at = Utc::now().timestamp_millis();
                if let Err(e) = self.store.write_snapshot(&response.data, cached_at).await {
                    warn!(error = %e, "Failed to persist asset snapshot");
                }
                Ok(AssetListPage {
                    assets: response.data,
                    is_from_cache: false,
                    last_updated: Some(response.timestamp),
                })
            }
            Err(fetch_err) => {
                debug!(error = %fetch_err, "Live fetch failed, trying cache");
                match self.cached_page().await {
                    // Degrade silently to stale data whenever any cache exists.
                    Ok(Some(page)) => Ok(page),
                    _ => Err(FetchError::Network(format!("{fetch_err:#}"))),
                }
            }
        }
    }

    /// Fetch a single asset's detail. Always a live call; no offline fallback.
    pub async fn get_asset_detail(&self, id: &str) -> FetchOutcome<Asset> {
        match self.source.fetch_asset_detail(id).await {
            Ok(response) => Ok(response.data),
            Err(e) => Err(FetchError::Network(format!(
                "failed to fetch asset details: {e:#}"
            ))),
        }
    }

    /// Persist the offline-mode flag. Does not touch any in-memory list; the
    /// caller must re-fetch to see the mode change reflected.
    pub async fn set_offline_mode(&self, enabled: bool) -> FetchOutcome<()> {
        self.store
            .write_offline_flag(enabled)
            .await
            .map_err(|e| FetchError::Unexpected(format!("{e:#}")))
    }

    /// Read the persisted offline flag; false on cold start or a store fault.
    pub async fn is_offline_mode_enabled(&self) -> bool {
        match self.store.read_offline_flag().await {
            Ok(enabled) => enabled,
            Err(e) => {
                warn!(error = %e, "Failed to read offline flag");
                false
            }
        }
    }

    /// The stored snapshot's write timestamp, independent of list retrieval.
    pub async fn last_update_timestamp(&self) -> Option<i64> {
        match self.store.read_timestamp().await {
            Ok(ts) => ts,
            Err(e) => {
                warn!(error = %e, "Failed to read snapshot timestamp");
                None
            }
        }
    }

    /// Release the remote source's transport resources. Idempotent.
    pub fn shutdown(&self) {
        self.source.shutdown();
    }

    async fn cached_page(&self) -> anyhow::Result<Option<AssetListPage>> {
        Ok(self
            .store
            .read_snapshot()
            .await?
            .filter(|snapshot| !snapshot.assets.is_empty())
            .map(|snapshot| AssetListPage {
                assets: snapshot.assets,
                is_from_cache: true,
                last_updated: Some(snapshot.cached_at),
            }))
    }
}
