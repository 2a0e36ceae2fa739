//! Application state management over the repository.
//!
//! `AssetController` owns the UI-facing state and drives it by invoking
//! repository operations in response to intents (load, load detail, toggle
//! offline mode, clear). State lives in a `tokio::sync::watch` channel so a
//! presentation layer can observe transitions without this crate knowing
//! anything about rendering.

use tokio::sync::watch;
use tracing::{debug, warn};

use crate::api::AssetSource;
use crate::models::Asset;
use crate::repository::AssetRepository;

/// The current UI-facing state. Cloned out of the watch channel on every
/// observation, so it stays cheap and plain.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    pub assets: Vec<Asset>,
    pub is_loading: bool,
    pub error: Option<String>,
    pub is_from_cache: bool,
    /// Epoch milliseconds of the data's origin (server time for live fetches,
    /// snapshot write time for cached reads).
    pub last_updated: Option<i64>,
    pub offline_mode: bool,
    pub selected: Option<Asset>,
}

pub struct AssetController<S: AssetSource> {
    repository: AssetRepository<S>,
    state: watch::Sender<UiState>,
}

impl<S: AssetSource> AssetController<S> {
    /// Build the controller, seed the offline flag from the store, and issue
    /// the initial load. The flag is treated as false until its read completes.
    pub async fn new(repository: AssetRepository<S>) -> Self {
        let (state, _) = watch::channel(UiState::default());
        let controller = Self { repository, state };

        let offline = controller.repository.is_offline_mode_enabled().await;
        controller.update(|s| s.offline_mode = offline);
        controller.load_assets(false).await;

        controller
    }

    /// Subscribe to state transitions.
    pub fn subscribe(&self) -> watch::Receiver<UiState> {
        self.state.subscribe()
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> UiState {
        self.state.borrow().clone()
    }

    fn update(&self, mutate: impl FnOnce(&mut UiState)) {
        self.state.send_modify(mutate);
    }

    /// Load the asset listing. Overlapping calls are last-write-wins on state.
    pub async fn load_assets(&self, force_refresh: bool) {
        self.update(|s| {
            s.is_loading = true;
            s.error = None;
        });

        match self.repository.get_assets(force_refresh).await {
            Ok(page) => {
                debug!(count = page.assets.len(), from_cache = page.is_from_cache, "Assets loaded");
                self.update(|s| {
                    s.assets = page.assets;
                    s.is_from_cache = page.is_from_cache;
                    s.last_updated = page.last_updated;
                    s.is_loading = false;
                    s.error = None;
                });
            }
            Err(e) => {
                warn!(error = %e, "Asset load failed");
                // Assets are left as they were; only the error surfaces.
                self.update(|s| {
                    s.is_loading = false;
                    s.error = Some(e.to_string());
                });
            }
        }
    }

    /// Load one asset's detail into `selected`.
    pub async fn load_asset_detail(&self, id: &str) {
        self.update(|s| s.is_loading = true);

        match self.repository.get_asset_detail(id).await {
            Ok(asset) => self.update(|s| {
                s.selected = Some(asset);
                s.is_loading = false;
                s.error = None;
            }),
            Err(e) => {
                warn!(error = %e, id, "Asset detail load failed");
                self.update(|s| {
                    s.is_loading = false;
                    s.error = Some(e.to_string());
                });
            }
        }
    }

    /// Flip and persist the offline flag, then reload.
    ///
    /// Turning offline mode OFF forces a live refresh; turning it ON does not,
    /// so the follow-up load runs through the cache/offline path.
    pub async fn toggle_offline_mode(&self) {
        let enabled = !self.state.borrow().offline_mode;

        if let Err(e) = self.repository.set_offline_mode(enabled).await {
            warn!(error = %e, "Failed to persist offline mode");
            self.update(|s| s.error = Some(e.to_string()));
            return;
        }
        self.update(|s| s.offline_mode = enabled);

        self.load_assets(!enabled).await;
    }

    /// Drop any surfaced error. Pure local reset, no repository call.
    pub fn clear_error(&self) {
        self.update(|s| s.error = None);
    }

    /// Drop the selected detail. Pure local reset, no repository call.
    pub fn clear_selected(&self) {
        self.update(|s| s.selected = None);
    }

    /// Release the repository's transport resources.
    pub fn shutdown(&self) {
        self.repository.shutdown();
    }
}
