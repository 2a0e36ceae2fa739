use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::Asset;

/// File name for the snapshot slot (asset list + write timestamp).
const SNAPSHOT_FILE: &str = "assets.json";

/// File name for persisted settings (the offline-mode flag).
const SETTINGS_FILE: &str = "settings.json";

/// The single cached copy of the most recent successful asset list fetch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedSnapshot {
    pub assets: Vec<Asset>,
    /// Epoch milliseconds at which the snapshot was written.
    pub cached_at: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct Settings {
    #[serde(default)]
    offline_mode: bool,
}

/// Durable key-value store backing the repository.
///
/// Two logical slots: a JSON-serialized snapshot of the asset list with its
/// timestamp, and a boolean offline-mode flag. Writes go to a temp sibling and
/// are renamed into place, so a reader never observes a half-written file.
/// The flag lives in its own file so toggling it never races the snapshot blob.
pub struct CacheStore {
    dir: PathBuf,
}

impl CacheStore {
    /// Open a store rooted at the given directory, creating it if needed.
    /// The directory is always passed in explicitly; there is no ambient
    /// default here (see `Config::cache_dir` for the conventional location).
    pub fn new(dir: PathBuf) -> Result<Self> {
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create cache directory {}", dir.display()))?;
        Ok(Self { dir })
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    /// Serialize and atomically replace a slot file.
    async fn write_json<T: Serialize>(&self, name: &str, value: &T) -> Result<()> {
        let path = self.path(name);
        let tmp = self.dir.join(format!("{}.tmp", name));
        let contents = serde_json::to_string(value)
            .with_context(|| format!("Failed to serialize {}", name))?;
        tokio::fs::write(&tmp, contents)
            .await
            .with_context(|| format!("Failed to write {}", tmp.display()))?;
        tokio::fs::rename(&tmp, &path)
            .await
            .with_context(|| format!("Failed to replace {}", path.display()))?;
        Ok(())
    }

    /// Read and deserialize a slot file; a missing file is a cold start, not
    /// an error.
    async fn read_json<T: for<'de> Deserialize<'de>>(&self, name: &str) -> Result<Option<T>> {
        let path = self.path(name);
        let contents = match tokio::fs::read_to_string(&path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to read {}", path.display()))
            }
        };
        let value = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse cache file {}", name))?;
        Ok(Some(value))
    }

    /// Atomically replace the snapshot with the given records and timestamp.
    pub async fn write_snapshot(&self, assets: &[Asset], cached_at: i64) -> Result<()> {
        let snapshot = CachedSnapshot {
            assets: assets.to_vec(),
            cached_at,
        };
        self.write_json(SNAPSHOT_FILE, &snapshot).await?;
        debug!(count = assets.len(), cached_at, "Snapshot written");
        Ok(())
    }

    /// Read the snapshot; `None` if never written or cleared.
    pub async fn read_snapshot(&self) -> Result<Option<CachedSnapshot>> {
        self.read_json(SNAPSHOT_FILE).await
    }

    /// Read the snapshot's timestamp without touching the record list.
    pub async fn read_timestamp(&self) -> Result<Option<i64>> {
        Ok(self.read_snapshot().await?.map(|s| s.cached_at))
    }

    /// Read the persisted offline-mode flag; false if never set.
    pub async fn read_offline_flag(&self) -> Result<bool> {
        let settings: Option<Settings> = self.read_json(SETTINGS_FILE).await?;
        Ok(settings.map(|s| s.offline_mode).unwrap_or(false))
    }

    /// Persist the offline-mode flag.
    pub async fn write_offline_flag(&self, enabled: bool) -> Result<()> {
        self.write_json(SETTINGS_FILE, &Settings { offline_mode: enabled })
            .await
    }

    /// Erase the snapshot and settings together. Idempotent.
    pub async fn clear_all(&self) -> Result<()> {
        for name in [SNAPSHOT_FILE, SETTINGS_FILE] {
            match tokio::fs::remove_file(self.path(name)).await {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => {
                    return Err(e).with_context(|| format!("Failed to remove cache file {}", name))
                }
            }
        }
        debug!("Cache cleared");
        Ok(())
    }
}
