use std::path::{Path, PathBuf};

use fortnite_tools::ShopSnapshot;
use log::*;

use crate::traits::{SnapshotStore, SnapshotStoreError};

pub const DEFAULT_SNAPSHOT_PATH: &str = "data/shop_cache.json";

/// One JSON document at a fixed path. Writes go through a temp file and a rename so a concurrent
/// reader never observes a torn document.
#[derive(Debug, Clone)]
pub struct FileSnapshotStore {
    path: PathBuf,
}

impl FileSnapshotStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotStore for FileSnapshotStore {
    fn load(&self) -> Option<ShopSnapshot> {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                warn!("Could not read shop snapshot {}: {e}. Treating as absent", self.path.display());
                return None;
            },
        };
        match serde_json::from_slice::<ShopSnapshot>(&bytes) {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                warn!("Shop snapshot {} is corrupt: {e}. Treating as absent", self.path.display());
                None
            },
        }
    }

    fn save(&self, snapshot: &ShopSnapshot) -> Result<(), SnapshotStoreError> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir).map_err(|e| SnapshotStoreError::WriteFailed(e.to_string()))?;
        }
        let body = serde_json::to_vec(snapshot).map_err(|e| SnapshotStoreError::WriteFailed(e.to_string()))?;
        let tmp = self.path.with_extension(format!("tmp-{}", rand::random::<u32>()));
        std::fs::write(&tmp, &body).map_err(|e| SnapshotStoreError::WriteFailed(e.to_string()))?;
        std::fs::rename(&tmp, &self.path).map_err(|e| {
            let _ = std::fs::remove_file(&tmp);
            SnapshotStoreError::WriteFailed(e.to_string())
        })?;
        trace!("Shop snapshot written to {}", self.path.display());
        Ok(())
    }
}
