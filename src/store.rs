//! Configuration persistence hooks.
//!
//! The core exposes load/save through the [`ConfigStore`] trait and leaves
//! the actual storage to the host. [`FileStore`] is the native host
//! implementation: one JSON document on disk, shaped exactly like the
//! serialized [`HatConfig`]. A missing file is `Ok(None)`; a malformed one
//! surfaces as [`InvalidConfig`](crate::MillinerError::InvalidConfig) so
//! the caller can fall back to defaults.

use std::path::{Path, PathBuf};

use crate::config::HatConfig;
use crate::errors::Result;

/// Key-value persistence seam for the last-used configuration.
pub trait ConfigStore {
    /// Loads the persisted configuration, if any.
    fn load(&self) -> Result<Option<HatConfig>>;

    /// Persists the configuration.
    fn save(&self, config: &HatConfig) -> Result<()>;
}

/// JSON-file backed store.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default store location in the working directory.
    #[must_use]
    pub fn default_path() -> PathBuf {
        PathBuf::from("hat_config.json")
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigStore for FileStore {
    fn load(&self) -> Result<Option<HatConfig>> {
        let json = match std::fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let config = HatConfig::from_json(&json)?;
        log::debug!("loaded configuration from {}", self.path.display());
        Ok(Some(config))
    }

    fn save(&self, config: &HatConfig) -> Result<()> {
        std::fs::write(&self.path, config.to_json()?)?;
        log::debug!("saved configuration to {}", self.path.display());
        Ok(())
    }
}
