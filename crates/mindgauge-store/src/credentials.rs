//! TOML-backed credential store.
//!
//! A small key-value file under the OS config directory. Persistence
//! failures are logged and swallowed, so a broken disk degrades the token
//! cache to in-memory operation instead of blocking the dialogue.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::warn;

use mindgauge_ai::auth::{CredentialKey, CredentialStore};
use mindgauge_common::StoreError;

/// File-backed `CredentialStore`.
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    /// Store at the platform default path
    /// (`~/.config/mindgauge/credentials.toml` on Linux).
    pub fn open_default() -> Result<Self, StoreError> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| StoreError::Path("could not determine config directory".into()))?;
        Ok(Self::open(config_dir.join("mindgauge").join("credentials.toml")))
    }

    /// Store at an explicit path. The file is created on first write.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> BTreeMap<String, String> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return BTreeMap::new(),
            Err(e) => {
                warn!("failed to read {}: {e}", self.path.display());
                return BTreeMap::new();
            }
        };
        match toml::from_str(&content) {
            Ok(values) => values,
            Err(e) => {
                warn!("failed to parse {}: {e}", self.path.display());
                BTreeMap::new()
            }
        }
    }

    /// Atomic write: write to `.tmp`, then rename.
    fn persist(&self, values: &BTreeMap<String, String>) {
        let content = match toml::to_string_pretty(values) {
            Ok(content) => content,
            Err(e) => {
                warn!("failed to serialize credentials: {e}");
                return;
            }
        };

        if let Some(parent) = self.path.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                warn!("failed to create {}: {e}", parent.display());
                return;
            }
        }

        let tmp_path = self.path.with_extension("toml.tmp");
        if let Err(e) = std::fs::write(&tmp_path, &content) {
            warn!("failed to write {}: {e}", tmp_path.display());
            return;
        }
        if let Err(e) = std::fs::rename(&tmp_path, &self.path) {
            warn!("atomic rename failed ({e}), falling back to direct write");
            if let Err(e2) = std::fs::write(&self.path, &content) {
                warn!("failed to write {}: {e2}", self.path.display());
            }
        }
    }
}

impl CredentialStore for FileCredentialStore {
    fn get(&self, key: CredentialKey) -> Option<String> {
        self.load().get(key.as_str()).cloned()
    }

    fn set(&self, key: CredentialKey, value: &str) {
        let mut values = self.load();
        values.insert(key.as_str().to_string(), value.to_string());
        self.persist(&values);
    }

    fn remove(&self, key: CredentialKey) {
        let mut values = self.load();
        if values.remove(key.as_str()).is_some() {
            self.persist(&values);
        }
    }
}
