//! JSON-backed result journal.
//!
//! Append-only store of finalized test results keyed by an auto-increment
//! id, with the simple equality/range queries the history and statistics
//! views read.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use mindgauge_ai::testing::ResultSink;
use mindgauge_common::{StoreError, TestResult, TestType};

/// A persisted result with its journal id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredResult {
    pub id: u64,
    #[serde(flatten)]
    pub result: TestResult,
}

/// File-backed `ResultSink` plus query surface.
pub struct JsonResultStore {
    path: PathBuf,
}

impl JsonResultStore {
    /// Store at the platform default path
    /// (`~/.local/share/mindgauge/results.json` on Linux).
    pub fn open_default() -> Result<Self, StoreError> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| StoreError::Path("could not determine data directory".into()))?;
        Ok(Self::open(data_dir.join("mindgauge").join("results.json")))
    }

    /// Store at an explicit path. The file is created on first save.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All results, newest first.
    pub fn all(&self) -> Result<Vec<StoredResult>, StoreError> {
        let mut records = self.load()?;
        records.sort_by(|a, b| b.result.created_at.cmp(&a.result.created_at));
        Ok(records)
    }

    /// Results of one test flavor, newest first.
    pub fn by_type(&self, test_type: TestType) -> Result<Vec<StoredResult>, StoreError> {
        let mut records = self.all()?;
        records.retain(|r| r.result.test_type == test_type);
        Ok(records)
    }

    pub fn by_id(&self, id: u64) -> Result<Option<StoredResult>, StoreError> {
        Ok(self.load()?.into_iter().find(|r| r.id == id))
    }

    /// Results created within `[from, to)`, oldest first.
    pub fn in_range(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<StoredResult>, StoreError> {
        let mut records = self.load()?;
        records.retain(|r| r.result.created_at >= from && r.result.created_at < to);
        records.sort_by(|a, b| a.result.created_at.cmp(&b.result.created_at));
        Ok(records)
    }

    /// Delete one record. Returns whether it existed.
    pub fn delete(&self, id: u64) -> Result<bool, StoreError> {
        let mut records = self.load()?;
        let before = records.len();
        records.retain(|r| r.id != id);
        let removed = records.len() != before;
        if removed {
            self.persist(&records)?;
        }
        Ok(removed)
    }

    fn load(&self) -> Result<Vec<StoredResult>, StoreError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        serde_json::from_str(&content)
            .map_err(|e| StoreError::Serialization(format!("{}: {e}", self.path.display())))
    }

    fn persist(&self, records: &[StoredResult]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(records)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;

        let tmp_path = self.path.with_extension("json.tmp");
        std::fs::write(&tmp_path, &content)?;
        if std::fs::rename(&tmp_path, &self.path).is_err() {
            std::fs::write(&self.path, &content)?;
        }
        Ok(())
    }
}

impl ResultSink for JsonResultStore {
    fn save(&self, result: &TestResult) -> Result<u64, StoreError> {
        let mut records = self.load()?;
        let id = records.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        records.push(StoredResult {
            id,
            result: result.clone(),
        });
        self.persist(&records)?;
        Ok(id)
    }
}
