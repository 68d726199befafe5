use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::{RecommendError, Result};
use crate::models::{PreferenceRecord, RestaurantRecord};

/// Read-only source of past preference submissions. Implementations must
/// return a full snapshot; scoring never begins on a partial read.
pub trait PreferenceHistory: Send + Sync {
    fn all(&self) -> Result<Vec<PreferenceRecord>>;
}

/// Read-only source of restaurant records.
pub trait RestaurantCatalog: Send + Sync {
    fn all(&self) -> Result<Vec<RestaurantRecord>>;
}

/// History snapshot held in memory, typically loaded once at startup.
#[derive(Debug, Clone, Default)]
pub struct InMemoryHistory {
    records: Vec<PreferenceRecord>,
}

impl InMemoryHistory {
    pub fn new(records: Vec<PreferenceRecord>) -> Self {
        Self { records }
    }

    /// Load a JSON array of preference records.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(RecommendError::DataFileNotFound(path.display().to_string()));
        }

        let raw = fs::read_to_string(path)?;
        let records: Vec<PreferenceRecord> = serde_json::from_str(&raw)?;
        info!(count = records.len(), path = %path.display(), "Loaded preference history");

        Ok(Self::new(records))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl PreferenceHistory for InMemoryHistory {
    fn all(&self) -> Result<Vec<PreferenceRecord>> {
        Ok(self.records.clone())
    }
}

/// Catalog snapshot held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    records: Vec<RestaurantRecord>,
}

impl InMemoryCatalog {
    pub fn new(records: Vec<RestaurantRecord>) -> Self {
        Self { records }
    }

    /// Load a JSON array of restaurant records.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(RecommendError::DataFileNotFound(path.display().to_string()));
        }

        let raw = fs::read_to_string(path)?;
        let records: Vec<RestaurantRecord> = serde_json::from_str(&raw)?;
        info!(count = records.len(), path = %path.display(), "Loaded restaurant catalog");

        Ok(Self::new(records))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl RestaurantCatalog for InMemoryCatalog {
    fn all(&self) -> Result<Vec<RestaurantRecord>> {
        Ok(self.records.clone())
    }
}
