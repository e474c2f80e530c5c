//! Dataset store
//!
//! Loads the fixed collection of user records once at startup and hands out
//! a cheap, immutable, shared view of it. The store is never mutated after
//! loading; searches copy what they need.
//!
//! # File format
//!
//! ```json
//! {
//!   "rows": [
//!     {"id": 0, "first_name": "Boyd", "last_name": "Wolf", "age": 22,
//!      "about": "...", "gender": "male"}
//!   ]
//! }
//! ```
//!
//! # Examples
//!
//! ```no_run
//! use usersearch_core::dataset::Dataset;
//!
//! let dataset = Dataset::load_all("data/dataset.json").expect("dataset");
//! assert!(!dataset.is_empty());
//! ```

use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

use crate::error::{Result, SearchError};
use crate::types::UserRecord;

/// Row as stored in the dataset file
#[derive(Debug, Clone, Deserialize)]
struct RawUserRecord {
    id: u32,
    first_name: String,
    last_name: String,
    age: u32,
    about: String,
    gender: String,
}

impl From<RawUserRecord> for UserRecord {
    fn from(raw: RawUserRecord) -> Self {
        Self {
            id: raw.id,
            name: format!("{} {}", raw.first_name, raw.last_name),
            age: raw.age,
            about: raw.about,
            gender: raw.gender,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawDataset {
    #[serde(default)]
    rows: Vec<RawUserRecord>,
}

/// Ordered, immutable sequence of user records
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Arc<[UserRecord]>,
}

impl Dataset {
    /// Load every record from a JSON dataset file
    ///
    /// # Errors
    ///
    /// Returns `SearchError::Io` if the file cannot be read,
    /// `SearchError::Json` if it is malformed and `SearchError::Dataset` if
    /// it holds no records.
    pub fn load_all<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!("Reading dataset from {}", path.display());

        let content = std::fs::read_to_string(path)?;
        let dataset = Self::from_json(&content)?;

        info!(
            records = dataset.len(),
            "Loaded dataset from {}",
            path.display()
        );
        Ok(dataset)
    }

    /// Parse a dataset from its JSON text
    pub fn from_json(content: &str) -> Result<Self> {
        let raw: RawDataset = serde_json::from_str(content)?;
        Self::from_records(raw.rows.into_iter().map(UserRecord::from).collect())
    }

    /// Build a dataset from records already in memory
    ///
    /// # Errors
    ///
    /// Returns `SearchError::Dataset` if `records` is empty.
    pub fn from_records(records: Vec<UserRecord>) -> Result<Self> {
        if records.is_empty() {
            return Err(SearchError::dataset("dataset contains no records"));
        }
        Ok(Self {
            records: records.into(),
        })
    }

    /// All records in load order
    pub fn records(&self) -> &[UserRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
