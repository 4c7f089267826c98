//! Record store
//!
//! Holds the saved records in memory, newest first, and mirrors the whole
//! sequence to a [`StorageBackend`] under [`STORAGE_KEY`] after every
//! mutation. The backend is read once, in [`RecordStore::open`].

use std::{fmt, str::FromStr};

use chrono::Utc;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    errors::{OptimizerError, Result},
    optimizer::Category,
};

pub mod backend;
pub mod record;
#[cfg(test)]
mod store_test;

pub use backend::{FileBackend, MemoryBackend, StorageBackend};
pub use record::Record;

/// Key the serialized record list lives under
pub const STORAGE_KEY: &str = "prompts";

/// What `open` does with a stored blob that does not parse
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CorruptStatePolicy {
    /// Fail with `DeserializationError`
    #[default]
    Surface,
    /// Log a warning and start empty; the blob is replaced on the next write
    Discard,
}

impl FromStr for CorruptStatePolicy {
    type Err = OptimizerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "surface" => Ok(CorruptStatePolicy::Surface),
            "discard" => Ok(CorruptStatePolicy::Discard),
            other => Err(OptimizerError::ConfigError(format!(
                "unknown corrupt state policy '{}', expected 'surface' or 'discard'",
                other
            ))),
        }
    }
}

pub struct RecordStore {
    backend: Box<dyn StorageBackend>,
    records: Vec<Record>,
}

impl fmt::Debug for RecordStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordStore")
            .field("records", &self.records.len())
            .finish_non_exhaustive()
    }
}

impl RecordStore {
    /// Load the stored records from `backend`
    pub fn open(backend: Box<dyn StorageBackend>, policy: CorruptStatePolicy) -> Result<Self> {
        let records = match backend.load(STORAGE_KEY)? {
            None => Vec::new(),
            Some(blob) => match serde_json::from_str::<Vec<Record>>(&blob) {
                Ok(records) => records,
                Err(err) => match policy {
                    CorruptStatePolicy::Surface => {
                        return Err(OptimizerError::DeserializationError(err.to_string()));
                    },
                    CorruptStatePolicy::Discard => {
                        warn!("discarding unreadable stored records: {}", err);
                        Vec::new()
                    },
                },
            },
        };

        info!("opened record store (records={})", records.len());
        Ok(Self { backend, records })
    }

    /// Store backed by a fresh in-memory map
    pub fn in_memory() -> Self {
        Self {
            backend: Box::new(MemoryBackend::new()),
            records: Vec::new(),
        }
    }

    /// Save a new record at the front of the sequence
    pub fn create(
        &mut self,
        original: String,
        optimized: String,
        category: Category,
        tags: Vec<String>,
    ) -> Result<Record> {
        let record = Record {
            id: self.fresh_id(),
            original,
            optimized,
            category,
            tags,
            created_at: Utc::now(),
            rating: None,
        };

        self.records.insert(0, record.clone());
        if let Err(err) = self.persist() {
            self.records.remove(0);
            return Err(err);
        }

        debug!(
            "created record (id={}, category={}, total={})",
            record.id,
            record.category,
            self.records.len()
        );
        Ok(record)
    }

    /// All records, newest first
    pub fn list(&self) -> &[Record] {
        &self.records
    }

    pub fn get(&self, id: &str) -> Option<&Record> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Remove the record with `id`; absent ids are ignored
    pub fn delete(&mut self, id: &str) -> Result<()> {
        let Some(index) = self.position(id) else {
            debug!("delete ignored, no record with id={}", id);
            return Ok(());
        };

        let removed = self.records.remove(index);
        if let Err(err) = self.persist() {
            self.records.insert(index, removed);
            return Err(err);
        }

        debug!("deleted record (id={}, remaining={})", id, self.records.len());
        Ok(())
    }

    /// Set the rating of the record with `id`; absent ids are ignored
    ///
    /// The value is stored as given. Range checks belong to the caller.
    pub fn update_rating(&mut self, id: &str, rating: u8) -> Result<()> {
        let Some(index) = self.position(id) else {
            debug!("rating ignored, no record with id={}", id);
            return Ok(());
        };

        let previous = self.records[index].rating.replace(rating);
        if let Err(err) = self.persist() {
            self.records[index].rating = previous;
            return Err(err);
        }

        debug!("rated record (id={}, rating={})", id, rating);
        Ok(())
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.records.iter().position(|r| r.id == id)
    }

    fn fresh_id(&self) -> String {
        loop {
            let id = Uuid::new_v4().to_string();
            if self.get(&id).is_none() {
                return id;
            }
        }
    }

    /// Rewrite the whole blob
    fn persist(&self) -> Result<()> {
        let blob = serde_json::to_string(&self.records)?;
        self.backend.save(STORAGE_KEY, &blob)
    }
}
