//! Bounded, persistent history of past generations.
//!
//! The whole list is one JSON blob under one fixed key, most-recent-first,
//! capped at [`MAX_HISTORY_ITEMS`]. Storage trouble is logged and degraded:
//! an unreadable blob loads as an empty history, a failed write still
//! leaves the caller with a valid in-memory list for the session.

mod sqlite;

use std::sync::Arc;

use tracing::warn;

pub use sqlite::SqliteBackend;

use crate::models::HistoryRecord;
use crate::traits::HistoryBackend;

/// Storage key the serialized history lives under
const HISTORY_KEY: &str = "insta_recipe_history";

/// Insertion beyond this count drops the oldest records
const MAX_HISTORY_ITEMS: usize = 20;

pub struct HistoryStore {
    backend: Arc<dyn HistoryBackend>,
}

impl HistoryStore {
    pub fn new(backend: Arc<dyn HistoryBackend>) -> Self {
        Self { backend }
    }

    /// Read the persisted list; a missing key or undecodable blob is an
    /// empty history, never an error
    pub async fn load(&self) -> Vec<HistoryRecord> {
        let blob = match self.backend.read(HISTORY_KEY).await {
            Ok(Some(blob)) => blob,
            Ok(None) => return Vec::new(),
            Err(error) => {
                warn!("failed to read history: {error:#}");
                return Vec::new();
            }
        };

        match serde_json::from_str(&blob) {
            Ok(records) => records,
            Err(error) => {
                warn!("persisted history is not decodable, starting empty: {error}");
                Vec::new()
            }
        }
    }

    /// Prepend `record`, truncate to capacity, persist, and return the new
    /// list. The returned list is valid for this session even when the
    /// write fails.
    pub async fn append(&self, record: HistoryRecord) -> Vec<HistoryRecord> {
        let mut records = self.load().await;
        records.insert(0, record);
        records.truncate(MAX_HISTORY_ITEMS);

        match serde_json::to_string(&records) {
            Ok(blob) => {
                if let Err(error) = self.backend.write(HISTORY_KEY, &blob).await {
                    warn!("failed to persist history: {error:#}");
                }
            }
            Err(error) => warn!("failed to serialize history: {error}"),
        }

        records
    }

    /// Drop the persisted list; failures are logged, not returned
    pub async fn clear(&self) {
        if let Err(error) = self.backend.delete(HISTORY_KEY).await {
            warn!("failed to clear history: {error:#}");
        }
    }
}

impl Clone for HistoryStore {
    fn clone(&self) -> Self {
        Self {
            backend: self.backend.clone(),
        }
    }
}

/// In-memory backend for tests
#[cfg(test)]
pub struct MemoryBackend {
    entries: std::sync::Mutex<std::collections::HashMap<String, String>>,
}

#[cfg(test)]
impl MemoryBackend {
    pub fn new() -> Self {
        Self {
            entries: std::sync::Mutex::new(std::collections::HashMap::new()),
        }
    }
}

#[cfg(test)]
#[async_trait::async_trait]
impl HistoryBackend for MemoryBackend {
    async fn read(&self, key: &str) -> anyhow::Result<Option<String>> {
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    async fn write(&self, key: &str, value: &str) -> anyhow::Result<()> {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn delete(&self, key: &str) -> anyhow::Result<()> {
        self.entries.lock().unwrap().remove(key);
        Ok(())
    }
}
