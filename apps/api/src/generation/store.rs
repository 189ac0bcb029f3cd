//! Short-lived store of generated resume PDFs awaiting download.
//!
//! Holds at most `capacity` documents; inserting beyond that evicts the oldest.
//! Each entry owns its `TempPath`, so eviction, `clear`, or dropping the last
//! handle deletes the file.

use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::Arc;

use tempfile::TempPath;
use tokio::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

#[derive(Clone)]
pub struct DocumentStore {
    entries: Arc<Mutex<VecDeque<(Uuid, TempPath)>>>,
    capacity: usize,
}

impl DocumentStore {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Arc::new(Mutex::new(VecDeque::with_capacity(capacity))),
            capacity: capacity.max(1),
        }
    }

    /// Adds a document, evicting (and deleting) the oldest ones past capacity.
    /// Returns how many documents are stored afterwards.
    pub async fn insert(&self, id: Uuid, path: TempPath) -> usize {
        let mut entries = self.entries.lock().await;
        entries.push_back((id, path));
        while entries.len() > self.capacity {
            if let Some((evicted_id, evicted)) = entries.pop_front() {
                debug!(%evicted_id, path = %evicted.display(), "Evicting stored resume document");
            }
        }
        entries.len()
    }

    /// Path of a stored document, if it has not been evicted.
    pub async fn path_of(&self, id: Uuid) -> Option<PathBuf> {
        let entries = self.entries.lock().await;
        entries
            .iter()
            .find(|(entry_id, _)| *entry_id == id)
            .map(|(_, path)| path.to_path_buf())
    }

    /// Removes every stored document, deleting the files. Returns how many were removed.
    pub async fn clear(&self) -> usize {
        let mut entries = self.entries.lock().await;
        let removed = entries.len();
        entries.clear();
        removed
    }
}
