//! Calculation history
//!
//! Records are scoped to a user id; lookups, deletes and clears never touch
//! another user's records. Two stores are provided: [`MemoryHistory`] for
//! tests and embedding, and [`FileHistory`] which persists to a JSON file in
//! the data directory.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A stored calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub id: u64,
    pub user: String,
    /// What the user typed in AI mode, otherwise the sanitized expression
    pub expression: String,
    pub result: f64,
    pub steps: Vec<String>,
    #[serde(default)]
    pub ai_mode: bool,
    /// Unix seconds
    pub created_at: u64,
}

/// A calculation waiting to be stored
#[derive(Debug, Clone, PartialEq)]
pub struct NewRecord {
    pub user: String,
    pub expression: String,
    pub result: f64,
    pub steps: Vec<String>,
    pub ai_mode: bool,
}

/// Storage backend for history records
pub trait HistoryStore {
    /// Store a record and return it with its assigned id and timestamp
    fn insert(&mut self, record: NewRecord) -> Result<HistoryRecord>;

    /// Most recent records for `user`, newest first
    fn recent(&self, user: &str, limit: usize) -> Result<Vec<HistoryRecord>>;

    /// Delete one of `user`'s records. Returns false if no such record exists.
    fn delete(&mut self, user: &str, id: u64) -> Result<bool>;

    /// Delete all of `user`'s records, returning how many were removed
    fn clear(&mut self, user: &str) -> Result<usize>;
}

fn now_secs() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// In-memory record list shared by both stores
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
struct Records {
    next_id: u64,
    records: Vec<HistoryRecord>,
}

impl Records {
    fn insert(&mut self, record: NewRecord) -> HistoryRecord {
        self.next_id += 1;
        let stored = HistoryRecord {
            id: self.next_id,
            user: record.user,
            expression: record.expression,
            result: record.result,
            steps: record.steps,
            ai_mode: record.ai_mode,
            created_at: now_secs(),
        };
        self.records.push(stored.clone());
        stored
    }

    fn recent(&self, user: &str, limit: usize) -> Vec<HistoryRecord> {
        // Insertion order is creation order, so newest-first is a reverse walk
        self.records
            .iter()
            .rev()
            .filter(|r| r.user == user)
            .take(limit)
            .cloned()
            .collect()
    }

    fn delete(&mut self, user: &str, id: u64) -> bool {
        let before = self.records.len();
        self.records.retain(|r| !(r.id == id && r.user == user));
        self.records.len() != before
    }

    fn clear(&mut self, user: &str) -> usize {
        let before = self.records.len();
        self.records.retain(|r| r.user != user);
        before - self.records.len()
    }
}

/// Non-persistent store
#[derive(Debug, Clone, Default)]
pub struct MemoryHistory {
    inner: Records,
}

impl MemoryHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.inner.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.records.is_empty()
    }
}

impl HistoryStore for MemoryHistory {
    fn insert(&mut self, record: NewRecord) -> Result<HistoryRecord> {
        Ok(self.inner.insert(record))
    }

    fn recent(&self, user: &str, limit: usize) -> Result<Vec<HistoryRecord>> {
        Ok(self.inner.recent(user, limit))
    }

    fn delete(&mut self, user: &str, id: u64) -> Result<bool> {
        Ok(self.inner.delete(user, id))
    }

    fn clear(&mut self, user: &str) -> Result<usize> {
        Ok(self.inner.clear(user))
    }
}

/// JSON file store. The whole file is rewritten after every change.
#[derive(Debug)]
pub struct FileHistory {
    path: PathBuf,
    inner: Records,
}

impl FileHistory {
    /// Open the store at `path`, starting empty if the file does not exist
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let inner = if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read history from {:?}", path))?;
            serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse history from {:?}", path))?
        } else {
            Records::default()
        };

        tracing::info!("Loaded {} history records from {:?}", inner.records.len(), path);
        Ok(Self { path, inner })
    }

    fn persist(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(&self.inner)?;
        std::fs::write(&self.path, contents)
            .with_context(|| format!("Failed to write history to {:?}", self.path))?;
        Ok(())
    }
}

impl HistoryStore for FileHistory {
    fn insert(&mut self, record: NewRecord) -> Result<HistoryRecord> {
        let stored = self.inner.insert(record);
        self.persist()?;
        tracing::debug!("Saved history record {}", stored.id);
        Ok(stored)
    }

    fn recent(&self, user: &str, limit: usize) -> Result<Vec<HistoryRecord>> {
        Ok(self.inner.recent(user, limit))
    }

    fn delete(&mut self, user: &str, id: u64) -> Result<bool> {
        let deleted = self.inner.delete(user, id);
        if deleted {
            self.persist()?;
            tracing::info!("Deleted history record {}", id);
        }
        Ok(deleted)
    }

    fn clear(&mut self, user: &str) -> Result<usize> {
        let removed = self.inner.clear(user);
        if removed > 0 {
            self.persist()?;
        }
        tracing::info!("Cleared {} history records for {}", removed, user);
        Ok(removed)
    }
}
