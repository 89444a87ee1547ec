//! Bounded provenance history of fetch attempts.
//!
//! Each menu record keeps the most recent attempts, newest first. Inserting
//! into a full history evicts the oldest entry. Entries are values: once an
//! attempt is recorded it is never edited.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Default number of attempts retained per record.
pub const DEFAULT_HISTORY_CAPACITY: usize = 10;

/// Upper bound on attempts retained per record, whatever the configured capacity.
pub const MAX_HISTORY_CAPACITY: usize = 10;

fn bounded(capacity: usize) -> usize {
    capacity.clamp(1, MAX_HISTORY_CAPACITY)
}

/// One fetch attempt (or manual seeding) behind a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttemptRecord {
    pub timestamp: DateTime<Utc>,
    pub source: String,
    pub success: bool,
    pub items_found: usize,
    pub processing_time_ms: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AttemptRecord {
    pub fn success(source: impl Into<String>, items_found: usize, processing_time_ms: u64) -> Self {
        Self {
            timestamp: Utc::now(),
            source: source.into(),
            success: true,
            items_found,
            processing_time_ms,
            error: None,
        }
    }

    pub fn failure(source: impl Into<String>, error: impl Into<String>, processing_time_ms: u64) -> Self {
        Self {
            timestamp: Utc::now(),
            source: source.into(),
            success: false,
            items_found: 0,
            processing_time_ms,
            error: Some(error.into()),
        }
    }

    /// Override the attempt timestamp.
    pub fn at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }
}

/// Return a new history with `entry` first, keeping at most `cap` entries
/// (never more than [`MAX_HISTORY_CAPACITY`]).
pub fn prepend(history: &[AttemptRecord], entry: AttemptRecord, cap: usize) -> Vec<AttemptRecord> {
    let cap = bounded(cap);
    let mut next = Vec::with_capacity(cap.min(history.len() + 1));
    next.push(entry);
    next.extend(history.iter().take(cap - 1).cloned());
    next
}

/// Fixed-capacity, most-recent-first attempt log.
///
/// Serializes as a plain JSON array. Capacity is not stored; a loaded history
/// longer than [`DEFAULT_HISTORY_CAPACITY`] is truncated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<AttemptRecord>", into = "Vec<AttemptRecord>")]
pub struct ScrapingHistory {
    entries: Vec<AttemptRecord>,
    capacity: usize,
}

impl Default for ScrapingHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl ScrapingHistory {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }

    /// Create an empty history holding at most `capacity` entries, clamped to
    /// `1..=MAX_HISTORY_CAPACITY`.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            capacity: bounded(capacity),
        }
    }

    /// Rebuild a history from stored entries, truncating to `capacity`.
    pub fn from_entries(mut entries: Vec<AttemptRecord>, capacity: usize) -> Self {
        let capacity = bounded(capacity);
        entries.truncate(capacity);
        Self { entries, capacity }
    }

    /// Consume this history and return one with `entry` at the front.
    pub fn prepend(self, entry: AttemptRecord) -> Self {
        let entries = prepend(&self.entries, entry, self.capacity);
        Self {
            entries,
            capacity: self.capacity,
        }
    }

    /// Re-bound this history to a different capacity.
    pub fn with_limit(self, capacity: usize) -> Self {
        Self::from_entries(self.entries, capacity)
    }

    pub fn latest(&self) -> Option<&AttemptRecord> {
        self.entries.first()
    }

    pub fn entries(&self) -> &[AttemptRecord] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AttemptRecord> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl From<Vec<AttemptRecord>> for ScrapingHistory {
    fn from(entries: Vec<AttemptRecord>) -> Self {
        Self::from_entries(entries, DEFAULT_HISTORY_CAPACITY)
    }
}

impl From<ScrapingHistory> for Vec<AttemptRecord> {
    fn from(history: ScrapingHistory) -> Self {
        history.entries
    }
}

impl<'a> IntoIterator for &'a ScrapingHistory {
    type Item = &'a AttemptRecord;
    type IntoIter = std::slice::Iter<'a, AttemptRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
