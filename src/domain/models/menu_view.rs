//! Read-side view of a menu record.
//!
//! Staleness and metadata are computed here at read time and never written
//! back to the store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::menu::{DataSource, MenuRecord};
use crate::domain::staleness::{describe_age, is_stale_at};

/// Summary figures reported alongside a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuMetadata {
    pub item_count: usize,
    pub last_scraped: Option<DateTime<Utc>>,
    pub age_description: String,
    pub source: String,
    pub data_source: DataSource,
    pub history_length: usize,
}

/// A record plus its derived freshness.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuView {
    #[serde(flatten)]
    pub record: MenuRecord,
    pub is_stale: bool,
    pub metadata: MenuMetadata,
}

impl MenuView {
    /// Evaluate `record` against `max_age_hours` as of `now`.
    pub fn evaluate(record: MenuRecord, max_age_hours: f64, now: DateTime<Utc>) -> Self {
        let is_stale = is_stale_at(record.last_scraped, max_age_hours, now);
        Self::build(record, is_stale, now)
    }

    /// View of a record just written by a trusted manual edit; never stale.
    pub fn manual(record: MenuRecord, now: DateTime<Utc>) -> Self {
        Self::build(record, false, now)
    }

    fn build(record: MenuRecord, is_stale: bool, now: DateTime<Utc>) -> Self {
        let metadata = MenuMetadata {
            item_count: record.item_count(),
            last_scraped: record.last_scraped,
            age_description: describe_age(record.last_scraped, now),
            source: record.source.clone(),
            data_source: record.data_source,
            history_length: record.scraping_history.len(),
        };

        Self {
            record,
            is_stale,
            metadata,
        }
    }

    pub fn into_record(self) -> MenuRecord {
        self.record
    }
}
