//! SQLite implementation of the MenuRepository.
//!
//! Timestamps cross this boundary in exactly one form: RFC 3339 UTC text.
//! They are written with [`format_datetime`] and parsed once on load.

use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{DataSource, MenuRecord, ScrapingHistory};
use crate::domain::ports::MenuRepository;

use super::{format_datetime, parse_datetime, parse_json_or_default, parse_optional_datetime};

#[derive(Clone)]
pub struct SqliteMenuRepository {
    pool: SqlitePool,
    history_capacity: usize,
}

impl SqliteMenuRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            history_capacity: crate::domain::models::DEFAULT_HISTORY_CAPACITY,
        }
    }

    /// Bound loaded histories to `capacity` entries.
    pub fn with_history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity;
        self
    }
}

#[async_trait]
impl MenuRepository for SqliteMenuRepository {
    async fn get(&self, tenant_id: &str) -> DomainResult<Option<MenuRecord>> {
        let row: Option<MenuRow> = sqlx::query_as(
            "SELECT tenant_id, restaurant_name, cuisine, location, phone, hours, website, items, special_offers, ai_context, source, data_source, last_scraped, last_updated, scraping_history FROM menu_records WHERE tenant_id = ?"
        )
        .bind(tenant_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_record(self.history_capacity)).transpose()
    }

    async fn put(&self, record: &MenuRecord) -> DomainResult<()> {
        let items_json = serde_json::to_string(&record.items)?;
        let offers_json = serde_json::to_string(&record.special_offers)?;
        let history_json = serde_json::to_string(&record.scraping_history)?;

        sqlx::query(
            r#"INSERT INTO menu_records (tenant_id, restaurant_name, cuisine, location, phone, hours, website, items, special_offers, ai_context, source, data_source, last_scraped, last_updated, scraping_history)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
               ON CONFLICT(tenant_id) DO UPDATE SET
                   restaurant_name = excluded.restaurant_name,
                   cuisine = excluded.cuisine,
                   location = excluded.location,
                   phone = excluded.phone,
                   hours = excluded.hours,
                   website = excluded.website,
                   items = excluded.items,
                   special_offers = excluded.special_offers,
                   ai_context = excluded.ai_context,
                   source = excluded.source,
                   data_source = excluded.data_source,
                   last_scraped = excluded.last_scraped,
                   last_updated = excluded.last_updated,
                   scraping_history = excluded.scraping_history"#
        )
        .bind(&record.tenant_id)
        .bind(&record.restaurant_name)
        .bind(&record.cuisine)
        .bind(&record.location)
        .bind(&record.phone)
        .bind(&record.hours)
        .bind(&record.website)
        .bind(&items_json)
        .bind(&offers_json)
        .bind(&record.ai_context)
        .bind(&record.source)
        .bind(record.data_source.as_str())
        .bind(record.last_scraped.map(format_datetime))
        .bind(format_datetime(record.last_updated))
        .bind(&history_json)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, tenant_id: &str) -> DomainResult<bool> {
        let result = sqlx::query("DELETE FROM menu_records WHERE tenant_id = ?")
            .bind(tenant_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[derive(sqlx::FromRow)]
struct MenuRow {
    tenant_id: String,
    restaurant_name: String,
    cuisine: String,
    location: String,
    phone: String,
    hours: String,
    website: String,
    items: Option<String>,
    special_offers: Option<String>,
    ai_context: String,
    source: String,
    data_source: String,
    last_scraped: Option<String>,
    last_updated: String,
    scraping_history: Option<String>,
}

impl MenuRow {
    fn into_record(self, history_capacity: usize) -> DomainResult<MenuRecord> {
        let data_source = DataSource::from_str(&self.data_source).ok_or_else(|| {
            DomainError::SerializationError(format!("Invalid data source: {}", self.data_source))
        })?;

        let history: ScrapingHistory = parse_json_or_default(self.scraping_history)?;

        Ok(MenuRecord {
            tenant_id: self.tenant_id,
            restaurant_name: self.restaurant_name,
            cuisine: self.cuisine,
            location: self.location,
            phone: self.phone,
            hours: self.hours,
            website: self.website,
            items: parse_json_or_default(self.items)?,
            special_offers: parse_json_or_default(self.special_offers)?,
            ai_context: self.ai_context,
            source: self.source,
            data_source,
            last_scraped: parse_optional_datetime(self.last_scraped)?,
            last_updated: parse_datetime(&self.last_updated)?,
            scraping_history: history.with_limit(history_capacity),
        })
    }
}
