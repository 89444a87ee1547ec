//! Menu domain model.
//!
//! A [`MenuRecord`] is the single cached catalog for one tenant. It is created
//! by the first successful fetch or the first manual submission and carries its
//! own provenance: where the data came from and the recent fetch attempts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::history::ScrapingHistory;

/// Source identifier for records entered by hand.
pub const MANUAL_SOURCE: &str = "manual-entry";

/// Category given to fetched items that arrive without one.
pub const DEFAULT_CATEGORY: &str = "Menu Item";

/// Where the current record content came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    /// Content came from the external fetch collaborator
    Scraped,
    /// Content was submitted or edited by a trusted operator
    Manual,
}

impl Default for DataSource {
    fn default() -> Self {
        Self::Scraped
    }
}

impl DataSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Scraped => "scraped",
            Self::Manual => "manual",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "scraped" => Some(Self::Scraped),
            "manual" => Some(Self::Manual),
            _ => None,
        }
    }
}

impl std::fmt::Display for DataSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single menu entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Currency-formatted price, e.g. "$12.50"
    #[serde(default)]
    pub price: String,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default)]
    pub allergens: BTreeSet<String>,
    #[serde(default = "default_true")]
    pub availability: bool,
    #[serde(default)]
    pub is_popular: bool,
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

const fn default_true() -> bool {
    true
}

impl MenuItem {
    pub fn new(name: impl Into<String>, price: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            price: price.into(),
            category: default_category(),
            allergens: BTreeSet::new(),
            availability: true,
            is_popular: false,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_allergen(mut self, allergen: impl Into<String>) -> Self {
        self.allergens.insert(allergen.into());
        self
    }

    pub fn popular(mut self) -> Self {
        self.is_popular = true;
        self
    }

    pub fn has_name(&self) -> bool {
        !self.name.trim().is_empty()
    }
}

/// The cached catalog for one tenant.
///
/// Staleness is deliberately absent: it is derived on every read from
/// `last_scraped` and the caller's threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuRecord {
    pub tenant_id: String,
    #[serde(default)]
    pub restaurant_name: String,
    #[serde(default)]
    pub cuisine: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub hours: String,
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub items: Vec<MenuItem>,
    #[serde(default)]
    pub special_offers: Vec<String>,
    #[serde(default)]
    pub ai_context: String,
    pub source: String,
    pub data_source: DataSource,
    pub last_scraped: Option<DateTime<Utc>>,
    pub last_updated: DateTime<Utc>,
    #[serde(default)]
    pub scraping_history: ScrapingHistory,
}

impl MenuRecord {
    /// Create an empty record for a tenant.
    pub fn new(tenant_id: impl Into<String>, source: impl Into<String>, data_source: DataSource) -> Self {
        let now = Utc::now();
        Self {
            tenant_id: tenant_id.into(),
            restaurant_name: String::new(),
            cuisine: String::new(),
            location: String::new(),
            phone: String::new(),
            hours: String::new(),
            website: String::new(),
            items: Vec::new(),
            special_offers: Vec::new(),
            ai_context: String::new(),
            source: source.into(),
            data_source,
            last_scraped: Some(now),
            last_updated: now,
            scraping_history: ScrapingHistory::new(),
        }
    }

    pub fn with_items(mut self, items: Vec<MenuItem>) -> Self {
        self.items = items;
        self
    }

    pub fn with_restaurant_name(mut self, name: impl Into<String>) -> Self {
        self.restaurant_name = name.into();
        self
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Distinct item categories in first-seen order.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for item in &self.items {
            if !seen.contains(&item.category.as_str()) {
                seen.push(item.category.as_str());
            }
        }
        seen
    }

    pub fn is_manual(&self) -> bool {
        self.data_source == DataSource::Manual
    }
}

/// Item as returned by the fetch collaborator, before defaults are applied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMenuItem {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub allergens: Option<Vec<String>>,
    #[serde(default)]
    pub availability: Option<bool>,
    #[serde(default)]
    pub is_popular: Option<bool>,
}

impl From<RawMenuItem> for MenuItem {
    fn from(raw: RawMenuItem) -> Self {
        let category = raw
            .category
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(default_category);

        Self {
            name: raw.name.trim().to_string(),
            description: raw.description.unwrap_or_default(),
            price: raw.price.unwrap_or_default(),
            category,
            allergens: raw.allergens.unwrap_or_default().into_iter().collect(),
            availability: raw.availability.unwrap_or(true),
            is_popular: raw.is_popular.unwrap_or(false),
        }
    }
}

/// Menu payload produced by the external fetch collaborator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMenu {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub items: Option<Vec<RawMenuItem>>,
    #[serde(default)]
    pub special_offers: Option<Vec<String>>,
    #[serde(default)]
    pub ai_context_hint: Option<String>,
    #[serde(default)]
    pub cuisine: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub hours: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
}

impl RawMenu {
    /// Normalized items, with blank-named entries dropped.
    pub fn menu_items(&self) -> Vec<MenuItem> {
        self.items
            .clone()
            .unwrap_or_default()
            .into_iter()
            .map(MenuItem::from)
            .filter(MenuItem::has_name)
            .collect()
    }

    pub fn offers(&self) -> Vec<String> {
        self.special_offers
            .clone()
            .unwrap_or_default()
            .into_iter()
            .filter(|o| !o.trim().is_empty())
            .collect()
    }
}

/// Partial fields for a manual merge. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restaurant_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cuisine: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hours: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<MenuItem>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_offers: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_context: Option<String>,
}

impl MenuPatch {
    pub fn restaurant_name(name: impl Into<String>) -> Self {
        Self {
            restaurant_name: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}
