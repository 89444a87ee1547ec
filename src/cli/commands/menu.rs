//! Menu CLI commands.

use anyhow::{bail, Context, Result};
use chrono::Utc;
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use tracing::warn;

use crate::adapters::fetchers::HttpMenuFetcher;
use crate::adapters::sqlite::{initialize_from_config, SqliteMenuRepository};
use crate::cli::output::{create_spinner_with_message, output, CommandOutput, TableFormatter};
use crate::cli::types::Commands;
use crate::domain::errors::DomainError;
use crate::domain::models::{Config, MenuItem, MenuPatch, MenuView};
use crate::domain::ports::{MenuFetcher, MenuRepository};
use crate::services::{CachePolicy, MenuService};

/// A menu as printed by every command that returns one.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuOutput {
    #[serde(flatten)]
    pub view: MenuView,
    /// Set by `refresh`: whether the cached record was reused
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cached: Option<bool>,
    /// Set by `refresh` when the fetch failed and previous data is shown
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_available: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

impl MenuOutput {
    pub fn new(view: MenuView) -> Self {
        Self {
            view,
            cached: None,
            fallback_available: None,
            warning: None,
        }
    }
}

impl CommandOutput for MenuOutput {
    fn to_human(&self) -> String {
        let record = &self.view.record;
        let meta = &self.view.metadata;
        let name = if record.restaurant_name.is_empty() {
            "(unnamed)"
        } else {
            record.restaurant_name.as_str()
        };

        let mut lines = Vec::new();
        if let Some(warning) = &self.warning {
            lines.push(format!("Warning: {warning}"));
            lines.push(String::new());
        }

        lines.push(format!("Restaurant: {name}"));
        lines.push(format!("Tenant: {}", record.tenant_id));
        lines.push(format!("Source: {} ({})", meta.source, meta.data_source));
        lines.push(format!("Last fetched: {}", meta.age_description));
        lines.push(format!(
            "Status: {}",
            if self.view.is_stale { "stale" } else { "fresh" }
        ));
        if let Some(cached) = self.cached {
            let fetch = match (cached, self.fallback_available) {
                (true, _) => "served from cache",
                (false, Some(true)) => "failed, showing previous menu",
                (false, _) => "fetched now",
            };
            lines.push(format!("Fetch: {fetch}"));
        }
        lines.push(format!(
            "Items: {} in {} categor{}",
            meta.item_count,
            record.categories().len(),
            if record.categories().len() == 1 { "y" } else { "ies" }
        ));

        let formatter = TableFormatter::new();
        if !record.items.is_empty() {
            lines.push(formatter.format_items(&record.items));
        }
        if !record.special_offers.is_empty() {
            lines.push("Special offers:".to_string());
            for offer in &record.special_offers {
                lines.push(format!("  - {offer}"));
            }
        }

        lines.push(format!("\nHistory ({}):", meta.history_length));
        if record.scraping_history.is_empty() {
            lines.push("  (none)".to_string());
        } else {
            lines.push(formatter.format_history(&record.scraping_history));
        }

        lines.join("\n")
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteOutput {
    pub tenant_id: String,
    pub deleted: bool,
    pub message: String,
}

impl CommandOutput for DeleteOutput {
    fn to_human(&self) -> String {
        self.message.clone()
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

/// Build the service backed by the configured SQLite store and HTTP fetcher.
pub async fn build_service(config: &Config) -> Result<MenuService<SqliteMenuRepository, HttpMenuFetcher>> {
    let pool = initialize_from_config(&config.database)
        .await
        .with_context(|| format!("Failed to open menu database at {}", config.database.path))?;

    let repository = SqliteMenuRepository::new(pool).with_history_capacity(config.cache.history_capacity);
    let fetcher = HttpMenuFetcher::new(&config.fetcher).context("Failed to build HTTP fetcher")?;

    Ok(MenuService::new(
        Arc::new(repository),
        Arc::new(fetcher),
        CachePolicy::from_config(config),
    ))
}

pub async fn execute(command: Commands, config: &Config, json_mode: bool) -> Result<()> {
    let service = build_service(config).await?;
    run(&service, command, json_mode).await
}

/// Run one command against an already-built service.
pub async fn run<R, F>(service: &MenuService<R, F>, command: Commands, json_mode: bool) -> Result<()>
where
    R: MenuRepository,
    F: MenuFetcher,
{
    match command {
        Commands::Get { tenant, max_age_hours } => {
            let view = service.get(&tenant, max_age_hours).await?;
            output(&MenuOutput::new(view), json_mode);
        }

        Commands::Refresh { tenant, url, force } => {
            let out = refresh(service, &tenant, &url, force, json_mode).await?;
            output(&out, json_mode);
        }

        Commands::Update {
            tenant,
            restaurant_name,
            cuisine,
            location,
            phone,
            hours,
            website,
            ai_context,
            items_file,
            offers,
        } => {
            let items = match items_file {
                Some(path) => Some(read_items_file(&path).await?),
                None => None,
            };
            let patch = MenuPatch {
                restaurant_name,
                cuisine,
                location,
                phone,
                hours,
                website,
                items,
                special_offers: (!offers.is_empty()).then_some(offers),
                ai_context,
            };
            if patch.is_empty() {
                bail!("Nothing to update: pass at least one field to change");
            }

            let view = service.merge(&tenant, patch).await?;
            output(&MenuOutput::new(view), json_mode);
        }

        Commands::Create { tenant, items_file } => {
            let items = read_items_file(&items_file).await?;
            let view = service.create(&tenant, items).await?;
            output(&MenuOutput::new(view), json_mode);
        }

        Commands::Delete { tenant } => {
            if !service.delete(&tenant).await? {
                return Err(DomainError::MenuNotFound(tenant).into());
            }
            let out = DeleteOutput {
                message: format!("Deleted menu for tenant {tenant}"),
                tenant_id: tenant,
                deleted: true,
            };
            output(&out, json_mode);
        }
    }

    Ok(())
}

/// Refresh, turning a fetch failure with fallback data into a warning.
async fn refresh<R, F>(
    service: &MenuService<R, F>,
    tenant: &str,
    url: &str,
    force: bool,
    json_mode: bool,
) -> Result<MenuOutput>
where
    R: MenuRepository,
    F: MenuFetcher,
{
    let spinner = create_spinner_with_message(format!("Fetching menu for {tenant}"), json_mode);
    let result = service.refresh(tenant, url, force).await;
    spinner.finish_and_clear();

    let max_age = service.policy().default_max_age_hours;
    match result {
        Ok(refreshed) => Ok(MenuOutput {
            cached: Some(refreshed.cached),
            ..MenuOutput::new(MenuView::evaluate(refreshed.record, max_age, Utc::now()))
        }),
        Err(DomainError::ScrapeFailed(failure)) if failure.fallback_available() => {
            let warning = format!("{}; showing previously cached menu", failure.error);
            warn!(tenant_id = %tenant, "{warning}");
            let fallback = (*failure).into_fallback().context("fallback record missing")?;
            Ok(MenuOutput {
                cached: Some(false),
                fallback_available: Some(true),
                warning: Some(warning),
                ..MenuOutput::new(MenuView::evaluate(fallback, max_age, Utc::now()))
            })
        }
        Err(err) => Err(err.into()),
    }
}

async fn read_items_file(path: &Path) -> Result<Vec<MenuItem>> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read items file {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("Items file {} must hold a JSON array of menu items", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::fetchers::{MockFetch, MockMenuFetcher};
    use crate::adapters::memory::InMemoryMenuRepository;
    use crate::domain::ports::FetchError;
    use std::io::Write;

    fn service(fetcher: MockMenuFetcher) -> MenuService<InMemoryMenuRepository, MockMenuFetcher> {
        MenuService::new(
            Arc::new(InMemoryMenuRepository::new()),
            Arc::new(fetcher),
            CachePolicy::default(),
        )
    }

    #[tokio::test]
    async fn test_refresh_failure_with_fallback_is_a_warning() {
        let fetcher = MockMenuFetcher::new(MockFetch::failure(FetchError::Status(502)))
            .with_script([MockFetch::items("Cafe", 3)]);
        let service = service(fetcher);

        let first = refresh(&service, "t1", "https://example.com/menu", false, true).await.unwrap();
        assert_eq!(first.cached, Some(false));

        let out = refresh(&service, "t1", "https://example.com/menu", true, true).await.unwrap();
        assert_eq!(out.fallback_available, Some(true));
        assert_eq!(out.cached, Some(false), "a fetch was attempted");
        assert!(out.warning.as_deref().unwrap().contains("502"));
        assert_eq!(out.view.record.item_count(), 3);

        let json = out.to_json();
        assert_eq!(json["fallbackAvailable"], true);
        assert_eq!(json["cached"], false);
        assert_eq!(json["restaurantName"], "Cafe");
        assert!(out.to_human().contains("Fetch: failed, showing previous menu"));
        assert_eq!(json["scrapingHistory"][0]["success"], false);
    }

    #[tokio::test]
    async fn test_refresh_failure_without_fallback_is_an_error() {
        let service = service(MockMenuFetcher::new(MockFetch::failure(FetchError::Status(502))));

        let err = refresh(&service, "t1", "https://example.com/menu", false, true)
            .await
            .unwrap_err();
        let domain = err.downcast_ref::<DomainError>().unwrap();
        assert!(!domain.as_scrape_failure().unwrap().fallback_available());
    }

    #[tokio::test]
    async fn test_create_from_items_file_then_delete() {
        let service = service(MockMenuFetcher::new(MockFetch::items("Cafe", 1)));
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"name": "Pho", "price": "$11", "category": "Soups"}}]"#).unwrap();

        run(
            &service,
            Commands::Create {
                tenant: "t1".to_string(),
                items_file: file.path().to_path_buf(),
            },
            true,
        )
        .await
        .unwrap();
        assert_eq!(service.get("t1", None).await.unwrap().record.items[0].name, "Pho");

        run(&service, Commands::Delete { tenant: "t1".to_string() }, true).await.unwrap();
        let err = run(&service, Commands::Delete { tenant: "t1".to_string() }, true)
            .await
            .unwrap_err();
        assert!(err.downcast_ref::<DomainError>().unwrap().is_not_found());
    }

    #[tokio::test]
    async fn test_empty_update_is_rejected() {
        let service = service(MockMenuFetcher::new(MockFetch::items("Cafe", 1)));
        let err = run(
            &service,
            Commands::Update {
                tenant: "t1".to_string(),
                restaurant_name: None,
                cuisine: None,
                location: None,
                phone: None,
                hours: None,
                website: None,
                ai_context: None,
                items_file: None,
                offers: vec![],
            },
            true,
        )
        .await
        .unwrap_err();
        assert!(err.to_string().contains("Nothing to update"));
    }

    #[test]
    fn test_human_output_mentions_staleness_and_history() {
        let record = crate::domain::models::MenuRecord::new(
            "t1",
            "https://example.com/menu",
            crate::domain::models::DataSource::Scraped,
        )
        .with_restaurant_name("Cafe")
        .with_items(vec![MenuItem::new("Tea", "$2")]);
        let out = MenuOutput::new(MenuView::evaluate(record, 24.0, Utc::now()));

        let text = out.to_human();
        assert!(text.contains("Restaurant: Cafe"));
        assert!(text.contains("Status: fresh"));
        assert!(text.contains("Items: 1 in 1 category"));
        assert!(text.contains("History (0):"));
    }
}
