//! HTTP client for the menu fetch collaborator.
//!
//! Two modes, both expecting a JSON [`RawMenu`] body:
//! - with a scraper endpoint configured, POSTs `{"url": ...}` to it and lets
//!   the scraper service do the site-specific work;
//! - without one, GETs the menu URL directly (for sources that already
//!   publish structured menus).

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use crate::domain::models::{FetcherConfig, RawMenu};
use crate::domain::ports::{FetchError, MenuFetcher};

#[derive(Debug, Serialize)]
struct ScrapeRequest<'a> {
    url: &'a str,
}

/// reqwest-backed [`MenuFetcher`].
///
/// The client carries its own request timeout as a backstop; the coordinator
/// applies the authoritative one around the whole call.
#[derive(Debug, Clone)]
pub struct HttpMenuFetcher {
    http: Client,
    endpoint: Option<String>,
}

impl HttpMenuFetcher {
    pub fn new(config: &FetcherConfig) -> Result<Self, FetchError> {
        let http = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.timeout())
            .build()
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        Ok(Self {
            http,
            endpoint: config.endpoint.clone().filter(|e| !e.trim().is_empty()),
        })
    }

    pub fn endpoint(&self) -> Option<&str> {
        self.endpoint.as_deref()
    }
}

fn transport_error(err: &reqwest::Error) -> FetchError {
    if err.is_timeout() {
        FetchError::Transport(format!("request timed out: {err}"))
    } else {
        FetchError::Transport(err.to_string())
    }
}

#[async_trait]
impl MenuFetcher for HttpMenuFetcher {
    async fn fetch(&self, url: &str) -> Result<RawMenu, FetchError> {
        let request = match &self.endpoint {
            Some(endpoint) => self.http.post(endpoint).json(&ScrapeRequest { url }),
            None => self.http.get(url),
        };

        let response = request
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| transport_error(&e))?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(url, status = status.as_u16(), "menu fetch returned error status");
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.bytes().await.map_err(|e| transport_error(&e))?;
        serde_json::from_slice::<RawMenu>(&body).map_err(|e| FetchError::InvalidPayload(e.to_string()))
    }
}
