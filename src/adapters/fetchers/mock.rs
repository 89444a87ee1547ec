//! Mock fetcher for testing.
//!
//! Responses are scripted per call; once the script runs out the default
//! response repeats. Every call is counted so tests can assert how many
//! external fetches a code path issued.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

use crate::domain::models::{RawMenu, RawMenuItem};
use crate::domain::ports::{FetchError, MenuFetcher};

/// One scripted fetch outcome.
#[derive(Debug, Clone)]
pub struct MockFetch {
    pub result: Result<RawMenu, FetchError>,
    pub delay: Option<Duration>,
}

impl MockFetch {
    pub fn menu(menu: RawMenu) -> Self {
        Self {
            result: Ok(menu),
            delay: None,
        }
    }

    /// A menu named `name` with `count` items across two categories.
    pub fn items(name: &str, count: usize) -> Self {
        let items = (0..count)
            .map(|i| RawMenuItem {
                name: format!("Item {}", i + 1),
                price: Some(format!("${}.00", 5 + i)),
                category: if i % 2 == 0 { Some("Mains".to_string()) } else { None },
                ..Default::default()
            })
            .collect();

        Self::menu(RawMenu {
            name: Some(name.to_string()),
            items: Some(items),
            ..Default::default()
        })
    }

    pub fn failure(error: FetchError) -> Self {
        Self {
            result: Err(error),
            delay: None,
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

/// Scripted, call-counting [`MenuFetcher`].
#[derive(Clone)]
pub struct MockMenuFetcher {
    script: Arc<Mutex<VecDeque<MockFetch>>>,
    default_response: MockFetch,
    calls: Arc<AtomicUsize>,
    urls: Arc<Mutex<Vec<String>>>,
}

impl MockMenuFetcher {
    pub fn new(default_response: MockFetch) -> Self {
        Self {
            script: Arc::new(Mutex::new(VecDeque::new())),
            default_response,
            calls: Arc::new(AtomicUsize::new(0)),
            urls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queue outcomes to return, in order, before falling back to the default.
    pub fn with_script(mut self, responses: impl IntoIterator<Item = MockFetch>) -> Self {
        self.script = Arc::new(Mutex::new(responses.into_iter().collect()));
        self
    }

    pub async fn push(&self, response: MockFetch) {
        self.script.lock().await.push_back(response);
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub async fn requested_urls(&self) -> Vec<String> {
        self.urls.lock().await.clone()
    }
}

#[async_trait]
impl MenuFetcher for MockMenuFetcher {
    async fn fetch(&self, url: &str) -> Result<RawMenu, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.urls.lock().await.push(url.to_string());

        let next = self
            .script
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| self.default_response.clone());

        if let Some(delay) = next.delay {
            tokio::time::sleep(delay).await;
        }
        next.result
    }
}
