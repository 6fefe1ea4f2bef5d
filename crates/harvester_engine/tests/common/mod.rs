#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use harvester_core::{ItemReference, ParseError, Record};
use harvester_engine::{FetchResult, Fetcher, HarvestSettings, SiteRoot};

pub const BASE: &str = "http://mock.test/";

pub fn init_logging() {
    engine_logging::initialize_for_tests();
}

pub fn settings(concurrency_limit: usize) -> HarvestSettings {
    HarvestSettings {
        site: SiteRoot::parse(BASE).unwrap(),
        concurrency_limit,
        ..HarvestSettings::default()
    }
}

pub fn references(ids: &[&str]) -> Vec<ItemReference> {
    ids.iter().map(|id| ItemReference::new(*id, *id)).collect()
}

/// Parser that turns any page into `{id, name}` unless the page says "empty".
pub fn echo_parser(html: &str, id: &str, name: &str) -> Result<Option<Record>, ParseError> {
    if html.contains("empty") {
        return Ok(None);
    }
    Ok(Some(Record::new(id, name)))
}

/// In-memory transport that records how many fetches overlap.
#[derive(Default)]
pub struct MockFetcher {
    pages: HashMap<String, String>,
    delays: HashMap<String, Duration>,
    default_delay: Duration,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
    calls: AtomicUsize,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serves `body` at `BASE + path`.
    pub fn page(mut self, path: &str, body: &str) -> Self {
        self.pages.insert(format!("{BASE}{path}"), body.to_string());
        self
    }

    pub fn absolute_page(mut self, url: &str, body: &str) -> Self {
        self.pages.insert(url.to_string(), body.to_string());
        self
    }

    pub fn delay(mut self, path: &str, delay: Duration) -> Self {
        self.delays.insert(format!("{BASE}{path}"), delay);
        self
    }

    pub fn default_delay(mut self, delay: Duration) -> Self {
        self.default_delay = delay;
        self
    }

    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl Fetcher for MockFetcher {
    async fn fetch(&self, url: &str) -> FetchResult {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);

        let delay = self.delays.get(url).copied().unwrap_or(self.default_delay);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        match self.pages.get(url) {
            Some(body) => FetchResult::success(body.clone()),
            None => FetchResult::failed(),
        }
    }
}
