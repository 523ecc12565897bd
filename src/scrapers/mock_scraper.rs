use crate::core::retry::RetryConfig;
use crate::{HttpResponse, ScraperError, ScraperResult, StatsTracker};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use url::Url;

use super::Scraper;

#[derive(Clone, Debug)]
pub enum MockResponse {
    Page { status: u16, body: String },
    TransportError(String),
}

impl MockResponse {
    pub fn ok(body: &str) -> Self {
        Self::Page {
            status: 200,
            body: body.to_string(),
        }
    }

    pub fn status(status: u16) -> Self {
        Self::Page {
            status,
            body: String::new(),
        }
    }

    pub fn transport_error(message: &str) -> Self {
        Self::TransportError(message.to_string())
    }
}

/// Replays scripted responses in order, wrapping around at the end.
#[derive(Clone)]
pub struct MockScraper {
    retry_config: RetryConfig,
    responses: Arc<Vec<MockResponse>>,
    current_response: Arc<AtomicUsize>,
    seen: Arc<Mutex<Vec<(Url, usize)>>>,
    stats: StatsTracker,
}

impl MockScraper {
    pub fn new(retry_config: RetryConfig, responses: Vec<MockResponse>) -> Self {
        Self {
            retry_config,
            responses: Arc::new(responses),
            current_response: Arc::new(AtomicUsize::new(0)),
            seen: Arc::new(Mutex::new(Vec::new())),
            stats: StatsTracker::new(),
        }
    }

    pub fn calls(&self) -> usize {
        self.current_response.load(Ordering::SeqCst)
    }

    /// Every `(url, attempt)` pair passed to `fetch_single`, in call order.
    pub fn requests(&self) -> Vec<(Url, usize)> {
        self.seen.lock().clone()
    }
}

#[async_trait]
impl Scraper for MockScraper {
    async fn fetch_single(&self, url: &Url, attempt: usize) -> ScraperResult<HttpResponse> {
        self.seen.lock().push((url.clone(), attempt));
        let index = self.current_response.fetch_add(1, Ordering::SeqCst);
        if self.responses.is_empty() {
            return Err(ScraperError::ConnectionError(
                "no scripted responses".to_string(),
            ));
        }

        match &self.responses[index % self.responses.len()] {
            MockResponse::Page { status, body } => {
                Ok(HttpResponse::new(url.clone(), *status, body.clone()))
            }
            MockResponse::TransportError(message) => {
                Err(ScraperError::ConnectionError(message.clone()))
            }
        }
    }

    fn retry_config(&self) -> &RetryConfig {
        &self.retry_config
    }

    fn stats(&self) -> &StatsTracker {
        &self.stats
    }
}
