use async_trait::async_trait;
use reqwest::{header, redirect, Client, ClientBuilder};
use std::time::Duration;
use url::Url;

use super::Scraper;
use crate::core::config::ScrapeConfig;
use crate::core::retry::RetryConfig;
use crate::{HttpResponse, ScraperResult, StatsTracker};

/// Header sets rotated across attempts, one per attempt index.
pub const USER_AGENTS: [&str; 3] = [
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36",
];

const MAX_REDIRECTS: usize = 10;

pub fn user_agent_for(attempt: usize) -> &'static str {
    USER_AGENTS[attempt % USER_AGENTS.len()]
}

#[derive(Clone)]
pub struct HttpScraper {
    client: Client,
    retry_config: RetryConfig,
    stats: StatsTracker,
}

impl HttpScraper {
    /// Builds a client that follows redirects and accepts self-signed or
    /// otherwise invalid certificates from the target site.
    pub fn new(timeout: Duration, retry_config: RetryConfig) -> ScraperResult<Self> {
        let client = ClientBuilder::new()
            .timeout(timeout)
            .redirect(redirect::Policy::limited(MAX_REDIRECTS))
            .danger_accept_invalid_certs(true)
            .build()?;

        Ok(Self {
            client,
            retry_config,
            stats: StatsTracker::new(),
        })
    }

    pub fn from_config(config: &ScrapeConfig) -> ScraperResult<Self> {
        Self::new(config.timeout, config.retry_config.clone())
    }
}

#[async_trait]
impl Scraper for HttpScraper {
    async fn fetch_single(&self, url: &Url, attempt: usize) -> ScraperResult<HttpResponse> {
        let response = self
            .client
            .get(url.clone())
            .header(header::USER_AGENT, user_agent_for(attempt))
            .send()
            .await?;

        let status = response.status().as_u16();
        let final_url = response.url().clone();
        // Decodes using the charset from Content-Type, falling back to UTF-8.
        let body = response.text().await?;

        Ok(HttpResponse::new(final_url, status, body))
    }

    fn retry_config(&self) -> &RetryConfig {
        &self.retry_config
    }

    fn stats(&self) -> &StatsTracker {
        &self.stats
    }
}
