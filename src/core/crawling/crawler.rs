use crate::core::config::ScrapeConfig;
use crate::parser::{total_pages, ListingRecord, PageParser};
use crate::{Scraper, ScraperError, ScraperResult};
use log::{debug, info, warn};
use std::net::SocketAddr;
use tokio::time::sleep;
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedPage {
    pub url: Url,
    pub error: String,
}

#[derive(Debug, Clone, Default)]
pub struct ScrapeOutcome {
    /// Page order, then document order within each page.
    pub records: Vec<ListingRecord>,
    pub failures: Vec<FailedPage>,
    pub pages_planned: usize,
}

impl ScrapeOutcome {
    pub fn log_summary(&self) {
        info!("Scraping completed!");
        info!("Total items found: {}", self.records.len());
        info!("Failed URLs: {}", self.failures.len());
        for failure in &self.failures {
            warn!("  {}: {}", failure.url, failure.error);
        }
    }
}

/// Walks the search result pages one at a time, in ascending order.
pub struct Crawler {
    scraper: Box<dyn Scraper>,
    parser: Box<dyn PageParser>,
    config: ScrapeConfig,
}

impl Crawler {
    pub fn new(scraper: Box<dyn Scraper>, parser: Box<dyn PageParser>, config: ScrapeConfig) -> Self {
        info!("Initializing crawler");
        Self {
            scraper,
            parser,
            config,
        }
    }

    /// Runs the whole scrape.
    ///
    /// Only a failed connectivity probe (or an unbuildable URL) is returned as
    /// an error; every per-page problem ends up in [`ScrapeOutcome::failures`].
    pub async fn run(&self) -> ScraperResult<ScrapeOutcome> {
        let probe_url = self.config.search_url()?;
        info!("Testing connection to {}", probe_url);

        let probe = self.scraper.fetch(&probe_url).await.map_err(|source| {
            ScraperError::ConnectivityCheck {
                url: probe_url.clone(),
                source: Box::new(source),
            }
        })?;

        let pages = self.plan_pages(&probe.body);
        let urls = self.config.page_urls(pages)?;
        info!("Will scrape {} pages", pages);

        let mut outcome = ScrapeOutcome {
            pages_planned: pages,
            ..Default::default()
        };

        for (index, url) in urls.iter().enumerate() {
            let page = index + 1;
            info!("Processing URL {}/{}: {}", page, urls.len(), url);

            match self.scrape_page(url).await {
                Ok(records) => {
                    info!("Found {} valid items on page {}", records.len(), page);
                    outcome.records.extend(records);
                }
                Err(error) => {
                    warn!("Error processing URL {}: {}", url, error);
                    outcome.failures.push(FailedPage {
                        url: url.clone(),
                        error: error.to_string(),
                    });
                }
            }

            if page < urls.len() && !self.config.request_delay.is_zero() {
                sleep(self.config.request_delay).await;
            }
        }

        outcome.log_summary();
        self.scraper.stats().finish();
        self.scraper.stats().print_summary();
        Ok(outcome)
    }

    /// Page count announced by the first page, or the configured default,
    /// capped at `max_pages`.
    pub fn plan_pages(&self, body: &str) -> usize {
        let pages = match self.parser.parse_total_results(body) {
            Ok(total_results) => {
                debug!("Search reports {} results", total_results);
                total_pages(total_results, self.config.per_page)
            }
            Err(error) => {
                warn!(
                    "Could not determine total pages ({}), using default value {}",
                    error, self.config.default_pages
                );
                self.config.default_pages
            }
        };
        pages.min(self.config.max_pages)
    }

    async fn scrape_page(&self, url: &Url) -> ScraperResult<Vec<ListingRecord>> {
        if self.config.dns_precheck {
            resolve_host(url).await?;
        }
        let response = self.scraper.fetch(url).await?;
        Ok(self.parser.parse_listings(&response.body))
    }
}

/// Resolves the host of `url` so name-resolution failures are reported
/// before any request is attempted.
pub async fn resolve_host(url: &Url) -> ScraperResult<SocketAddr> {
    let host = url
        .host_str()
        .ok_or_else(|| ScraperError::ConnectionError(format!("{url} has no host")))?;
    let port = url.port_or_known_default().unwrap_or(80);

    let address = tokio::net::lookup_host((host, port))
        .await
        .map_err(|e| ScraperError::ConnectionError(format!("DNS resolution failed for {host}: {e}")))?
        .next()
        .ok_or_else(|| ScraperError::ConnectionError(format!("no addresses found for {host}")))?;

    debug!("DNS resolved: {} -> {}", host, address.ip());
    Ok(address)
}
