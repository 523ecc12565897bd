use crate::core::error_chain;
use crate::core::retry::RetryConfig;
use crate::{HttpResponse, ScraperError, ScraperResult, StatsTracker};
use async_trait::async_trait;
use chrono::Utc;
use log::{debug, info, warn};
use tokio::time::sleep;
use url::Url;

#[async_trait]
pub trait Scraper: Send + Sync {
    /// Performs exactly one request. `attempt` is 0-indexed and selects the
    /// header set. Any HTTP status is returned as `Ok`.
    async fn fetch_single(&self, url: &Url, attempt: usize) -> ScraperResult<HttpResponse>;
    fn retry_config(&self) -> &RetryConfig;
    fn stats(&self) -> &StatsTracker;

    /// Fetches `url` until it answers 200 or the attempt budget runs out.
    ///
    /// Non-200 statuses and transport errors are both failed attempts and are
    /// followed by the same backoff wait. No wait follows the final attempt.
    async fn fetch(&self, url: &Url) -> ScraperResult<HttpResponse> {
        let retry_config = self.retry_config();
        let mut retry_delays = Vec::new();
        let mut last_error = String::from("no attempts were made");

        for attempt in 0..retry_config.max_retries {
            info!("Fetching URL: {} (attempt {})", url, attempt + 1);
            let start_time = Utc::now();

            let reason = match self.fetch_single(url, attempt).await {
                Ok(response) => {
                    let duration = Utc::now().signed_duration_since(start_time);
                    self.stats()
                        .record_request(response.status, response.body.len(), duration);
                    debug!(
                        "Received response: status={}, body_length={}",
                        response.status,
                        response.body.len()
                    );

                    if response.is_success() {
                        info!(
                            "Request completed for URL: {} (total_retries={}, status={})",
                            url, attempt, response.status
                        );
                        return Ok(HttpResponse {
                            retry_count: attempt,
                            retry_delays,
                            ..response
                        });
                    }

                    warn!("Status code {} on attempt {}", response.status, attempt + 1);
                    last_error = format!("unexpected status code {}", response.status);
                    format!("status {}", response.status)
                }
                Err(error) => {
                    self.stats().record_transport_error();
                    warn!("Attempt {} failed: {}", attempt + 1, error);
                    last_error = error_chain(&error);
                    "transport".to_string()
                }
            };

            if retry_config.has_attempts_left(attempt) {
                let delay = retry_config.calculate_delay(attempt);
                self.stats().record_retry(reason);
                debug!("Waiting {:?} before retrying {}", delay, url);
                sleep(delay).await;
                retry_delays.push(delay);
            }
        }

        Err(ScraperError::MaxRetriesReached {
            url: url.clone(),
            attempts: retry_config.max_retries,
            last_error,
        })
    }
}
