use chrono::prelude::*;
use std::time::Duration;
use url::Url;

#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub url: Url,
    pub status: u16,
    pub body: String,
    pub timestamp: DateTime<Utc>,
    pub retry_count: usize,
    /// Backoff waits that preceded this response, in the order they were slept.
    pub retry_delays: Vec<Duration>,
}

impl HttpResponse {
    pub fn new(url: Url, status: u16, body: String) -> Self {
        Self {
            url,
            status,
            body,
            timestamp: Utc::now(),
            retry_count: 0,
            retry_delays: Vec::new(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == 200
    }
}
