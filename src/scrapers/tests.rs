use super::*;
use crate::core::retry::{BackoffPolicy, RetryConfig};
use crate::ScraperError;
use std::time::Duration;
use tokio::time::Instant;
use url::Url;

fn example_url() -> Url {
    Url::parse("https://example.com/s/q=a%20b/t=spot/").unwrap()
}

#[tokio::test(start_paused = true)]
async fn test_transport_errors_then_success() {
    let responses = vec![
        MockResponse::transport_error("connection reset"),
        MockResponse::transport_error("dns failure"),
        MockResponse::ok("listing page"),
    ];
    let scraper = MockScraper::new(RetryConfig::default(), responses);

    let start = Instant::now();
    let response = scraper.fetch(&example_url()).await.unwrap();

    assert_eq!(response.status, 200);
    assert_eq!(response.body, "listing page");
    assert_eq!(response.retry_count, 2);
    assert_eq!(
        response.retry_delays,
        vec![Duration::from_secs(1), Duration::from_secs(2)]
    );
    assert_eq!(start.elapsed(), Duration::from_secs(3));
    assert_eq!(scraper.calls(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_success_on_first_attempt_never_sleeps() {
    let scraper = MockScraper::new(RetryConfig::default(), vec![MockResponse::ok("page")]);

    let start = Instant::now();
    let response = scraper.fetch(&example_url()).await.unwrap();

    assert_eq!(response.retry_count, 0);
    assert!(response.retry_delays.is_empty());
    assert_eq!(start.elapsed(), Duration::ZERO);
}

#[tokio::test(start_paused = true)]
async fn test_exhausted_attempts_carry_last_error() {
    let responses = vec![
        MockResponse::transport_error("timed out"),
        MockResponse::transport_error("timed out"),
        MockResponse::transport_error("connection refused"),
        MockResponse::ok("never reached"),
    ];
    let scraper = MockScraper::new(RetryConfig::default(), responses);

    let start = Instant::now();
    let error = scraper.fetch(&example_url()).await.unwrap_err();

    match &error {
        ScraperError::MaxRetriesReached {
            url,
            attempts,
            last_error,
        } => {
            assert_eq!(url, &example_url());
            assert_eq!(*attempts, 3);
            assert!(last_error.contains("connection refused"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(error.to_string().contains("connection refused"));
    assert_eq!(scraper.calls(), 3);
    // 1s + 2s, nothing after the final attempt.
    assert_eq!(start.elapsed(), Duration::from_secs(3));
}

#[tokio::test(start_paused = true)]
async fn test_non_200_status_is_a_failed_attempt() {
    let responses = vec![
        MockResponse::status(503),
        MockResponse::status(403),
        MockResponse::ok("finally"),
    ];
    let scraper = MockScraper::new(RetryConfig::default(), responses);

    let response = scraper.fetch(&example_url()).await.unwrap();

    assert_eq!(response.body, "finally");
    assert_eq!(response.retry_delays.len(), 2);

    let stats = scraper.stats().get_stats();
    assert_eq!(stats.total_requests, 3);
    assert_eq!(stats.failed_requests, 2);
    assert_eq!(stats.retry_reasons.get("status 503"), Some(&1));
    assert_eq!(stats.retry_reasons.get("status 403"), Some(&1));
}

#[tokio::test(start_paused = true)]
async fn test_last_status_is_reported_when_all_attempts_fail() {
    let scraper = MockScraper::new(RetryConfig::default(), vec![MockResponse::status(500)]);

    let error = scraper.fetch(&example_url()).await.unwrap_err();

    assert!(error.to_string().contains("unexpected status code 500"));
    assert_eq!(scraper.calls(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_attempt_index_is_passed_through() {
    let responses = vec![
        MockResponse::status(502),
        MockResponse::transport_error("reset"),
        MockResponse::ok("done"),
    ];
    let scraper = MockScraper::new(RetryConfig::default(), responses);

    scraper.fetch(&example_url()).await.unwrap();

    let attempts: Vec<usize> = scraper.requests().into_iter().map(|(_, a)| a).collect();
    assert_eq!(attempts, vec![0, 1, 2]);
}

#[tokio::test(start_paused = true)]
async fn test_backoff_durations_increase() {
    let retry_config = RetryConfig {
        max_retries: 5,
        initial_delay: Duration::from_secs(1),
        max_delay: Duration::from_secs(60),
        backoff_policy: BackoffPolicy::Exponential { factor: 2.0 },
    };
    let responses = vec![
        MockResponse::transport_error("1"),
        MockResponse::transport_error("2"),
        MockResponse::transport_error("3"),
        MockResponse::transport_error("4"),
        MockResponse::ok("page"),
    ];
    let scraper = MockScraper::new(retry_config, responses);

    let response = scraper.fetch(&example_url()).await.unwrap();

    assert_eq!(response.retry_delays.len(), 4);
    assert!(response.retry_delays.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(response.retry_delays[3], Duration::from_secs(8));
}

#[tokio::test]
async fn test_zero_attempt_budget_fails_without_requests() {
    let retry_config = RetryConfig {
        max_retries: 0,
        ..Default::default()
    };
    let scraper = MockScraper::new(retry_config, vec![MockResponse::ok("page")]);

    let error = scraper.fetch(&example_url()).await.unwrap_err();

    assert!(matches!(error, ScraperError::MaxRetriesReached { attempts: 0, .. }));
    assert_eq!(scraper.calls(), 0);
}
