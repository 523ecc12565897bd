use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BackoffPolicy {
    Constant,
    Linear,
    Exponential { factor: f32 },
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        Self::Exponential { factor: 2.0 }
    }
}

/// Attempt budget and wait schedule for one fetch.
///
/// `max_retries` counts every attempt, the first one included. The wait after
/// the 0-indexed attempt `n` is `initial_delay * factor^n`, capped at `max_delay`.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    pub max_retries: usize,
    pub initial_delay: Duration,
    pub max_delay: Duration,
    pub backoff_policy: BackoffPolicy,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(60),
            backoff_policy: BackoffPolicy::default(),
        }
    }
}
