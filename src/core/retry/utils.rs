use super::types::*;
use std::time::Duration;

pub fn calculate_delay(config: &RetryConfig, attempt: usize) -> Duration {
    if attempt == 0 {
        return std::cmp::min(config.initial_delay, config.max_delay);
    }

    let exponent = i32::try_from(attempt).unwrap_or(i32::MAX);
    let delay = match config.backoff_policy {
        BackoffPolicy::Constant => config.initial_delay,
        BackoffPolicy::Linear => config
            .initial_delay
            .saturating_mul(u32::try_from(attempt).unwrap_or(u32::MAX).saturating_add(1)),
        BackoffPolicy::Exponential { factor } => {
            let scaled = config.initial_delay.as_secs_f32() * factor.powi(exponent);
            Duration::try_from_secs_f32(scaled).unwrap_or(config.max_delay)
        }
    };

    std::cmp::min(delay, config.max_delay)
}

impl RetryConfig {
    pub fn calculate_delay(&self, attempt: usize) -> Duration {
        calculate_delay(self, attempt)
    }

    /// True while another attempt may follow the 0-indexed `attempt`.
    pub fn has_attempts_left(&self, attempt: usize) -> bool {
        attempt + 1 < self.max_retries
    }
}
