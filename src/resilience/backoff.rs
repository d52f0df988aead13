//! Exponential backoff with jitter.

use std::time::Duration;

use rand::Rng;

use crate::config::RetryConfig;

/// Delay before the next supervisor attempt. Doubles per attempt from the
/// configured base, capped at the configured maximum, with up to 10% jitter.
pub fn backoff_delay(attempt: u32, retry: &RetryConfig) -> Duration {
    if attempt == 0 {
        return Duration::from_millis(0);
    }

    let exponent = 2u64.saturating_pow(attempt - 1);
    let delay_ms = retry
        .base_delay_ms
        .saturating_mul(exponent)
        .min(retry.max_delay_ms);

    let jitter_range = delay_ms / 10;
    let jitter = if jitter_range > 0 {
        rand::thread_rng().gen_range(0..jitter_range)
    } else {
        0
    };

    Duration::from_millis(delay_ms + jitter)
}
