// Retry/backoff policy (spec §4.7).
//
// The teacher's `RetryPolicy` (crates/mesio/src/hls/retry.rs) is exponential
// with jitter, driven by `tokio::select!` + `CancellationToken` against a
// future-returning closure. This policy's shape follows the same struct +
// `Default` + inline-test conventions, but implements the spec's exact
// linear formula and is polled cooperatively from `maybe_start_loading`
// rather than owning its own retry loop — there is no task to cancel here,
// only a single in-flight loadable to resume or abandon.

use std::time::Duration;

#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Exception counts at or below this are retried silently; counts past
    /// it are surfaced through `maybe_throw_error`.
    pub min_loadable_retry_count: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            min_loadable_retry_count: 3,
            base_delay: Duration::from_millis(1000),
            max_delay: Duration::from_secs(5),
        }
    }
}

impl RetryPolicy {
    /// `delay(n) = min((n - 1) * base, max)` for `n >= 1` consecutive
    /// failures of the same loadable.
    pub fn delay_for(&self, exception_count: u32) -> Duration {
        let multiplier = exception_count.saturating_sub(1);
        self.base_delay.saturating_mul(multiplier).min(self.max_delay)
    }

    pub fn should_throw(&self, exception_count: u32) -> bool {
        exception_count > self.min_loadable_retry_count
    }
}
