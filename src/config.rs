// Aggregate configuration (spec ambient stack).
//
// Follows the teacher's `HlsConfig` pattern (crates/mesio/src/hls/config.rs):
// a top-level struct nesting sub-configs, each with its own commented
// `Default` impl, rather than one flat struct or a builder. A builder
// (as in `DownloaderConfig::builder()`, crates/mesio/src/config.rs) is
// overkill here — two small, independently-defaulted fields don't need the
// construction ceremony a wide, partially-optional config would.
//
// `AllocatorConfig` is owned by whichever `LoadControl` impl constructs the
// shared `PooledAllocator` (spec §5: the allocator is Load Control's, not
// the sample source's), so it has no field here — nothing in this crate
// reads a `SampleSourceConfig`-held allocator config.

use crate::retry::RetryPolicy;

#[derive(Debug, Clone)]
pub struct SampleSourceConfig {
    pub retry: RetryPolicy,
    /// Seed capacity requested from the allocator for the first segment of
    /// a newly registered source (spec §5 load-control registration).
    pub initial_buffer_size: usize,
}

impl Default for SampleSourceConfig {
    fn default() -> Self {
        Self {
            retry: RetryPolicy::default(),
            initial_buffer_size: 64 * 1024,
        }
    }
}
