// Load Control: arbitrates buffering policy and owns the shared allocator
// (spec §3, §5 "Concurrency & Resource Model").

use crate::allocator::Allocator;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Opaque handle identifying one `HlsSampleSource` registration to a
/// `LoadControl` shared across several sources (e.g. video + audio demuxed
/// independently but buffered under one policy).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourceId(u64);

static NEXT_SOURCE_ID: AtomicU64 = AtomicU64::new(1);

impl SourceId {
    pub fn new() -> Self {
        Self(NEXT_SOURCE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for SourceId {
    fn default() -> Self {
        Self::new()
    }
}

/// Arbitrates whether a registered source may continue loading, and owns
/// the shared allocator handed to extractors (spec §5: "the allocator is
/// shared across all sources registered with the same Load Control").
pub trait LoadControl: Send + Sync {
    fn register(&self, source: SourceId, initial_buffer_size: usize);

    fn unregister(&self, source: SourceId);

    /// Called from `maybe_start_loading` before every load decision.
    /// Returns whether this source is allowed to start/continue loading.
    fn update(
        &self,
        source: SourceId,
        playback_position_us: i64,
        next_load_position_us: crate::chunk_source::NextLoadPosition,
        loading_or_backed_off: bool,
    ) -> bool;

    fn allocator(&self) -> Arc<dyn Allocator>;

    fn trim_allocator(&self) {
        self.allocator().trim();
    }
}
