// Chunk Source: the external collaborator that knows the playlist/manifest
// and decides which chunk to load next (spec §3, §4.5).

use crate::chunk::{NonSegmentChunk, SegmentChunkSpec};
use crate::error::SampleSourceError;
use crate::extractor::Extractor;
use crate::format::MediaFormat;

/// Where the next load should resume from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextLoadPosition {
    Unknown,
    At(i64),
}

impl NextLoadPosition {
    pub fn value(&self) -> Option<i64> {
        match self {
            NextLoadPosition::At(p) => Some(*p),
            NextLoadPosition::Unknown => None,
        }
    }
}

/// Whether a seek/restart has a pending target position to resume loading
/// from, replacing the teacher-adjacent convention of a magic sentinel
/// integer (e.g. `Long.MIN_VALUE`) with a tagged variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingReset {
    None,
    At(i64),
}

impl PendingReset {
    pub fn is_set(&self) -> bool {
        matches!(self, PendingReset::At(_))
    }

    pub fn value(&self) -> Option<i64> {
        match self {
            PendingReset::At(p) => Some(*p),
            PendingReset::None => None,
        }
    }
}

/// What `maybe_start_loading` should do next, decided by the chunk source.
pub enum ChunkOperation {
    /// No more chunks exist at or after the requested position.
    EndOfStream,
    /// Nothing is ready yet (e.g. a live playlist hasn't refreshed); try
    /// again on the next call.
    Pending,
    /// A media segment to load, plus the extractor it should be demuxed
    /// with: `Some` when this segment starts a new extractor instance
    /// (discontinuity, format change), `None` when it continues appending
    /// to the queue's current tail extractor.
    Segment {
        spec: SegmentChunkSpec,
        new_extractor: Option<Box<dyn Extractor>>,
    },
    /// A sideband load with no extractor association.
    NonSegment(NonSegmentChunk),
}

/// The external collaborator owning manifest/playlist state and variant
/// selection. Provided by the embedder; the sample source only drives it.
pub trait ChunkSource: Send {
    /// Attempt to prepare (fetch the master/initial playlist). Returns
    /// `true` once ready; `false` means try again later.
    fn prepare(&mut self) -> bool;

    fn is_live(&self) -> bool;

    fn duration_us(&self) -> i64;

    /// Number of bitrate variants.
    fn track_count(&self) -> usize;

    fn track_format(&self, index: usize) -> MediaFormat;

    /// Apply a new adaptive variant selection (indices into `track_format`).
    fn select_tracks(&mut self, selected_indices: &[usize]);

    /// Notify of a seek; the next `next_chunk_operation` call should target
    /// the position passed to it.
    fn seek(&mut self);

    /// Decide the next operation to perform, given the most recently
    /// completed segment (if any) and where loading should resume.
    fn next_chunk_operation(
        &mut self,
        previous_segment: Option<&crate::chunk::SegmentChunk>,
        load_position: NextLoadPosition,
    ) -> ChunkOperation;

    fn on_chunk_load_completed(&mut self, chunk: &crate::chunk::Chunk);

    /// Returns `true` if the chunk source fully handled this error itself
    /// (e.g. excluded a variant and will retry differently) so the sample
    /// source should not apply its own retry/backoff accounting.
    fn on_chunk_load_error(&mut self, chunk: &crate::chunk::Chunk, error: &SampleSourceError) -> bool;

    /// Surface a pending fatal error from the chunk source itself (distinct
    /// from a load error on an in-flight loadable).
    fn maybe_throw_error(&self) -> Result<(), SampleSourceError>;

    /// Called when the last enabled track is disabled; the chunk source
    /// should drop any per-playback state (selected variants, exclusion
    /// lists).
    fn reset(&mut self);
}
