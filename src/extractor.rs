// Extractor: demultiplexes one segment's bytes into per-track samples
// (spec §3 "Extractor wrapper", external collaborator).

use crate::allocator::Allocator;
use crate::format::MediaFormat;
use bytes::Bytes;
use std::sync::Arc;

/// A single demultiplexed sample handed back to the Reader API.
///
/// `data` is `Bytes` rather than `Vec<u8>`: an extractor typically slices
/// several samples out of one segment-sized allocation, and `Bytes`'s
/// `slice`/`clone` are refcounted views rather than copies, matching how
/// the teacher's container parsers (`mp4`, `ts`) hand back sample payloads.
#[derive(Debug, Clone)]
pub struct ExtractedSample {
    pub track: usize,
    pub time_us: i64,
    pub data: Bytes,
    pub key_frame: bool,
    /// Set by `read_data` when `time_us` precedes the last seek position —
    /// the sample must be decoded to prime the decoder but never rendered.
    pub decode_only: bool,
}

/// A segment demultiplexer. Implementations are provided externally (the
/// concrete container-format parser); the sample source only needs to
/// drive the state machine described here.
pub trait Extractor: Send {
    /// Hand the extractor its shared output allocator. Called once, before
    /// any bytes are fed, when the extractor is appended to the queue.
    fn init(&mut self, allocator: Arc<dyn Allocator>);

    /// Whether this extractor has determined its track count and formats.
    fn is_prepared(&self) -> bool;

    fn track_count(&self) -> usize;

    fn media_format(&self, track: usize) -> Option<MediaFormat>;

    /// Whether `track` currently has at least one sample ready to read.
    fn has_samples(&self, track: usize) -> bool;

    /// Pop the next ready sample for `track`, if any.
    fn get_sample(&mut self, track: usize) -> Option<ExtractedSample>;

    /// The largest sample timestamp this extractor has parsed so far,
    /// across all tracks (spec §4.4, `get_buffered_position_us`).
    fn largest_parsed_timestamp_us(&self) -> i64;

    /// Drop any buffered samples, across all tracks, with a timestamp
    /// strictly before `time_us`. Called proactively on a seek (spec §3
    /// "Extractor wrapper") so stale pre-seek-target samples are released
    /// ahead of the full queue clear that follows the loader's cancel
    /// round-trip, rather than held until then.
    fn discard_until(&mut self, time_us: i64);

    /// Release any buffered samples and backing allocations. Called when
    /// the extractor is dropped from the front of the queue.
    fn clear(&mut self);

    /// Splice hand-off: trim this extractor's trailing output to end where
    /// `next` picks up (spec §4.4 step 4, `configureSpliceTo`). `next` is
    /// the actual successor extractor, not just its declared segment
    /// boundary, so an implementation can align against its real
    /// first-parsed-sample timestamp rather than a nominal one. A no-op
    /// for extractors that don't need to de-overlap against their
    /// successor.
    fn configure_splice_to(&mut self, next: &mut dyn Extractor);
}
