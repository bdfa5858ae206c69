// Loadable chunk types (spec §3 "Chunk").

use crate::format::MediaFormat;

/// Why a chunk was selected: an initial/init segment, a regular media
/// segment, or a sideband load (e.g. a playlist refresh).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChunkTrigger {
    Initial,
    Manual,
    Adaptive,
    Trick,
}

/// Identity handed out by `ExtractorQueue::push`; a segment chunk that
/// continues the queue's tail carries the same id as that tail entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExtractorId(pub u64);

/// Where and how many bytes to load, opaque to the sample source itself —
/// interpreted only by the concrete `Loader` implementation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataSpec {
    pub uri: String,
    pub offset: u64,
    pub length: Option<u64>,
}

/// Bookkeeping kept for a dispatched or completed media-segment load.
/// Never owns the `Extractor` it is bound to — that ownership transfers
/// into the `ExtractorQueue` at dispatch time (§4.5 step 6).
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentChunk {
    pub format: MediaFormat,
    pub trigger: ChunkTrigger,
    pub start_time_us: i64,
    pub end_time_us: i64,
    pub data_spec: DataSpec,
    pub bytes_loaded: u64,
    pub extractor_id: ExtractorId,
}

/// A sideband load with no extractor/time-range association (e.g. an
/// encryption key fetch or playlist refresh).
#[derive(Debug, Clone, PartialEq)]
pub struct NonSegmentChunk {
    pub trigger: ChunkTrigger,
    pub data_spec: DataSpec,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Chunk {
    Segment(SegmentChunk),
    NonSegment(NonSegmentChunk),
}

impl Chunk {
    pub fn trigger(&self) -> ChunkTrigger {
        match self {
            Chunk::Segment(s) => s.trigger,
            Chunk::NonSegment(n) => n.trigger,
        }
    }

    pub fn media_time_range(&self) -> Option<(i64, i64)> {
        match self {
            Chunk::Segment(s) => Some((s.start_time_us, s.end_time_us)),
            Chunk::NonSegment(_) => None,
        }
    }

    pub fn data_spec(&self) -> &DataSpec {
        match self {
            Chunk::Segment(s) => &s.data_spec,
            Chunk::NonSegment(n) => &n.data_spec,
        }
    }
}

/// A segment chunk with its extractor binding not yet resolved — the
/// sample source resolves `extractor_id` (either reusing the queue's tail
/// or assigning a fresh one) once it decides whether `new_extractor` is
/// pushed (§4.5 step 6).
#[derive(Debug)]
pub struct SegmentChunkSpec {
    pub format: MediaFormat,
    pub trigger: ChunkTrigger,
    pub start_time_us: i64,
    pub end_time_us: i64,
    pub data_spec: DataSpec,
}
