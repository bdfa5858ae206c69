//! # hls-sample-source
//!
//! A pull-oriented HLS sample source for a multi-track playback pipeline.
//!
//! A single [`HlsSampleSource`] owns the extractor queue and load
//! scheduling for one rendition group; callers `enable` a track group to
//! get a [`SampleStreamReader`] and pull samples from it cooperatively —
//! no internal threads, no async in the public surface. Everything that
//! actually touches the network (playlist parsing, segment download,
//! demuxing) is modeled as an external collaborator trait
//! ([`ChunkSource`], [`Extractor`], [`Loader`]) supplied by the embedder.
//!
//! ## License
//!
//! Dual-licensed under MIT or Apache-2.0, matching the upstream project
//! this crate continues.

pub mod allocator;
pub mod chunk;
pub mod chunk_source;
pub mod config;
pub mod error;
pub mod extractor;
pub mod extractor_queue;
pub mod format;
pub mod listener;
pub mod load_control;
pub mod loader;
pub mod reader;
pub mod retry;
pub mod source;
pub mod track_group;

pub use allocator::{Allocation, Allocator, AllocatorConfig, AllocatorStats, PooledAllocator};
pub use chunk::{Chunk, ChunkTrigger, DataSpec, ExtractorId, NonSegmentChunk, SegmentChunk, SegmentChunkSpec};
pub use chunk_source::{ChunkOperation, ChunkSource, NextLoadPosition, PendingReset};
pub use config::SampleSourceConfig;
pub use error::SampleSourceError;
pub use extractor::{Extractor, ExtractedSample};
pub use format::{MediaFormat, TrackType, VariantInfo};
pub use listener::{EventListener, EventSink, NullEventListener, SampleSourceEvent};
pub use load_control::{LoadControl, SourceId};
pub use loader::{LoadId, Loader, LoaderEvent, LoaderEventReceiver, LoaderEventSender};
pub use reader::SampleStreamReader;
pub use retry::RetryPolicy;
pub use source::{HlsSampleSource, ReadResult, END_OF_SOURCE};
pub use track_group::{GroupState, TrackGroup, TrackGroupArray};
