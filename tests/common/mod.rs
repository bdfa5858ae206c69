//! Shared fakes for the scenario tests. Mirrors the hand-rolled
//! `create_test_*` helper convention the library uses in its own inline
//! unit tests, scaled up into standalone fakes for the external
//! collaborator traits (`ChunkSource`, `Extractor`, `Loader`,
//! `LoadControl`) that an integration test can't reach into the crate to
//! stub directly.

use hls_sample_source::*;
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Installs a `tracing_subscriber` so a failing scenario's `debug!`/`trace!`
/// output is visible under `cargo test -- --nocapture`. Idempotent across
/// the several test binaries in this crate's `tests/` directory.
#[inline]
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

pub struct FakeExtractor {
    pub format: MediaFormat,
    samples: VecDeque<ExtractedSample>,
    /// The real successor extractor's `largest_parsed_timestamp_us`, as
    /// last observed through `configure_splice_to`. Shared via `Arc` (and
    /// `Send + Sync`, per `Extractor: Send`) so a test can keep a handle
    /// after the extractor itself has moved into the source's extractor
    /// queue as a `Box<dyn Extractor>`.
    pub spliced_to: Arc<Mutex<Option<i64>>>,
}

impl FakeExtractor {
    pub fn new(format: MediaFormat) -> Self {
        Self { format, samples: VecDeque::new(), spliced_to: Arc::new(Mutex::new(None)) }
    }

    pub fn with_sample(mut self, time_us: i64) -> Self {
        self.samples.push_back(ExtractedSample {
            track: 0,
            time_us,
            data: bytes::Bytes::from(vec![0u8; 4]),
            key_frame: true,
            decode_only: false,
        });
        self
    }
}

impl Extractor for FakeExtractor {
    fn init(&mut self, _allocator: Arc<dyn Allocator>) {}
    fn is_prepared(&self) -> bool {
        true
    }
    fn track_count(&self) -> usize {
        1
    }
    fn media_format(&self, track: usize) -> Option<MediaFormat> {
        (track == 0).then(|| self.format.clone())
    }
    fn has_samples(&self, track: usize) -> bool {
        track == 0 && !self.samples.is_empty()
    }
    fn get_sample(&mut self, track: usize) -> Option<ExtractedSample> {
        if track == 0 { self.samples.pop_front() } else { None }
    }
    fn largest_parsed_timestamp_us(&self) -> i64 {
        self.samples.iter().map(|s| s.time_us).max().unwrap_or(0)
    }
    fn clear(&mut self) {
        self.samples.clear();
    }
    fn configure_splice_to(&mut self, next: &mut dyn Extractor) {
        // Read the real successor's parsed state, not just a declared
        // segment boundary, proving the collaborator itself crossed the
        // splice call rather than a nominal timestamp.
        *self.spliced_to.lock().unwrap() = Some(next.largest_parsed_timestamp_us());
    }
    fn discard_until(&mut self, time_us: i64) {
        self.samples.retain(|s| s.time_us >= time_us);
    }
}

#[derive(Clone)]
pub enum FakeOp {
    Segment { format: MediaFormat, trigger: ChunkTrigger, start_us: i64, end_us: i64, fresh_extractor: bool },
    EndOfStream,
    Pending,
}

/// A scripted `ChunkSource`: pops one `FakeOp` per `next_chunk_operation`
/// call, repeating the last scripted op once the script is exhausted so
/// long-running retry loops don't starve.
pub struct FakeChunkSource {
    pub live: bool,
    pub duration_us: i64,
    pub variants: Vec<MediaFormat>,
    script: RefCell<VecDeque<FakeOp>>,
    /// Pre-built extractors a test wants installed in place of the default
    /// empty `FakeExtractor`, consumed in order as `fresh_extractor`
    /// segments are served. Lets a test keep its own handle (e.g. a
    /// `spliced_to` probe) on the exact instance the source will queue.
    pending_extractors: RefCell<VecDeque<Box<dyn Extractor>>>,
    pub seek_count: Arc<AtomicU32>,
    pub select_calls: Arc<Mutex<Vec<Vec<usize>>>>,
    pub load_position_calls: Arc<Mutex<Vec<NextLoadPosition>>>,
    pub chunk_source_handles_errors: bool,
}

impl FakeChunkSource {
    pub fn new(script: Vec<FakeOp>) -> Self {
        Self {
            live: false,
            duration_us: 60_000_000,
            variants: Vec::new(),
            script: RefCell::new(script.into()),
            pending_extractors: RefCell::new(VecDeque::new()),
            seek_count: Arc::new(AtomicU32::new(0)),
            select_calls: Arc::new(Mutex::new(Vec::new())),
            load_position_calls: Arc::new(Mutex::new(Vec::new())),
            chunk_source_handles_errors: false,
        }
    }

    pub fn live_at_zero() -> Self {
        let mut src = Self::new(vec![FakeOp::EndOfStream]);
        src.live = true;
        src
    }

    /// Queue a pre-built extractor to be installed the next time a
    /// `fresh_extractor` segment is served, instead of a default empty one.
    pub fn push_extractor(&self, extractor: Box<dyn Extractor>) {
        self.pending_extractors.borrow_mut().push_back(extractor);
    }
}

impl ChunkSource for FakeChunkSource {
    fn prepare(&mut self) -> bool {
        true
    }
    fn is_live(&self) -> bool {
        self.live
    }
    fn duration_us(&self) -> i64 {
        self.duration_us
    }
    fn track_count(&self) -> usize {
        self.variants.len()
    }
    fn track_format(&self, index: usize) -> MediaFormat {
        self.variants[index].clone()
    }
    fn select_tracks(&mut self, selected_indices: &[usize]) {
        self.select_calls.lock().unwrap().push(selected_indices.to_vec());
    }
    fn seek(&mut self) {
        self.seek_count.fetch_add(1, Ordering::Relaxed);
    }
    fn next_chunk_operation(
        &mut self,
        _previous_segment: Option<&SegmentChunk>,
        load_position: NextLoadPosition,
    ) -> ChunkOperation {
        self.load_position_calls.lock().unwrap().push(load_position);
        // Once only one entry remains, keep serving it instead of
        // exhausting the script — a source under test may poll
        // (`continue_buffering`) many times after reaching steady state.
        let mut script = self.script.borrow_mut();
        let op = if script.len() > 1 {
            script.pop_front().unwrap()
        } else {
            script.front().cloned().unwrap_or(FakeOp::Pending)
        };
        drop(script);
        match op {
            FakeOp::EndOfStream => ChunkOperation::EndOfStream,
            FakeOp::Pending => ChunkOperation::Pending,
            FakeOp::Segment { format, trigger, start_us, end_us, fresh_extractor } => {
                let new_extractor: Option<Box<dyn Extractor>> = if fresh_extractor {
                    let pending = self.pending_extractors.borrow_mut().pop_front();
                    Some(pending.unwrap_or_else(|| Box::new(FakeExtractor::new(format.clone()))))
                } else {
                    None
                };
                ChunkOperation::Segment {
                    spec: SegmentChunkSpec {
                        format,
                        trigger,
                        start_time_us: start_us,
                        end_time_us: end_us,
                        data_spec: DataSpec { uri: "fake://segment".into(), offset: 0, length: None },
                    },
                    new_extractor,
                }
            }
        }
    }
    fn on_chunk_load_completed(&mut self, _chunk: &Chunk) {}
    fn on_chunk_load_error(&mut self, _chunk: &Chunk, _error: &SampleSourceError) -> bool {
        self.chunk_source_handles_errors
    }
    fn maybe_throw_error(&self) -> Result<(), SampleSourceError> {
        Ok(())
    }
    fn reset(&mut self) {}
}

pub enum LoaderMode {
    AlwaysCompletes,
    AlwaysErrors,
}

/// A `Loader` that resolves every dispatched load synchronously within
/// `start`, posting its event onto the channel rather than calling back
/// inline — still honors the no-inline-callback contract, just with no
/// real asynchrony behind it.
pub struct FakeLoader {
    mode: LoaderMode,
    loading: Cell<bool>,
    pub start_count: Arc<AtomicU32>,
}

impl FakeLoader {
    pub fn new(mode: LoaderMode) -> Self {
        Self { mode, loading: Cell::new(false), start_count: Arc::new(AtomicU32::new(0)) }
    }
}

impl Loader for FakeLoader {
    fn start(&mut self, load_id: LoadId, _loadable: Chunk, events: LoaderEventSender) {
        self.start_count.fetch_add(1, Ordering::Relaxed);
        self.loading.set(true);
        let event = match self.mode {
            LoaderMode::AlwaysCompletes => LoaderEvent::Completed { load_id, bytes_loaded: 4 },
            LoaderMode::AlwaysErrors => LoaderEvent::Error {
                load_id,
                error: SampleSourceError::transient("simulated network blip", true),
                bytes_loaded: 0,
            },
        };
        let _ = events.send(event);
        self.loading.set(false);
    }
    fn cancel(&mut self) {}
    fn is_loading(&self) -> bool {
        self.loading.get()
    }
    fn release(&mut self) {}
}

/// A `Loader` that leaves a load in flight until the test resolves it, so
/// the cancellation path (`restart_from` racing a live load, `Loader::
/// cancel`, `on_load_canceled`) can be exercised directly instead of
/// always completing inline.
pub struct ManualLoader {
    // A plain `RefCell` would make `ManualLoader` `!Sync`, and `Arc<T>`
    // needs `T: Send + Sync` to be `Send` itself — required here since the
    // source is handed this loader as `Box<dyn Loader>` (`Loader: Send`)
    // while the test keeps its own `Arc` clone to resolve loads from.
    pending: Mutex<Option<(LoadId, LoaderEventSender)>>,
    pub start_count: Arc<AtomicU32>,
    pub cancel_count: Arc<AtomicU32>,
}

impl ManualLoader {
    pub fn new() -> Self {
        Self {
            pending: Mutex::new(None),
            start_count: Arc::new(AtomicU32::new(0)),
            cancel_count: Arc::new(AtomicU32::new(0)),
        }
    }

    /// Resolve the in-flight load (if any) as completed.
    pub fn complete_pending(&self, bytes_loaded: u64) {
        if let Some((load_id, events)) = self.pending.lock().unwrap().take() {
            let _ = events.send(LoaderEvent::Completed { load_id, bytes_loaded });
        }
    }

    /// Resolve the in-flight load (if any) as a transient, retryable error.
    pub fn fail_pending(&self) {
        if let Some((load_id, events)) = self.pending.lock().unwrap().take() {
            let _ = events.send(LoaderEvent::Error {
                load_id,
                error: SampleSourceError::transient("simulated network blip", true),
                bytes_loaded: 0,
            });
        }
    }
}

// Implemented for `Arc<Self>` rather than `ManualLoader` directly, so the
// same instance can be boxed as the source's `Loader` and kept as a
// handle the test resolves loads through.
impl Loader for Arc<ManualLoader> {
    fn start(&mut self, load_id: LoadId, _loadable: Chunk, events: LoaderEventSender) {
        self.start_count.fetch_add(1, Ordering::Relaxed);
        *self.pending.lock().unwrap() = Some((load_id, events));
    }
    fn cancel(&mut self) {
        self.cancel_count.fetch_add(1, Ordering::Relaxed);
        if let Some((load_id, events)) = self.pending.lock().unwrap().take() {
            let _ = events.send(LoaderEvent::Canceled { load_id, bytes_loaded: 0 });
        }
    }
    fn is_loading(&self) -> bool {
        self.pending.lock().unwrap().is_some()
    }
    fn release(&mut self) {}
}

/// A `Loader` that dispatches onto a real `tokio::spawn`ed task instead of
/// resolving inline, so a scenario can exercise the genuine cross-thread
/// delivery path (spec §5: the Loader's background worker posts its event
/// for the driver thread to drain, rather than calling back directly).
pub struct TokioLoader {
    pub start_count: Arc<AtomicU32>,
    loading: Arc<AtomicBool>,
    cancel_requested: Arc<AtomicBool>,
}

impl TokioLoader {
    pub fn new() -> Self {
        Self {
            start_count: Arc::new(AtomicU32::new(0)),
            loading: Arc::new(AtomicBool::new(false)),
            cancel_requested: Arc::new(AtomicBool::new(false)),
        }
    }
}

impl Loader for TokioLoader {
    fn start(&mut self, load_id: LoadId, _loadable: Chunk, events: LoaderEventSender) {
        self.start_count.fetch_add(1, Ordering::Relaxed);
        self.loading.store(true, Ordering::Relaxed);
        self.cancel_requested.store(false, Ordering::Relaxed);
        let loading = Arc::clone(&self.loading);
        let cancel_requested = Arc::clone(&self.cancel_requested);
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            let event = if cancel_requested.load(Ordering::Relaxed) {
                LoaderEvent::Canceled { load_id, bytes_loaded: 0 }
            } else {
                LoaderEvent::Completed { load_id, bytes_loaded: 2_048 }
            };
            let _ = events.send(event);
            loading.store(false, Ordering::Relaxed);
        });
    }
    fn cancel(&mut self) {
        self.cancel_requested.store(true, Ordering::Relaxed);
    }
    fn is_loading(&self) -> bool {
        self.loading.load(Ordering::Relaxed)
    }
    fn release(&mut self) {}
}

/// A `LoadControl` that always allows loading and hands out an
/// independent pooled allocator.
pub struct FakeLoadControl {
    allocator: Arc<dyn Allocator>,
}

impl FakeLoadControl {
    pub fn new() -> Self {
        Self { allocator: Arc::new(PooledAllocator::new(AllocatorConfig::default())) }
    }
}

impl LoadControl for FakeLoadControl {
    fn register(&self, _source: SourceId, _initial_buffer_size: usize) {}
    fn unregister(&self, _source: SourceId) {}
    fn update(
        &self,
        _source: SourceId,
        _playback_position_us: i64,
        _next_load_position_us: NextLoadPosition,
        _loading_or_backed_off: bool,
    ) -> bool {
        true
    }
    fn allocator(&self) -> Arc<dyn Allocator> {
        Arc::clone(&self.allocator)
    }
}

/// Records every event it receives, so a test can assert on what the
/// source reported without reaching into its private state.
#[derive(Default)]
pub struct CollectingListener {
    events: Mutex<Vec<SampleSourceEvent>>,
}

impl CollectingListener {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn snapshot(&self) -> Vec<SampleSourceEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn count_load_canceled(&self) -> usize {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|e| matches!(e, SampleSourceEvent::LoadCanceled(_)))
            .count()
    }

    pub fn count_load_errors(&self) -> usize {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|e| matches!(e, SampleSourceEvent::LoadError(_)))
            .count()
    }
}

impl EventListener for CollectingListener {
    fn on_event(&self, event: SampleSourceEvent) {
        self.events.lock().unwrap().push(event);
    }
}
