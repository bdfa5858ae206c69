// HlsSampleSource orchestrator (spec §4): preparation, track-group
// synthesis, enable/disable/seek, the Reader API state machine, and the
// load-dispatch/callback/retry loop.
//
// Single-threaded cooperative driver: every public method assumes it's
// called from the one thread that owns this source (spec §5). Multiple
// `SampleStreamReader` handles share the same `SourceInner` through
// `Rc<RefCell<..>>` rather than the teacher's `Arc<Mutex<..>>` — there is
// no cross-thread handoff here, only multiple per-group facades over one
// owner, so the cheaper single-threaded primitive fits the contract.

use crate::allocator::Allocator;
use crate::chunk::Chunk;
use crate::chunk_source::{ChunkOperation, ChunkSource, NextLoadPosition, PendingReset};
use crate::config::SampleSourceConfig;
use crate::error::{assert_or_fatal, SampleSourceError};
use crate::extractor::ExtractedSample;
use crate::extractor_queue::ExtractorQueue;
use crate::format::{MediaFormat, VariantInfo};
use crate::listener::{
    DownstreamFormatChangedEvent, EventSink, LoadCanceledEvent, LoadCompletedEvent, LoadErrorEvent,
    LoadStartedEvent, SampleSourceEvent,
};
use crate::load_control::{LoadControl, SourceId};
use crate::loader::{LoadId, Loader, LoaderEvent, LoaderEventReceiver, LoaderEventSender};
use crate::reader::SampleStreamReader;
use crate::track_group::{build_tracks, GroupState, TrackGroup, TrackGroupArray};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, trace, warn};

/// Sentinel returned by `get_buffered_position_us` once loading has
/// finished and all buffered data has been consumed.
pub const END_OF_SOURCE: i64 = i64::MIN;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadResult {
    NothingRead,
    FormatRead,
    SampleRead,
    EndOfStream,
}

pub(crate) struct SourceInner {
    id: SourceId,
    config: SampleSourceConfig,
    chunk_source: Box<dyn ChunkSource>,
    loader: Box<dyn Loader>,
    load_control: Arc<dyn LoadControl>,
    listener: EventSink,
    loader_event_tx: LoaderEventSender,
    loader_event_rx: LoaderEventReceiver,
    next_load_id: u64,

    pub(crate) prepared: bool,
    load_control_registered: bool,
    track_groups: TrackGroupArray,
    primary_group_index: Option<usize>,
    selected_variant_indices: Vec<usize>,
    group_states: Vec<GroupState>,
    enabled_track_count: usize,
    downstream_format: Option<MediaFormat>,

    extractors: ExtractorQueue,

    downstream_position_us: i64,
    last_seek_position_us: i64,
    pending_reset_position_us: PendingReset,
    loading_finished: bool,

    current_loadable: Option<Chunk>,
    current_load_id: Option<LoadId>,
    current_segment_loadable: Option<crate::chunk::SegmentChunk>,
    previous_segment_loadable: Option<crate::chunk::SegmentChunk>,
    current_loadable_exception: Option<SampleSourceError>,
    current_loadable_exception_count: u32,
    current_loadable_exception_timestamp: Option<Instant>,
    current_load_start_time: Option<Instant>,
}

impl SourceInner {
    fn pump_loader_events(&mut self) {
        while let Ok(event) = self.loader_event_rx.try_recv() {
            match event {
                LoaderEvent::Completed { load_id, bytes_loaded } => self.on_load_completed(load_id, bytes_loaded),
                LoaderEvent::Canceled { load_id, bytes_loaded } => self.on_load_canceled(load_id, bytes_loaded),
                LoaderEvent::Error { load_id, error, bytes_loaded } => self.on_load_error(load_id, error, bytes_loaded),
            }
        }
    }

    pub fn prepare(&mut self, position_us: i64) -> Result<bool, SampleSourceError> {
        self.pump_loader_events();
        if self.prepared {
            return Ok(true);
        }
        if !self.chunk_source.prepare() {
            return Ok(false);
        }

        while self.extractors.len() > 1 {
            let front_prepared = match self.extractors.front() {
                Some(front) => front.is_prepared(),
                None => break,
            };
            if front_prepared {
                break;
            }
            if let Some(mut dropped) = self.extractors.pop_front() {
                dropped.clear();
            }
        }

        if let Some(front) = self.extractors.front() {
            if front.is_prepared() {
                self.synthesize_tracks()?;
                self.prepared = true;
                debug!(source = ?self.id, track_groups = self.track_groups.len(), "prepared");
                return Ok(true);
            }
        }

        self.ensure_load_control_registered();
        if !self.loader.is_loading() {
            self.pending_reset_position_us = PendingReset::At(position_us);
            self.downstream_position_us = position_us;
        }
        self.maybe_start_loading();
        self.maybe_throw_error()?;
        Ok(false)
    }

    fn synthesize_tracks(&mut self) -> Result<(), SampleSourceError> {
        let front = self
            .extractors
            .front()
            .ok_or_else(|| SampleSourceError::assertion("build_tracks called with an empty extractor queue"))?;

        let extractor_track_count = front.track_count();
        let mut formats = Vec::with_capacity(extractor_track_count);
        for t in 0..extractor_track_count {
            let fmt = front
                .media_format(t)
                .ok_or_else(|| SampleSourceError::assertion("prepared extractor missing a track format"))?;
            formats.push(fmt);
        }

        let variant_count = self.chunk_source.track_count();
        let variants: Vec<VariantInfo> = (0..variant_count)
            .map(|i| VariantInfo::from_format(&self.chunk_source.track_format(i)))
            .collect();

        let built = build_tracks(&formats, &variants);
        self.group_states = vec![GroupState::default(); built.groups.len()];
        self.primary_group_index = built.primary_group_index;
        self.selected_variant_indices = (0..variant_count).collect();
        self.track_groups = built.groups;
        Ok(())
    }

    pub fn track_group_count(&self) -> usize {
        self.track_groups.len()
    }

    pub fn track_group(&self, index: usize) -> Option<TrackGroup> {
        self.track_groups.get(index).cloned()
    }

    pub fn duration_us(&self) -> i64 {
        self.chunk_source.duration_us()
    }

    pub fn enable(
        &mut self,
        group: usize,
        selected_variants: &[usize],
        position_us: i64,
    ) -> Result<(), SampleSourceError> {
        self.pump_loader_events();
        assert_or_fatal!(group < self.track_groups.len(), "enable: group {group} out of range");
        assert_or_fatal!(!self.group_states[group].enabled, "enable: group {group} is already enabled");

        self.group_states[group].enabled = true;
        self.group_states[group].downstream_media_format = None;
        self.group_states[group].pending_reset = false;
        self.enabled_track_count += 1;
        self.downstream_format = None;

        self.ensure_load_control_registered();

        let mut position_us = position_us;
        if self.chunk_source.is_live() {
            position_us = 0;
        }

        let is_primary = Some(group) == self.primary_group_index;
        if is_primary && selected_variants != self.selected_variant_indices.as_slice() {
            debug!(source = ?self.id, group, ?selected_variants, "enable: primary variant reselected, seeking");
            self.selected_variant_indices = selected_variants.to_vec();
            self.chunk_source.select_tracks(selected_variants);
            self.internal_seek(position_us);
        } else if self.enabled_track_count == 1 && position_us == self.downstream_position_us {
            // Same-position re-prepare fast path: this is the first group
            // enabled, and the position matches the one `prepare` already
            // anchored loading to, so the in-flight/queued segment is kept
            // rather than restarted from scratch.
            trace!(source = ?self.id, group, position_us, "enable: same-position fast path, no restart");
        } else {
            self.last_seek_position_us = position_us;
            self.downstream_position_us = position_us;
            self.restart_from(position_us);
        }

        debug!(source = ?self.id, group, position_us, enabled_track_count = self.enabled_track_count, "enabled");
        Ok(())
    }

    pub fn disable(&mut self, group: usize) -> Result<(), SampleSourceError> {
        self.pump_loader_events();
        assert_or_fatal!(group < self.group_states.len(), "disable: group {group} out of range");
        assert_or_fatal!(self.group_states[group].enabled, "disable: group {group} is already disabled");

        self.group_states[group].enabled = false;
        assert_or_fatal!(self.enabled_track_count > 0, "disable: enabled track count underflowed");
        self.enabled_track_count -= 1;

        if self.enabled_track_count == 0 {
            debug!(source = ?self.id, "disable: last group disabled, tearing down load state");
            self.chunk_source.reset();
            self.downstream_position_us = 0;
            self.unregister_load_control();
            self.loader.cancel();
            self.extractors.clear();
            self.load_control.trim_allocator();
        }
        Ok(())
    }

    pub fn continue_buffering(&mut self, playback_position_us: i64) {
        self.pump_loader_events();
        self.downstream_position_us = playback_position_us;
        self.maybe_start_loading();
    }

    pub fn seek_to_us(&mut self, mut position_us: i64) {
        self.pump_loader_events();
        if self.enabled_track_count == 0 {
            return;
        }
        if self.chunk_source.is_live() {
            position_us = 0;
        }
        debug!(source = ?self.id, position_us, "seek_to_us");
        for group_state in &mut self.group_states {
            if group_state.enabled {
                group_state.pending_reset = true;
            }
        }
        self.chunk_source.seek();
        self.last_seek_position_us = position_us;
        self.downstream_position_us = position_us;
        self.extractors.discard_until(position_us);
        self.restart_from(position_us);
    }

    fn internal_seek(&mut self, position_us: i64) {
        for group_state in &mut self.group_states {
            if group_state.enabled {
                group_state.pending_reset = true;
            }
        }
        self.last_seek_position_us = position_us;
        self.downstream_position_us = position_us;
        self.extractors.discard_until(position_us);
        self.restart_from(position_us);
    }

    pub fn get_buffered_position_us(&mut self) -> i64 {
        self.pump_loader_events();
        if self.loading_finished {
            return END_OF_SOURCE;
        }
        if self.enabled_track_count == 0 {
            return self.downstream_position_us;
        }

        // Open question (spec §9), preserved verbatim rather than
        // simplified: report the larger of the last and penultimate
        // extractor's largest parsed timestamp, since a freshly appended
        // extractor may not yet have parsed anything and would otherwise
        // make the buffered position regress.
        let len = self.extractors.len();
        if len == 0 {
            return self.downstream_position_us;
        }
        let last = self.extractors.get(len - 1).map(|e| e.largest_parsed_timestamp_us());
        let penultimate = if len >= 2 {
            self.extractors.get(len - 2).map(|e| e.largest_parsed_timestamp_us())
        } else {
            None
        };
        match (last, penultimate) {
            (Some(l), Some(p)) => l.max(p),
            (Some(l), None) => l,
            _ => self.downstream_position_us,
        }
    }

    pub fn maybe_throw_error(&self) -> Result<(), SampleSourceError> {
        if let Some(err) = &self.current_loadable_exception {
            if self.config.retry.should_throw(self.current_loadable_exception_count) {
                return Err(err.clone());
            }
            return Ok(());
        }
        if self.current_loadable.is_none() {
            return self.chunk_source.maybe_throw_error();
        }
        Ok(())
    }

    pub fn release(&mut self) {
        self.pump_loader_events();
        debug!(source = ?self.id, "release");
        if self.load_control_registered {
            self.unregister_load_control();
        }
        self.loader.release();
        self.extractors.clear();
        self.prepared = false;
    }

    // --- Reader API (per group; group index doubles as extractor track
    // index, spec §4.2: "one group per extractor track"). ---

    pub fn is_ready(&self, group: usize) -> bool {
        if self.group_states[group].pending_reset {
            return false;
        }
        if self.loading_finished {
            return true;
        }
        if self.extractors.is_empty() {
            return false;
        }
        for i in 0..self.extractors.len() {
            if let Some(ext) = self.extractors.get(i) {
                if ext.is_prepared() && ext.has_samples(group) {
                    return true;
                }
            }
        }
        false
    }

    pub fn read_reset(&mut self, group: usize) -> Option<i64> {
        if self.group_states[group].pending_reset {
            self.group_states[group].pending_reset = false;
            Some(self.last_seek_position_us)
        } else {
            None
        }
    }

    pub fn read_data(
        &mut self,
        group: usize,
        out_format: &mut Option<MediaFormat>,
        out_sample: &mut Option<ExtractedSample>,
    ) -> ReadResult {
        self.pump_loader_events();
        *out_format = None;
        *out_sample = None;

        if self.group_states[group].pending_reset {
            return ReadResult::NothingRead;
        }

        // Discard front extractors that no enabled group has samples left
        // in, never discarding the last entry in the queue.
        loop {
            if self.extractors.len() <= 1 {
                break;
            }
            let front_exhausted = match self.extractors.get(0) {
                Some(front) => front.is_prepared() && !self.any_enabled_group_has_samples(front),
                None => false,
            };
            if !front_exhausted {
                break;
            }
            if let Some(mut dropped) = self.extractors.pop_front() {
                dropped.clear();
            }
        }

        let current = match self.extractors.get(0) {
            Some(e) => e,
            None => return if self.loading_finished { ReadResult::EndOfStream } else { ReadResult::NothingRead },
        };
        if !current.is_prepared() {
            return ReadResult::NothingRead;
        }

        let current_coarse_format = current.format.clone();
        if self.downstream_format.as_ref() != Some(&current_coarse_format) {
            self.downstream_format = Some(current_coarse_format.clone());
            self.listener.on_event(SampleSourceEvent::DownstreamFormatChanged(DownstreamFormatChangedEvent {
                source_id: self.id,
                format: current_coarse_format,
            }));
        }

        if self.extractors.len() > 1 {
            self.extractors.configure_front_splice();
        }

        let mut selected_index = None;
        for i in 0..self.extractors.len() {
            let ext = match self.extractors.get(i) {
                Some(e) => e,
                None => break,
            };
            if !ext.is_prepared() {
                return ReadResult::NothingRead;
            }
            if ext.has_samples(group) {
                selected_index = Some(i);
                break;
            }
        }
        let selected_index = match selected_index {
            Some(i) => i,
            None => return if self.loading_finished { ReadResult::EndOfStream } else { ReadResult::NothingRead },
        };

        let selected_format = self.extractors.get(selected_index).and_then(|e| e.media_format(group));
        if selected_format != self.group_states[group].downstream_media_format {
            self.group_states[group].downstream_media_format = selected_format.clone();
            *out_format = selected_format;
            return ReadResult::FormatRead;
        }

        let sample = self.extractors.get_mut(selected_index).and_then(|e| e.get_sample(group));
        match sample {
            Some(mut sample) => {
                if sample.time_us < self.last_seek_position_us {
                    sample.decode_only = true;
                }
                *out_sample = Some(sample);
                ReadResult::SampleRead
            }
            None => {
                if self.loading_finished {
                    ReadResult::EndOfStream
                } else {
                    ReadResult::NothingRead
                }
            }
        }
    }

    fn any_enabled_group_has_samples(&self, extractor: &crate::extractor_queue::ExtractorWrapper) -> bool {
        for (g, state) in self.group_states.iter().enumerate() {
            if state.enabled && extractor.has_samples(g) {
                return true;
            }
        }
        false
    }

    // --- Loading (spec §4.5, §4.6, §4.7). ---

    fn restart_from(&mut self, position_us: i64) {
        self.pending_reset_position_us = PendingReset::At(position_us);
        self.loading_finished = false;
        if self.loader.is_loading() {
            self.loader.cancel();
        } else {
            self.clear_loader_state();
            self.maybe_start_loading();
        }
    }

    fn clear_loader_state(&mut self) {
        self.extractors.clear();
        self.current_loadable = None;
        self.current_load_id = None;
        self.current_segment_loadable = None;
        self.current_loadable_exception = None;
        self.current_loadable_exception_count = 0;
        self.current_loadable_exception_timestamp = None;
    }

    fn ensure_load_control_registered(&mut self) {
        if !self.load_control_registered {
            self.load_control.register(self.id, self.config.initial_buffer_size);
            self.load_control_registered = true;
        }
    }

    fn unregister_load_control(&mut self) {
        if self.load_control_registered {
            self.load_control.unregister(self.id);
            self.load_control_registered = false;
        }
    }

    fn next_load_position_us(&self) -> NextLoadPosition {
        if let PendingReset::At(p) = self.pending_reset_position_us {
            return NextLoadPosition::At(p);
        }
        if self.loading_finished || (self.prepared && self.enabled_track_count == 0) {
            return NextLoadPosition::Unknown;
        }
        if let Some(seg) = &self.current_segment_loadable {
            return NextLoadPosition::At(seg.end_time_us);
        }
        if let Some(seg) = &self.previous_segment_loadable {
            return NextLoadPosition::At(seg.end_time_us);
        }
        NextLoadPosition::Unknown
    }

    fn maybe_start_loading(&mut self) {
        let next_load_position_us = self.next_load_position_us();
        let is_backed_off = self.current_loadable_exception.is_some();
        let loading_or_backed_off = self.loader.is_loading() || is_backed_off;

        let next_loader_allowed = self.load_control.update(
            self.id,
            self.downstream_position_us,
            next_load_position_us,
            loading_or_backed_off,
        );

        if is_backed_off {
            let now = Instant::now();
            let Some(timestamp) = self.current_loadable_exception_timestamp else {
                return;
            };
            let delay = self.config.retry.delay_for(self.current_loadable_exception_count);
            if now.duration_since(timestamp) >= delay {
                trace!(source = ?self.id, count = self.current_loadable_exception_count, "backoff elapsed, resuming loadable");
                self.current_loadable_exception = None;
                self.current_loadable_exception_timestamp = None;
                if let Some(loadable) = self.current_loadable.clone() {
                    self.dispatch_load(loadable);
                }
            }
            return;
        }

        if self.loader.is_loading() || !next_loader_allowed {
            return;
        }
        if self.prepared && self.enabled_track_count == 0 {
            return;
        }

        let target = match self.pending_reset_position_us {
            PendingReset::At(p) => NextLoadPosition::At(p),
            PendingReset::None => NextLoadPosition::At(self.downstream_position_us),
        };
        let operation = self
            .chunk_source
            .next_chunk_operation(self.previous_segment_loadable.as_ref(), target);

        match operation {
            ChunkOperation::EndOfStream => {
                debug!(source = ?self.id, "chunk source reports end of stream");
                self.loading_finished = true;
                self.load_control
                    .update(self.id, self.downstream_position_us, NextLoadPosition::Unknown, false);
            }
            ChunkOperation::Pending => {}
            ChunkOperation::Segment { spec, new_extractor } => {
                self.pending_reset_position_us = PendingReset::None;
                let extractor_id = match (new_extractor, self.extractors.back_id()) {
                    (Some(extractor), _) => {
                        let allocator: Arc<dyn Allocator> = self.load_control.allocator();
                        self.extractors
                            .push(extractor, spec.format.clone(), spec.trigger, spec.start_time_us, allocator)
                    }
                    (None, Some(id)) => id,
                    (None, None) => {
                        tracing::error!("chunk source asked to continue the last extractor but the queue is empty");
                        return;
                    }
                };
                let segment = crate::chunk::SegmentChunk {
                    format: spec.format,
                    trigger: spec.trigger,
                    start_time_us: spec.start_time_us,
                    end_time_us: spec.end_time_us,
                    data_spec: spec.data_spec,
                    bytes_loaded: 0,
                    extractor_id,
                };
                self.current_segment_loadable = Some(segment.clone());
                let chunk = Chunk::Segment(segment);
                self.listener.on_event(SampleSourceEvent::LoadStarted(LoadStartedEvent {
                    source_id: self.id,
                    trigger: chunk.trigger(),
                    media_time_range: chunk.media_time_range(),
                }));
                self.dispatch_load(chunk);
            }
            ChunkOperation::NonSegment(non_segment) => {
                let chunk = Chunk::NonSegment(non_segment);
                self.listener.on_event(SampleSourceEvent::LoadStarted(LoadStartedEvent {
                    source_id: self.id,
                    trigger: chunk.trigger(),
                    media_time_range: None,
                }));
                self.dispatch_load(chunk);
            }
        }
    }

    fn dispatch_load(&mut self, chunk: Chunk) {
        self.next_load_id += 1;
        let load_id = LoadId(self.next_load_id);
        self.current_load_id = Some(load_id);
        self.current_loadable = Some(chunk.clone());
        self.current_load_start_time = Some(Instant::now());
        trace!(source = ?self.id, load_id = load_id.0, trigger = ?chunk.trigger(), "dispatching load");
        self.loader.start(load_id, chunk, self.loader_event_tx.clone());
    }

    fn on_load_completed(&mut self, load_id: LoadId, bytes_loaded: u64) {
        if Some(load_id) != self.current_load_id {
            return;
        }
        trace!(source = ?self.id, load_id = load_id.0, bytes_loaded, "load completed");
        let Some(loadable) = self.current_loadable.take() else {
            return;
        };
        self.chunk_source.on_chunk_load_completed(&loadable);
        let duration = self
            .current_load_start_time
            .map(|t| t.elapsed())
            .unwrap_or_default();
        if let Chunk::Segment(seg) = &loadable {
            self.previous_segment_loadable = Some(seg.clone());
        }
        self.listener.on_event(SampleSourceEvent::LoadCompleted(LoadCompletedEvent {
            source_id: self.id,
            bytes_loaded,
            load_duration: duration,
        }));
        self.current_load_id = None;
        self.current_segment_loadable = None;
        self.current_loadable_exception = None;
        self.current_loadable_exception_count = 0;
        self.current_load_start_time = None;
        self.maybe_start_loading();
    }

    fn on_load_canceled(&mut self, load_id: LoadId, bytes_loaded: u64) {
        if Some(load_id) != self.current_load_id {
            return;
        }
        trace!(source = ?self.id, load_id = load_id.0, bytes_loaded, "load canceled");
        self.listener.on_event(SampleSourceEvent::LoadCanceled(LoadCanceledEvent {
            source_id: self.id,
            bytes_loaded,
        }));
        if self.enabled_track_count > 0 {
            let target = self
                .pending_reset_position_us
                .value()
                .unwrap_or(self.downstream_position_us);
            self.restart_from(target);
        } else {
            self.clear_loader_state();
            self.load_control.trim_allocator();
        }
    }

    fn on_load_error(&mut self, load_id: LoadId, error: SampleSourceError, _bytes_loaded: u64) {
        if Some(load_id) != self.current_load_id {
            return;
        }
        if self.current_loadable.is_none() {
            return;
        }
        let chunk = self.current_loadable.clone().unwrap();
        let handled = self.chunk_source.on_chunk_load_error(&chunk, &error);
        warn!(source = ?self.id, load_id = load_id.0, handled, %error, "load error");
        if handled {
            if self.previous_segment_loadable.is_none() && !self.pending_reset_position_us.is_set() {
                self.pending_reset_position_us = PendingReset::At(self.last_seek_position_us);
            }
            self.current_loadable = None;
            self.current_load_id = None;
            self.current_segment_loadable = None;
            self.current_loadable_exception = None;
            self.current_loadable_exception_count = 0;
            self.current_loadable_exception_timestamp = None;
        } else {
            self.current_loadable_exception_count += 1;
            self.current_loadable_exception_timestamp = Some(Instant::now());
            self.current_loadable_exception = Some(error.clone());
        }
        self.listener.on_event(SampleSourceEvent::LoadError(LoadErrorEvent {
            source_id: self.id,
            error_message: error.to_string(),
            exception_count: self.current_loadable_exception_count,
        }));
        self.maybe_start_loading();
    }
}

/// The pull-oriented HLS sample source (spec §1). Construct one per
/// playback session; obtain per-group readers via `enable`.
pub struct HlsSampleSource {
    inner: Rc<RefCell<SourceInner>>,
}

impl HlsSampleSource {
    pub fn new(
        config: SampleSourceConfig,
        chunk_source: Box<dyn ChunkSource>,
        loader: Box<dyn Loader>,
        load_control: Arc<dyn LoadControl>,
        listener: EventSink,
    ) -> Self {
        let (loader_event_tx, loader_event_rx) = std::sync::mpsc::channel();
        let inner = SourceInner {
            id: SourceId::new(),
            config,
            chunk_source,
            loader,
            load_control,
            listener,
            loader_event_tx,
            loader_event_rx,
            next_load_id: 0,
            prepared: false,
            load_control_registered: false,
            track_groups: TrackGroupArray::default(),
            primary_group_index: None,
            selected_variant_indices: Vec::new(),
            group_states: Vec::new(),
            enabled_track_count: 0,
            downstream_format: None,
            extractors: ExtractorQueue::new(),
            downstream_position_us: 0,
            last_seek_position_us: 0,
            pending_reset_position_us: PendingReset::None,
            loading_finished: false,
            current_loadable: None,
            current_load_id: None,
            current_segment_loadable: None,
            previous_segment_loadable: None,
            current_loadable_exception: None,
            current_loadable_exception_count: 0,
            current_loadable_exception_timestamp: None,
            current_load_start_time: None,
        };
        Self { inner: Rc::new(RefCell::new(inner)) }
    }

    pub fn prepare(&self, position_us: i64) -> Result<bool, SampleSourceError> {
        self.inner.borrow_mut().prepare(position_us)
    }

    pub fn is_prepared(&self) -> bool {
        self.inner.borrow().prepared
    }

    pub fn duration_us(&self) -> i64 {
        self.inner.borrow().duration_us()
    }

    pub fn track_group_count(&self) -> usize {
        self.inner.borrow().track_group_count()
    }

    pub fn track_group(&self, index: usize) -> TrackGroup {
        self.inner
            .borrow()
            .track_group(index)
            .expect("track_group: index out of range")
    }

    pub fn enable(
        &self,
        group: usize,
        selected_variants: &[usize],
        position_us: i64,
    ) -> Result<SampleStreamReader, SampleSourceError> {
        self.inner.borrow_mut().enable(group, selected_variants, position_us)?;
        Ok(SampleStreamReader::new(Rc::clone(&self.inner), group))
    }

    pub fn continue_buffering(&self, playback_position_us: i64) {
        self.inner.borrow_mut().continue_buffering(playback_position_us);
    }

    pub fn seek_to_us(&self, position_us: i64) {
        self.inner.borrow_mut().seek_to_us(position_us);
    }

    pub fn get_buffered_position_us(&self) -> i64 {
        self.inner.borrow_mut().get_buffered_position_us()
    }

    pub fn maybe_throw_error(&self) -> Result<(), SampleSourceError> {
        self.inner.borrow().maybe_throw_error()
    }

    pub fn release(&self) {
        self.inner.borrow_mut().release();
    }
}
