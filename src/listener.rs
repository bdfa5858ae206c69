// Event notifications (spec §6 "External Interfaces").
//
// Grounded on the teacher's flat `HlsStreamEvent` enum (crates/mesio/src/
// hls/events.rs): a single enum dispatched through one trait method,
// rather than one callback method per event kind.

use crate::format::MediaFormat;
use crate::load_control::SourceId;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct LoadStartedEvent {
    pub source_id: SourceId,
    pub trigger: crate::chunk::ChunkTrigger,
    pub media_time_range: Option<(i64, i64)>,
}

#[derive(Debug, Clone)]
pub struct LoadCompletedEvent {
    pub source_id: SourceId,
    pub bytes_loaded: u64,
    pub load_duration: Duration,
}

#[derive(Debug, Clone)]
pub struct LoadCanceledEvent {
    pub source_id: SourceId,
    pub bytes_loaded: u64,
}

#[derive(Debug, Clone)]
pub struct LoadErrorEvent {
    pub source_id: SourceId,
    pub error_message: String,
    pub exception_count: u32,
}

#[derive(Debug, Clone)]
pub struct DownstreamFormatChangedEvent {
    pub source_id: SourceId,
    pub format: MediaFormat,
}

#[derive(Debug, Clone)]
pub enum SampleSourceEvent {
    LoadStarted(LoadStartedEvent),
    LoadCompleted(LoadCompletedEvent),
    LoadCanceled(LoadCanceledEvent),
    LoadError(LoadErrorEvent),
    DownstreamFormatChanged(DownstreamFormatChangedEvent),
}

pub trait EventListener: Send + Sync {
    fn on_event(&self, event: SampleSourceEvent);
}

/// An `EventListener` that forwards every event onto a channel, for
/// embedders who'd rather poll than implement the trait directly.
pub struct ChannelEventListener {
    sender: std::sync::mpsc::Sender<SampleSourceEvent>,
}

impl ChannelEventListener {
    pub fn new(sender: std::sync::mpsc::Sender<SampleSourceEvent>) -> Self {
        Self { sender }
    }
}

impl EventListener for ChannelEventListener {
    fn on_event(&self, event: SampleSourceEvent) {
        // A full channel (receiver dropped or backed up) just drops the
        // event; notifications are diagnostic, never load-bearing.
        let _ = self.sender.send(event);
    }
}

pub type EventSink = std::sync::Arc<dyn EventListener>;

/// An `EventListener` that discards everything, for tests and embedders
/// with no interest in notifications.
pub struct NullEventListener;

impl EventListener for NullEventListener {
    fn on_event(&self, _event: SampleSourceEvent) {}
}
