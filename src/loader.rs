// Loader: executes a dispatched chunk asynchronously and reports back
// through a channel rather than calling back inline (spec §5: "the Loader
// never invokes its completion callback synchronously from within
// `start`"). Mirrors the teacher's worker-posts-to-channel shape used by
// `HlsStreamCoordinator` (crates/mesio/src/hls/coordinator.rs), scaled down
// to a single in-flight load instead of a pipeline of spawned tasks.

use crate::chunk::Chunk;
use crate::error::SampleSourceError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LoadId(pub u64);

#[derive(Debug)]
pub enum LoaderEvent {
    Completed { load_id: LoadId, bytes_loaded: u64 },
    Canceled { load_id: LoadId, bytes_loaded: u64 },
    Error { load_id: LoadId, error: SampleSourceError, bytes_loaded: u64 },
}

pub type LoaderEventSender = std::sync::mpsc::Sender<LoaderEvent>;
pub type LoaderEventReceiver = std::sync::mpsc::Receiver<LoaderEvent>;

/// Drives exactly one in-flight load at a time. Implementations typically
/// spawn a tokio task that streams the chunk's `DataSpec` and posts a
/// `LoaderEvent` back through `events` on completion, cancellation, or
/// error — never directly invoking sample-source state from the worker.
pub trait Loader: Send {
    fn start(&mut self, load_id: LoadId, loadable: Chunk, events: LoaderEventSender);

    /// Request cancellation of the in-flight load, if any. The loader must
    /// still post a `LoaderEvent::Canceled` (or `Completed`, if the load
    /// had already finished racing the cancellation) rather than silently
    /// dropping the load.
    fn cancel(&mut self);

    fn is_loading(&self) -> bool;

    /// Tear down any background resources. Idempotent.
    fn release(&mut self);
}
