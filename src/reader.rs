// Per-group Reader API handle (spec §3 "Source state" / §4.4).
//
// Exposed to downstream consumers (one per enabled track group) as a thin
// handle over the shared `SourceInner`. The teacher's collaborators share
// state across tokio tasks via `Arc<Mutex<..>>`; this crate's contract is
// strictly single-threaded (spec §5), so `Rc<RefCell<..>>` is the right
// weight for "several handles, one cooperative owner, no concurrency."

use crate::error::SampleSourceError;
use crate::extractor::ExtractedSample;
use crate::format::MediaFormat;
use crate::source::{ReadResult, SourceInner};
use std::cell::RefCell;
use std::rc::Rc;

pub struct SampleStreamReader {
    inner: Rc<RefCell<SourceInner>>,
    group: usize,
}

impl SampleStreamReader {
    pub(crate) fn new(inner: Rc<RefCell<SourceInner>>, group: usize) -> Self {
        Self { inner, group }
    }

    pub fn group_index(&self) -> usize {
        self.group
    }

    pub fn is_ready(&self) -> bool {
        self.inner.borrow().is_ready(self.group)
    }

    pub fn maybe_throw_error(&self) -> Result<(), SampleSourceError> {
        self.inner.borrow().maybe_throw_error()
    }

    /// Returns the position to reset to if a discontinuity is pending for
    /// this group, clearing the pending flag as a side effect.
    pub fn read_reset(&self) -> Option<i64> {
        self.inner.borrow_mut().read_reset(self.group)
    }

    pub fn read_data(
        &self,
        out_format: &mut Option<MediaFormat>,
        out_sample: &mut Option<ExtractedSample>,
    ) -> ReadResult {
        self.inner.borrow_mut().read_data(self.group, out_format, out_sample)
    }

    pub fn disable(&self) -> Result<(), SampleSourceError> {
        self.inner.borrow_mut().disable(self.group)
    }
}
