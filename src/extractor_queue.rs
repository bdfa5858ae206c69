// Ordered queue of in-flight/appended extractors (spec §3 "Extractor
// wrapper"): cheap front-pop and tail-peek, splice hand-off between
// adjacent segments, identity via generation ids rather than position.

use crate::allocator::Allocator;
use crate::chunk::{ChunkTrigger, ExtractorId};
use crate::extractor::Extractor;
use crate::format::MediaFormat;
use std::collections::VecDeque;
use std::sync::Arc;

pub struct ExtractorWrapper {
    id: ExtractorId,
    extractor: Box<dyn Extractor>,
    pub format: MediaFormat,
    pub trigger: ChunkTrigger,
    pub start_time_us: i64,
}

impl ExtractorWrapper {
    pub fn id(&self) -> ExtractorId {
        self.id
    }

    pub fn is_prepared(&self) -> bool {
        self.extractor.is_prepared()
    }

    pub fn has_samples(&self, track: usize) -> bool {
        self.extractor.has_samples(track)
    }

    pub fn media_format(&self, track: usize) -> Option<MediaFormat> {
        self.extractor.media_format(track)
    }

    pub fn track_count(&self) -> usize {
        self.extractor.track_count()
    }

    pub fn discard_until(&mut self, time_us: i64) {
        self.extractor.discard_until(time_us);
    }

    pub fn get_sample(&mut self, track: usize) -> Option<crate::extractor::ExtractedSample> {
        self.extractor.get_sample(track)
    }

    pub fn largest_parsed_timestamp_us(&self) -> i64 {
        self.extractor.largest_parsed_timestamp_us()
    }

    pub fn clear(&mut self) {
        self.extractor.clear();
    }
}

#[derive(Default)]
pub struct ExtractorQueue {
    items: VecDeque<ExtractorWrapper>,
    next_id: u64,
}

impl ExtractorQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ExtractorWrapper> {
        self.items.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut ExtractorWrapper> {
        self.items.get_mut(index)
    }

    pub fn front(&self) -> Option<&ExtractorWrapper> {
        self.items.front()
    }

    pub fn back_id(&self) -> Option<ExtractorId> {
        self.items.back().map(|w| w.id)
    }

    /// Initialize and append a newly-constructed extractor to the tail,
    /// returning its freshly-assigned id.
    pub fn push(
        &mut self,
        mut extractor: Box<dyn Extractor>,
        format: MediaFormat,
        trigger: ChunkTrigger,
        start_time_us: i64,
        allocator: Arc<dyn Allocator>,
    ) -> ExtractorId {
        extractor.init(allocator);
        self.next_id += 1;
        let id = ExtractorId(self.next_id);
        self.items.push_back(ExtractorWrapper {
            id,
            extractor,
            format,
            trigger,
            start_time_us,
        });
        id
    }

    pub fn pop_front(&mut self) -> Option<ExtractorWrapper> {
        self.items.pop_front()
    }

    pub fn clear(&mut self) {
        for mut wrapper in self.items.drain(..) {
            wrapper.clear();
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &ExtractorWrapper> {
        self.items.iter()
    }

    /// Trim every queued extractor's buffered samples to `time_us` (spec §3
    /// `discardUntil`). Used ahead of a seek-triggered restart so memory is
    /// released promptly instead of waiting for the post-cancel clear.
    pub fn discard_until(&mut self, time_us: i64) {
        for wrapper in self.items.iter_mut() {
            wrapper.discard_until(time_us);
        }
    }

    /// Splice the front extractor's trailing output against the second
    /// entry's actual extractor (spec §4.4 step 4). A no-op unless there
    /// are at least two entries.
    pub fn configure_front_splice(&mut self) {
        if self.items.len() < 2 {
            return;
        }
        let slice = self.items.make_contiguous();
        let (front, rest) = slice.split_at_mut(1);
        front[0].extractor.configure_splice_to(rest[0].extractor.as_mut());
    }
}
