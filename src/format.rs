// Media format descriptors and variant overlay (spec §3, §4.2).

use std::cmp::Ordering;

/// The coarse classification used to rank tracks when choosing the primary
/// extractor track (video > audio > other), per §4.2 step 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TrackType {
    Other,
    Audio,
    Video,
}

impl TrackType {
    pub fn from_mime(mime: &str) -> Self {
        if mime.starts_with("video/") {
            TrackType::Video
        } else if mime.starts_with("audio/") {
            TrackType::Audio
        } else {
            TrackType::Other
        }
    }
}

/// A track's media format, as produced by an `Extractor` or a `ChunkSource`
/// variant. Fields beyond `mime_type` are optional because not every
/// producer knows every field up front.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaFormat {
    pub id: Option<String>,
    pub mime_type: String,
    pub bitrate: Option<u32>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub language: Option<String>,
    pub sample_rate: Option<u32>,
    pub channel_count: Option<u32>,
}

impl MediaFormat {
    pub fn new(mime_type: impl Into<String>) -> Self {
        Self {
            id: None,
            mime_type: mime_type.into(),
            bitrate: None,
            width: None,
            height: None,
            language: None,
            sample_rate: None,
            channel_count: None,
        }
    }

    pub fn track_type(&self) -> TrackType {
        TrackType::from_mime(&self.mime_type)
    }

    /// Overlay `variant`'s identifying fields onto a copy of this format,
    /// per §4.2 step 4 ("each formed by overlaying the variant's id,
    /// bitrate, width, height, and language onto the primary track's
    /// media format").
    pub fn overlaid_with(&self, variant: &VariantInfo) -> Self {
        Self {
            id: variant.id.clone().or_else(|| self.id.clone()),
            mime_type: self.mime_type.clone(),
            bitrate: variant.bitrate.or(self.bitrate),
            width: variant.width.or(self.width),
            height: variant.height.or(self.height),
            language: variant.language.clone().or_else(|| self.language.clone()),
            sample_rate: self.sample_rate,
            channel_count: self.channel_count,
        }
    }
}

impl PartialOrd for TrackType {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// The identifying fields of a bitrate variant, as exposed by
/// `ChunkSource::track_format`. Distinct from `MediaFormat` because a
/// variant only ever contributes a handful of fields to the overlay; it
/// never carries sample-level details like `sample_rate`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariantInfo {
    pub id: Option<String>,
    pub bitrate: Option<u32>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub language: Option<String>,
}

impl VariantInfo {
    pub fn from_format(format: &MediaFormat) -> Self {
        Self {
            id: format.id.clone(),
            bitrate: format.bitrate,
            width: format.width,
            height: format.height,
            language: format.language.clone(),
        }
    }
}
