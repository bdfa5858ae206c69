// Track-group synthesis (spec §4.2 `buildTracks`): combines the two
// orthogonal axes — bitrate variants from the Chunk Source and in-segment
// elementary tracks from the Extractor — into externally visible groups.

use crate::format::{MediaFormat, TrackType, VariantInfo};

#[derive(Debug, Clone, PartialEq)]
pub struct TrackGroup {
    pub formats: Vec<MediaFormat>,
    pub is_adaptive: bool,
}

impl TrackGroup {
    pub fn len(&self) -> usize {
        self.formats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.formats.is_empty()
    }

    pub fn format(&self, index: usize) -> &MediaFormat {
        &self.formats[index]
    }
}

#[derive(Debug, Clone, Default)]
pub struct TrackGroupArray(pub Vec<TrackGroup>);

impl TrackGroupArray {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&TrackGroup> {
        self.0.get(index)
    }
}

/// Per-group bookkeeping the source keeps alongside each `TrackGroup`.
/// The group index doubles as the extractor track index (§4.2: "one group
/// per extractor track").
#[derive(Debug, Clone, Default)]
pub struct GroupState {
    pub enabled: bool,
    pub pending_reset: bool,
    pub downstream_media_format: Option<MediaFormat>,
}

pub struct BuiltTracks {
    pub groups: TrackGroupArray,
    pub primary_group_index: Option<usize>,
}

/// Synthesize the externally visible track groups from a prepared
/// extractor's in-segment tracks and the chunk source's bitrate variants.
pub fn build_tracks(extractor_formats: &[MediaFormat], variants: &[VariantInfo]) -> BuiltTracks {
    let primary_type = extractor_formats
        .iter()
        .map(|f| f.track_type())
        .max()
        .unwrap_or(TrackType::Other);

    let primary_candidates: Vec<usize> = extractor_formats
        .iter()
        .enumerate()
        .filter(|(_, f)| f.track_type() == primary_type)
        .map(|(i, _)| i)
        .collect();

    let primary_index = if primary_candidates.len() == 1 {
        Some(primary_candidates[0])
    } else {
        None
    };

    let groups = extractor_formats
        .iter()
        .enumerate()
        .map(|(i, fmt)| {
            if Some(i) == primary_index && !variants.is_empty() {
                let formats = variants.iter().map(|v| fmt.overlaid_with(v)).collect();
                TrackGroup { formats, is_adaptive: true }
            } else {
                TrackGroup { formats: vec![fmt.clone()], is_adaptive: false }
            }
        })
        .collect();

    BuiltTracks {
        groups: TrackGroupArray(groups),
        primary_group_index: primary_index,
    }
}
