//! Caption track model and selection.

use std::collections::HashMap;

use crate::error::EnrichError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackOrigin {
    /// Uploaded by the video owner.
    Manual,
    /// Generated by speech recognition.
    Automatic,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptionTrack {
    pub lang: String,
    /// Container/format name as reported by the backend (e.g. "vtt", "srv3").
    pub format: String,
    pub source_url: String,
    pub origin: TrackOrigin,
}

/// What the metadata backend knows about one video.
#[derive(Debug, Clone, Default)]
pub struct VideoMetadata {
    pub title: String,
    pub manual: HashMap<String, Vec<CaptionTrack>>,
    pub automatic: HashMap<String, Vec<CaptionTrack>>,
}

impl VideoMetadata {
    /// Manual tracks for `lang` if any exist, otherwise automatic ones.
    pub fn tracks_for(&self, lang: &str) -> Option<&[CaptionTrack]> {
        [&self.manual, &self.automatic]
            .into_iter()
            .filter_map(|by_lang| by_lang.get(lang))
            .find(|tracks| !tracks.is_empty())
            .map(Vec::as_slice)
    }
}

/// Picks one entry out of a non-empty track list.
///
/// Backends list formats without a quality ranking, so the choice is a
/// heuristic and kept replaceable.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TrackStrategy {
    /// The last listed entry.
    #[default]
    LastListed,
    /// The last entry with this format, else the last entry.
    PreferFormat(String),
}

impl TrackStrategy {
    pub fn from_format(format: Option<&str>) -> Self {
        match format {
            Some(f) if !f.trim().is_empty() => TrackStrategy::PreferFormat(f.trim().to_string()),
            _ => TrackStrategy::LastListed,
        }
    }

    pub fn pick<'a>(&self, tracks: &'a [CaptionTrack]) -> Option<&'a CaptionTrack> {
        match self {
            TrackStrategy::LastListed => tracks.last(),
            TrackStrategy::PreferFormat(format) => tracks
                .iter()
                .rev()
                .find(|t| t.format.eq_ignore_ascii_case(format))
                .or_else(|| tracks.last()),
        }
    }
}

/// Chooses the track to download for `lang`.
pub fn select_track<'a>(
    meta: &'a VideoMetadata,
    lang: &str,
    strategy: &TrackStrategy,
) -> Result<&'a CaptionTrack, EnrichError> {
    meta.tracks_for(lang)
        .and_then(|tracks| strategy.pick(tracks))
        .ok_or_else(|| EnrichError::NoCaptionsForLanguage(lang.to_string()))
}
