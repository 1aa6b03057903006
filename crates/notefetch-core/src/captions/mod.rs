//! Subtitle fetcher: caption track lookup, download, and normalization.
//!
//! The metadata backend (which tracks exist for a video) sits behind
//! [`VideoMetadataSource`]; the orchestrator only sees [`CaptionSource`].

mod fetch;
mod normalize;
mod track;
mod ytdlp;

pub use fetch::fetch_caption_payload;
pub use normalize::{caption_lines, normalize_captions};
pub use track::{select_track, CaptionTrack, TrackOrigin, TrackStrategy, VideoMetadata};
pub use ytdlp::{parse_info_json, YtDlp};

use std::time::Duration;

use crate::error::EnrichError;

/// Title plus normalized caption prose for one video.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript {
    pub title: String,
    pub text: String,
}

/// Resolves caption tracks for a video URL.
pub trait VideoMetadataSource {
    fn video_metadata(&self, url: &str) -> Result<VideoMetadata, EnrichError>;
}

/// Turns a video URL into a transcript.
pub trait CaptionSource {
    fn resolve(&self, url: &str, lang: &str) -> Result<Transcript, EnrichError>;
}

/// Default timeout for one caption download.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(30);

pub struct SubtitleFetcher<M> {
    metadata: M,
    strategy: TrackStrategy,
    timeout: Duration,
}

impl<M: VideoMetadataSource> SubtitleFetcher<M> {
    pub fn new(metadata: M) -> Self {
        Self {
            metadata,
            strategy: TrackStrategy::default(),
            timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }

    pub fn with_strategy(mut self, strategy: TrackStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl<M: VideoMetadataSource> CaptionSource for SubtitleFetcher<M> {
    fn resolve(&self, url: &str, lang: &str) -> Result<Transcript, EnrichError> {
        let meta = self.metadata.video_metadata(url)?;
        let track = select_track(&meta, lang, &self.strategy)?;
        tracing::debug!(
            url,
            lang,
            format = %track.format,
            origin = ?track.origin,
            "selected caption track"
        );
        let raw = fetch_caption_payload(&track.source_url, self.timeout)?;
        Ok(Transcript {
            title: meta.title,
            text: normalize_captions(&raw),
        })
    }
}
