//! Error taxonomy shared by the acquisition pipeline.
//!
//! Variants are grouped by blast radius: `NoteNotFound` aborts the run,
//! profile/store/browser failures abort the post branch, and the caption
//! variants only fail the item they belong to.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EnrichError {
    #[error("file not found: {}", .0.display())]
    NoteNotFound(PathBuf),

    #[error("browser profile not found: {0}")]
    ProfileNotFound(String),

    #[error("cookies.sqlite not found in profile: {}", .0.display())]
    StoreMissing(PathBuf),

    #[error("no subtitles found for language '{0}'")]
    NoCaptionsForLanguage(String),

    #[error("caption fetch failed: {0}")]
    CaptionFetchFailed(String),

    /// The video metadata backend could not describe the video.
    #[error("video metadata lookup failed: {0}")]
    Metadata(String),

    #[error("cookie store: {0}")]
    CookieStore(#[from] sqlx::Error),

    #[error("browser session: {0}")]
    Browser(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_language_and_path() {
        let err = EnrichError::NoCaptionsForLanguage("de".into());
        assert_eq!(err.to_string(), "no subtitles found for language 'de'");
        let err = EnrichError::StoreMissing(PathBuf::from("/profiles/abc.default"));
        assert_eq!(
            err.to_string(),
            "cookies.sqlite not found in profile: /profiles/abc.default"
        );
    }
}
