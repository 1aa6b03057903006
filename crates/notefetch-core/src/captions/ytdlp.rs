//! Video metadata backend backed by the `yt-dlp` executable.

use serde::Deserialize;
use std::collections::HashMap;
use std::path::PathBuf;
use std::process::Command;

use super::track::{CaptionTrack, TrackOrigin, VideoMetadata};
use super::VideoMetadataSource;
use crate::error::EnrichError;

#[derive(Debug, Deserialize)]
struct InfoJson {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    subtitles: Option<HashMap<String, Vec<TrackJson>>>,
    #[serde(default)]
    automatic_captions: Option<HashMap<String, Vec<TrackJson>>>,
}

#[derive(Debug, Deserialize)]
struct TrackJson {
    #[serde(default)]
    ext: Option<String>,
    #[serde(default)]
    url: Option<String>,
}

fn tracks_by_lang(
    raw: Option<HashMap<String, Vec<TrackJson>>>,
    origin: TrackOrigin,
) -> HashMap<String, Vec<CaptionTrack>> {
    raw.unwrap_or_default()
        .into_iter()
        .map(|(lang, entries)| {
            let tracks = entries
                .into_iter()
                .filter_map(|entry| {
                    Some(CaptionTrack {
                        lang: lang.clone(),
                        format: entry.ext.unwrap_or_default(),
                        source_url: entry.url?,
                        origin,
                    })
                })
                .collect();
            (lang, tracks)
        })
        .collect()
}

/// Parses the `--dump-single-json` document.
pub fn parse_info_json(json: &str) -> Result<VideoMetadata, EnrichError> {
    let info: InfoJson = serde_json::from_str(json)
        .map_err(|e| EnrichError::Metadata(format!("parse yt-dlp JSON: {e}")))?;
    Ok(VideoMetadata {
        title: info.title.unwrap_or_default().trim().to_string(),
        manual: tracks_by_lang(info.subtitles, TrackOrigin::Manual),
        automatic: tracks_by_lang(info.automatic_captions, TrackOrigin::Automatic),
    })
}

/// Runs `yt-dlp --dump-single-json --skip-download` for each lookup.
#[derive(Debug, Clone)]
pub struct YtDlp {
    program: String,
    cookie_file: Option<PathBuf>,
}

impl YtDlp {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            cookie_file: None,
        }
    }

    /// Netscape cookie file passed through `--cookies`.
    pub fn with_cookie_file(mut self, path: Option<PathBuf>) -> Self {
        self.cookie_file = path;
        self
    }

    fn command(&self, url: &str) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(["--dump-single-json", "--skip-download", "--no-warnings", "--no-playlist"]);
        if let Some(cookies) = &self.cookie_file {
            cmd.arg("--cookies").arg(cookies);
        }
        cmd.arg("--").arg(url);
        cmd
    }
}

impl VideoMetadataSource for YtDlp {
    fn video_metadata(&self, url: &str) -> Result<VideoMetadata, EnrichError> {
        tracing::debug!(program = %self.program, url, "querying video metadata");
        let output = self
            .command(url)
            .output()
            .map_err(|e| EnrichError::Metadata(format!("run {}: {e}", self.program)))?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let reason = stderr
                .lines()
                .rev()
                .find(|l| !l.trim().is_empty())
                .unwrap_or("no error output")
                .trim()
                .to_string();
            return Err(EnrichError::Metadata(format!(
                "{} exited with {}: {}",
                self.program, output.status, reason
            )));
        }
        parse_info_json(&String::from_utf8_lossy(&output.stdout))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_manual_and_automatic_tracks() {
        let json = r#"{
            "id": "dQw4w9WgXcQ",
            "title": "  Never Gonna  ",
            "subtitles": {
                "en": [
                    {"ext": "json3", "url": "https://c.example/en.json3"},
                    {"ext": "vtt", "url": "https://c.example/en.vtt"}
                ]
            },
            "automatic_captions": {
                "en": [{"ext": "vtt", "url": "https://c.example/auto.vtt"}],
                "de": [{"ext": "vtt"}]
            }
        }"#;
        let meta = parse_info_json(json).unwrap();
        assert_eq!(meta.title, "Never Gonna");
        let manual = &meta.manual["en"];
        assert_eq!(manual.len(), 2);
        assert_eq!(manual[1].format, "vtt");
        assert_eq!(manual[1].origin, TrackOrigin::Manual);
        assert_eq!(meta.automatic["en"][0].origin, TrackOrigin::Automatic);
        assert!(meta.automatic["de"].is_empty());
    }

    #[test]
    fn null_caption_maps_are_empty() {
        let meta = parse_info_json(r#"{"subtitles": null, "automatic_captions": null}"#).unwrap();
        assert_eq!(meta.title, "");
        assert!(meta.manual.is_empty());
        assert!(meta.automatic.is_empty());
    }

    #[test]
    fn invalid_json_is_metadata_error() {
        assert!(matches!(
            parse_info_json("ERROR: not json"),
            Err(EnrichError::Metadata(_))
        ));
    }

    #[test]
    fn command_passes_cookie_file_before_url() {
        let ytdlp = YtDlp::new("yt-dlp").with_cookie_file(Some(PathBuf::from("/tmp/c.cookies")));
        let cmd = ytdlp.command("https://youtu.be/dQw4w9WgXcQ");
        let args: Vec<_> = cmd.get_args().map(|a| a.to_string_lossy().into_owned()).collect();
        let cookies_at = args.iter().position(|a| a == "--cookies").unwrap();
        assert_eq!(args[cookies_at + 1], "/tmp/c.cookies");
        assert_eq!(args.last().unwrap(), "https://youtu.be/dQw4w9WgXcQ");
        assert_eq!(args[args.len() - 2], "--");
    }

    #[test]
    fn missing_program_is_metadata_error() {
        let ytdlp = YtDlp::new("/nonexistent/notefetch-yt-dlp");
        let err = ytdlp.video_metadata("https://youtu.be/dQw4w9WgXcQ").unwrap_err();
        assert!(matches!(err, EnrichError::Metadata(_)));
    }
}
