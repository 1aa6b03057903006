use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::cookies::HostMatch;

/// Network and browser wait bounds (optional section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeoutConfig {
    /// Total timeout for one caption payload download.
    pub caption_fetch_secs: u64,
    /// How long the post scraper waits for the post text node.
    pub post_wait_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            caption_fetch_secs: 30,
            post_wait_secs: 15,
        }
    }
}

impl TimeoutConfig {
    pub fn caption_fetch(&self) -> Duration {
        Duration::from_secs(self.caption_fetch_secs.max(1))
    }

    pub fn post_wait(&self) -> Duration {
        Duration::from_secs(self.post_wait_secs.max(1))
    }
}

/// Global configuration loaded from `~/.config/notefetch/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotefetchConfig {
    /// Filename template for video transcripts. Placeholders: `{video_id}`, `{title}`, `{title_slug}`.
    pub video_template: String,
    /// Filename template for post text. Placeholder: `{post_id}`.
    pub post_template: String,
    /// Caption language code.
    pub caption_lang: String,
    /// Output directory; relative paths resolve against the note's directory.
    /// None = `<note_dir>/staging`.
    #[serde(default)]
    pub output_dir: Option<String>,
    /// Explicit browser profile directory (skips the profile search).
    #[serde(default)]
    pub browser_profile: Option<PathBuf>,
    /// Directory searched for profiles when no explicit profile is given.
    #[serde(default)]
    pub profiles_root: Option<PathBuf>,
    /// How cookie hosts are matched against the wanted domains.
    #[serde(default)]
    pub host_match: HostMatch,
    /// Launch the browser with a visible window.
    #[serde(default)]
    pub show_browser: bool,
    /// Chromium/Chrome binary for the post scraper. None = search the usual locations.
    #[serde(default)]
    pub chrome_executable: Option<PathBuf>,
    /// Program used as the video metadata backend.
    #[serde(default = "default_ytdlp_program")]
    pub ytdlp_program: String,
    /// Preferred caption format (e.g. "vtt"); None = last listed track.
    #[serde(default)]
    pub track_format: Option<String>,
    #[serde(default)]
    pub timeouts: TimeoutConfig,
}

fn default_ytdlp_program() -> String {
    "yt-dlp".to_string()
}

impl Default for NotefetchConfig {
    fn default() -> Self {
        Self {
            video_template: "yt-{video_id}.md".to_string(),
            post_template: "x-{post_id}.md".to_string(),
            caption_lang: "en".to_string(),
            output_dir: None,
            browser_profile: None,
            profiles_root: None,
            host_match: HostMatch::default(),
            show_browser: false,
            chrome_executable: None,
            ytdlp_program: default_ytdlp_program(),
            track_format: None,
            timeouts: TimeoutConfig::default(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("notefetch")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<NotefetchConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = NotefetchConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: NotefetchConfig = toml::from_str(&data)?;
    Ok(cfg)
}
