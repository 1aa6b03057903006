//! Output placement: templated artifact paths and artifact bodies.
//!
//! Path computation is pure; nothing touches the filesystem until
//! [`write_artifact`].

mod template;

pub use template::{render_template, sanitize_component, slugify};

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Name of the default output directory beside the note.
pub const DEFAULT_OUTPUT_DIR: &str = "staging";

#[derive(Debug, Clone)]
pub struct OutputConfig {
    pub base_dir: PathBuf,
    pub video_template: String,
    pub post_template: String,
}

impl OutputConfig {
    pub fn new(
        base_dir: impl Into<PathBuf>,
        video_template: impl Into<String>,
        post_template: impl Into<String>,
    ) -> Self {
        Self {
            base_dir: base_dir.into(),
            video_template: video_template.into(),
            post_template: post_template.into(),
        }
    }

    /// Placeholders: `{video_id}`, `{title}`, `{title_slug}`. A blank title
    /// slugs to the video id.
    pub fn video_path(&self, video_id: &str, title: &str) -> PathBuf {
        let title_slug = if title.trim().is_empty() {
            video_id.to_string()
        } else {
            slugify(title)
        };
        let safe_title = sanitize_component(title);
        let name = render_template(&self.video_template, |key| match key {
            "video_id" => Some(video_id),
            "title" => Some(safe_title.as_str()),
            "title_slug" => Some(title_slug.as_str()),
            _ => None,
        });
        self.base_dir.join(name)
    }

    /// Placeholder: `{post_id}`.
    pub fn post_path(&self, post_id: &str) -> PathBuf {
        let name = render_template(&self.post_template, |key| match key {
            "post_id" => Some(post_id),
            _ => None,
        });
        self.base_dir.join(name)
    }
}

/// `# <title>` (when present), the URL, and the text, separated by blank
/// lines, ending in exactly one newline.
pub fn video_artifact(title: &str, url: &str, text: &str) -> String {
    let heading = if title.is_empty() {
        String::new()
    } else {
        format!("# {title}")
    };
    let sections: Vec<&str> = [heading.as_str(), url, text]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect();
    format!("{}\n", sections.join("\n\n").trim())
}

/// The URL, a blank line, then the post text (no trailing newline added).
pub fn post_artifact(url: &str, text: &str) -> String {
    format!("{url}\n\n{text}")
}

/// Creates the parent directory if needed and writes `content`.
pub fn write_artifact(path: &Path, content: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)
}

/// Output directory for a note: `raw` (with `~` expanded, relative paths
/// resolved against the note's directory) or `<note_dir>/staging`.
pub fn resolve_output_dir(note: &Path, raw: Option<&str>) -> PathBuf {
    let note_dir = note.parent().unwrap_or_else(|| Path::new("."));
    match raw.map(str::trim).filter(|r| !r.is_empty()) {
        Some(raw) => {
            let candidate = match raw.strip_prefix("~/") {
                Some(rest) => dirs::home_dir()
                    .map(|home| home.join(rest))
                    .unwrap_or_else(|| PathBuf::from(raw)),
                None => PathBuf::from(raw),
            };
            if candidate.is_absolute() {
                candidate
            } else {
                note_dir.join(candidate)
            }
        }
        None => note_dir.join(DEFAULT_OUTPUT_DIR),
    }
}
