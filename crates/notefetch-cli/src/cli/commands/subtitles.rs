//! `notefetch subtitles <url>` – preview one video's normalized transcript.

use anyhow::{Context, Result};
use notefetch_core::captions::CaptionSource;
use notefetch_core::config::NotefetchConfig;

use super::setup::subtitle_fetcher;

/// First `max_chars` characters of `text`.
pub fn preview(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

pub fn run_subtitles(
    cfg: &NotefetchConfig,
    url: &str,
    lang: Option<&str>,
    preview_len: usize,
) -> Result<()> {
    let lang = lang.unwrap_or(&cfg.caption_lang);
    println!("Fetching subtitles for: {url}");
    let transcript = subtitle_fetcher(cfg, None)
        .resolve(url, lang)
        .with_context(|| format!("fetching {lang} subtitles for {url}"))?;

    if !transcript.title.is_empty() {
        println!("Title: {}", transcript.title);
    }
    println!("\n--- subtitle preview (first {preview_len} chars) ---\n");
    println!("{}", preview(&transcript.text, preview_len));
    Ok(())
}
