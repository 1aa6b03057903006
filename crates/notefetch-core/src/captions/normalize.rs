//! Cue payload (VTT/SRT) to plain prose.
//!
//! Rules run per trimmed line, in order; later rules assume the earlier
//! line filters already ran.

use once_cell::sync::Lazy;
use regex::Regex;

static TIMECODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:\d{1,2}:)?\d{2}:\d{2}[.,]\d{3}$").expect("timecode pattern"));
static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").expect("tag pattern"));
static STAGE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[[^\]]*\]").expect("stage pattern"));
static SPEAKER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^>+\s*").expect("speaker pattern"));

const METADATA_PREFIXES: [&str; 2] = ["kind:", "language:"];
const CUE_SETTING_PREFIXES: [&str; 5] = ["position:", "align:", "line:", "size:", "region:"];

fn starts_with_any_ignore_case(line: &str, prefixes: &[&str]) -> bool {
    prefixes.iter().any(|p| {
        line.len() >= p.len()
            && line.is_char_boundary(p.len())
            && line[..p.len()].eq_ignore_ascii_case(p)
    })
}

/// True for lines that carry no spoken text.
fn is_structural(line: &str) -> bool {
    if line.starts_with("WEBVTT") || line.starts_with("NOTE") {
        return true;
    }
    if line.contains("X-TIMESTAMP-MAP") {
        return true;
    }
    if starts_with_any_ignore_case(line, &METADATA_PREFIXES) {
        return true;
    }
    if line.bytes().all(|b| b.is_ascii_digit()) {
        return true;
    }
    if line.contains("-->") || TIMECODE_RE.is_match(line) {
        return true;
    }
    starts_with_any_ignore_case(line, &CUE_SETTING_PREFIXES)
}

/// Strips markup from one text line and normalizes its whitespace.
fn clean_text(line: &str) -> String {
    let text = TAG_RE.replace_all(line, "");
    let text = STAGE_RE.replace_all(&text, "");
    let text = html_escape::decode_html_entities(&text);
    let text = SPEAKER_RE.replace(&text, "");
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Cleaned text lines, with consecutive duplicates suppressed.
pub fn caption_lines(raw: &str) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    for line in raw.lines() {
        let line = line.trim();
        if line.is_empty() || is_structural(line) {
            continue;
        }
        let text = clean_text(line);
        if text.is_empty() {
            continue;
        }
        if lines.last().map(String::as_str) != Some(text.as_str()) {
            lines.push(text);
        }
    }
    lines
}

/// Normalizes a whole cue payload into one space-joined paragraph.
pub fn normalize_captions(raw: &str) -> String {
    caption_lines(raw).join(" ")
}
