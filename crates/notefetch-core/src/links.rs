//! Link discovery: finds video and post URLs in note text.
//!
//! Each pattern captures the platform-native id alongside the full URL.
//! Results are not deduplicated; a URL repeated in the note is processed
//! (and written) once per occurrence.

use once_cell::sync::Lazy;
use regex::Regex;

static VIDEO_URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"https?://(?:www\.)?(?:youtube\.com/watch\?(?:[^\s#]*&)?v=([A-Za-z0-9_-]{11})|youtu\.be/([A-Za-z0-9_-]{11}))[^\s]*",
    )
    .expect("video URL pattern")
});

static POST_URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"https?://(?:x|twitter)\.com/\w+/status/(\d+)[^\s]*").expect("post URL pattern")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    Video,
    Post,
}

/// One discovered link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlMatch {
    /// Full matched URL, including any trailing query/path noise.
    pub url: String,
    /// Video id or post id.
    pub id: String,
    pub kind: LinkKind,
}

/// Links found in a note, one ordered list per kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedLinks {
    pub videos: Vec<UrlMatch>,
    pub posts: Vec<UrlMatch>,
}

impl ExtractedLinks {
    pub fn is_empty(&self) -> bool {
        self.videos.is_empty() && self.posts.is_empty()
    }
}

/// Scans `text` for video and post URLs, in first-occurrence order.
pub fn extract_links(text: &str) -> ExtractedLinks {
    let videos = VIDEO_URL_RE
        .captures_iter(text)
        .filter_map(|caps| {
            let url = caps.get(0)?.as_str();
            let id = caps.get(1).or_else(|| caps.get(2))?.as_str();
            Some(UrlMatch {
                url: url.to_string(),
                id: id.to_string(),
                kind: LinkKind::Video,
            })
        })
        .collect();

    let posts = POST_URL_RE
        .captures_iter(text)
        .filter_map(|caps| {
            Some(UrlMatch {
                url: caps.get(0)?.as_str().to_string(),
                id: caps.get(1)?.as_str().to_string(),
                kind: LinkKind::Post,
            })
        })
        .collect();

    ExtractedLinks { videos, posts }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(matches: &[UrlMatch]) -> Vec<&str> {
        matches.iter().map(|m| m.id.as_str()).collect()
    }

    #[test]
    fn short_video_and_post_links() {
        let links = extract_links(
            "see https://youtu.be/dQw4w9WgXcQ and https://x.com/alice/status/123456789",
        );
        assert_eq!(links.videos.len(), 1);
        assert_eq!(links.videos[0].id, "dQw4w9WgXcQ");
        assert_eq!(links.videos[0].url, "https://youtu.be/dQw4w9WgXcQ");
        assert_eq!(links.posts.len(), 1);
        assert_eq!(links.posts[0].id, "123456789");
        assert_eq!(links.posts[0].kind, LinkKind::Post);
    }

    #[test]
    fn long_form_with_surrounding_query_params() {
        let text = "- https://www.youtube.com/watch?list=PL1&v=akM6P97_0B8&t=1s\n\
                    - http://youtube.com/watch?v=abcdefghijk";
        let links = extract_links(text);
        assert_eq!(ids(&links.videos), vec!["akM6P97_0B8", "abcdefghijk"]);
        assert_eq!(
            links.videos[0].url,
            "https://www.youtube.com/watch?list=PL1&v=akM6P97_0B8&t=1s"
        );
        assert!(links.posts.is_empty());
    }

    #[test]
    fn twitter_host_and_trailing_noise() {
        let links = extract_links("https://twitter.com/bob_1/status/42?s=20 done");
        assert_eq!(links.posts.len(), 1);
        assert_eq!(links.posts[0].id, "42");
        assert_eq!(links.posts[0].url, "https://twitter.com/bob_1/status/42?s=20");
    }

    #[test]
    fn repeated_urls_are_kept() {
        let text = "https://youtu.be/dQw4w9WgXcQ\nhttps://youtu.be/dQw4w9WgXcQ";
        let links = extract_links(text);
        assert_eq!(ids(&links.videos), vec!["dQw4w9WgXcQ", "dQw4w9WgXcQ"]);
    }

    #[test]
    fn order_follows_first_occurrence() {
        let text = "https://x.com/a/status/3 https://x.com/b/status/1 https://x.com/c/status/2";
        assert_eq!(ids(&extract_links(text).posts), vec!["3", "1", "2"]);
    }

    #[test]
    fn unrelated_and_malformed_links_ignored() {
        let text = "https://example.com/watch?v=dQw4w9WgXcQ \
                    https://x.com/alice/likes \
                    https://youtu.be/short \
                    HTTPS://YOUTU.BE/dQw4w9WgXcQ";
        assert!(extract_links(text).is_empty());
    }

    #[test]
    fn captured_ids_are_embedded_in_their_urls() {
        let text = "a https://youtu.be/AAAAAAAAAAA b https://www.youtube.com/watch?v=BBBBBBBBBBB&x=1 \
                    c https://x.com/u/status/777 d https://twitter.com/v/status/888/photo/1";
        let links = extract_links(text);
        for m in links.videos.iter().chain(links.posts.iter()) {
            assert!(m.url.contains(&m.id), "{} not in {}", m.id, m.url);
        }
        assert_eq!(links.videos.len(), 2);
        assert_eq!(links.posts.len(), 2);
    }
}
