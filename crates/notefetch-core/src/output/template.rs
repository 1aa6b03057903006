//! `{name}` filename templates.

/// Renders `template`, replacing `{name}` with `lookup(name)`.
///
/// Unknown names render as the empty string. `{{` and `}}` produce literal
/// braces; an unclosed `{` is kept as written.
pub fn render_template<'a, F>(template: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<&'a str>,
{
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(pos) = rest.find(['{', '}']) {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        if tail.starts_with("{{") {
            out.push('{');
            rest = &tail[2..];
        } else if tail.starts_with("}}") {
            out.push('}');
            rest = &tail[2..];
        } else if tail.starts_with('}') {
            out.push('}');
            rest = &tail[1..];
        } else {
            match tail[1..].find('}') {
                Some(end) => {
                    let name = &tail[1..1 + end];
                    out.push_str(lookup(name).unwrap_or(""));
                    rest = &tail[end + 2..];
                }
                None => {
                    out.push_str(tail);
                    rest = "";
                }
            }
        }
    }
    out.push_str(rest);
    out
}

/// Lower-cases, turns runs of non-alphanumerics into `-`, trims `-`.
/// Returns `untitled` when nothing alphanumeric remains.
pub fn slugify(value: &str) -> String {
    let mut slug = String::with_capacity(value.len());
    let mut pending_dash = false;
    for c in value.trim().to_lowercase().chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }
    if slug.is_empty() {
        "untitled".to_string()
    } else {
        slug
    }
}

/// Makes a free-form title safe to use as one path component.
///
/// - Replaces NUL, `/`, `\`, and control characters with `_`
/// - Trims leading/trailing spaces and dots
/// - Limits length to 255 bytes (Linux NAME_MAX)
pub fn sanitize_component(value: &str) -> String {
    const NAME_MAX: usize = 255;

    let replaced: String = value
        .chars()
        .map(|c| {
            if c == '\0' || c == '/' || c == '\\' || c.is_control() {
                '_'
            } else {
                c
            }
        })
        .collect();
    let trimmed = replaced.trim_matches(|c| c == ' ' || c == '.');

    let mut take = trimmed.len().min(NAME_MAX);
    while take > 0 && !trimmed.is_char_boundary(take) {
        take -= 1;
    }
    trimmed[..take].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup(name: &str) -> Option<&'static str> {
        match name {
            "video_id" => Some("dQw4w9WgXcQ"),
            "title_slug" => Some("never-gonna"),
            _ => None,
        }
    }

    #[test]
    fn substitutes_known_placeholders() {
        assert_eq!(render_template("yt-{video_id}.md", lookup), "yt-dQw4w9WgXcQ.md");
        assert_eq!(
            render_template("{title_slug}/{video_id}.txt", lookup),
            "never-gonna/dQw4w9WgXcQ.txt"
        );
    }

    #[test]
    fn unknown_placeholder_renders_empty() {
        assert_eq!(render_template("a{nope}b{}c.md", lookup), "abc.md");
    }

    #[test]
    fn escaped_and_unbalanced_braces() {
        assert_eq!(render_template("{{literal}}-{video_id}", lookup), "{literal}-dQw4w9WgXcQ");
        assert_eq!(render_template("open{video_id", lookup), "open{video_id");
        assert_eq!(render_template("close}x", lookup), "close}x");
    }

    #[test]
    fn slug_rules() {
        assert_eq!(slugify("  Hello, World!  "), "hello-world");
        assert_eq!(slugify("Rust 2024 -- Edition"), "rust-2024-edition");
        assert_eq!(slugify("Café Ünïcode"), "caf-n-code");
        assert_eq!(slugify("!!!"), "untitled");
    }

    #[test]
    fn sanitize_component_rules() {
        assert_eq!(sanitize_component("AC/DC: Live\\Set"), "AC_DC: Live_Set");
        assert_eq!(sanitize_component("  ..hidden.. "), "hidden");
        assert_eq!(sanitize_component("tab\there"), "tab_here");
        assert_eq!(sanitize_component(&"é".repeat(200)).len(), 254);
    }
}
