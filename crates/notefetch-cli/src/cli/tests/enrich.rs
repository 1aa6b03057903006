//! Tests for the enrich subcommand.

use super::parse;
use crate::cli::commands::{run_enrich, EnrichArgs};
use crate::cli::{Cli, CliCommand};
use clap::Parser;
use notefetch_core::config::NotefetchConfig;
use std::path::Path;

fn args_for(note: &Path) -> EnrichArgs {
    match parse(&["notefetch", "enrich", note.to_str().unwrap()]) {
        CliCommand::Enrich(args) => args,
        _ => panic!("expected Enrich"),
    }
}

#[test]
fn cli_parse_enrich_defaults() {
    match parse(&["notefetch", "enrich", "notes/today.md"]) {
        CliCommand::Enrich(args) => {
            assert_eq!(args.note, Path::new("notes/today.md"));
            assert!(args.output_dir.is_none());
            assert!(args.video_template.is_none());
            assert!(args.post_template.is_none());
            assert!(args.lang.is_none());
            assert!(args.browser_profile.is_none());
            assert!(!args.video_browser_cookies);
            assert!(!args.json_report);
            assert!(!args.show_browser);
        }
        _ => panic!("expected Enrich"),
    }
}

#[test]
fn cli_parse_enrich_all_flags() {
    match parse(&[
        "notefetch",
        "enrich",
        "today.md",
        "--output-dir",
        "cache",
        "--video-template",
        "{title_slug}.md",
        "--post-template",
        "post-{post_id}.md",
        "--lang",
        "de",
        "--browser-profile",
        "/tmp/profile",
        "--video-browser-cookies",
        "--json-report",
        "--show-browser",
    ]) {
        CliCommand::Enrich(args) => {
            assert_eq!(args.output_dir.as_deref(), Some("cache"));
            assert_eq!(args.video_template.as_deref(), Some("{title_slug}.md"));
            assert_eq!(args.post_template.as_deref(), Some("post-{post_id}.md"));
            assert_eq!(args.lang.as_deref(), Some("de"));
            assert_eq!(args.browser_profile.as_deref(), Some(Path::new("/tmp/profile")));
            assert!(args.video_browser_cookies);
            assert!(args.json_report);
            assert!(args.show_browser);
        }
        _ => panic!("expected Enrich with flags"),
    }
}

#[test]
fn cli_parse_enrich_requires_note() {
    assert!(Cli::try_parse_from(["notefetch", "enrich"]).is_err());
}

#[tokio::test]
async fn enrich_missing_note_is_error() {
    let dir = tempfile::tempdir().unwrap();
    let note = dir.path().join("absent.md");
    let err = run_enrich(&NotefetchConfig::default(), args_for(&note))
        .await
        .unwrap_err();
    assert!(format!("{err:#}").contains("file not found"), "{err:#}");
}

#[tokio::test]
async fn enrich_note_without_links_succeeds_and_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let note = dir.path().join("plain.md");
    std::fs::write(&note, "# Groceries\n\n- https://example.com/not-a-video\n").unwrap();
    run_enrich(&NotefetchConfig::default(), args_for(&note))
        .await
        .unwrap();
    assert!(!dir.path().join("staging").exists());
}
