//! `notefetch enrich <note>` – save transcripts and post text for every link in a note.

use anyhow::{Context, Result};
use clap::Args;
use notefetch_core::config::NotefetchConfig;
use notefetch_core::cookies::{self, CookieFile, HostFilter, HostMatch, ProfileLocator};
use notefetch_core::enrich::{
    self, EnrichObserver, Enricher, EnrichmentReport, EnrichmentResult, ItemStatus, PostBackend,
};
use notefetch_core::links::{extract_links, LinkKind, UrlMatch};
use notefetch_core::output::{resolve_output_dir, OutputConfig};
use std::path::{Path, PathBuf};

use super::setup::{chrome_launcher, profile_locator, subtitle_fetcher};

#[derive(Debug, Args)]
pub struct EnrichArgs {
    /// Markdown note to scan for links.
    pub note: PathBuf,

    /// Where fetched items are saved. Relative paths resolve against the
    /// note's directory. Defaults to <note_dir>/staging.
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<String>,

    /// Filename template for transcripts. Placeholders: {video_id}, {title}, {title_slug}.
    #[arg(long, value_name = "TEMPLATE")]
    pub video_template: Option<String>,

    /// Filename template for posts. Placeholder: {post_id}.
    #[arg(long, value_name = "TEMPLATE")]
    pub post_template: Option<String>,

    /// Caption language code.
    #[arg(long, value_name = "LANG")]
    pub lang: Option<String>,

    /// Explicit browser profile directory holding cookies.sqlite.
    #[arg(long, value_name = "DIR")]
    pub browser_profile: Option<PathBuf>,

    /// Hand browser cookies for video hosts to the metadata backend
    /// (members-only or age-gated videos).
    #[arg(long)]
    pub video_browser_cookies: bool,

    /// Print a JSON summary of every processed URL at the end.
    #[arg(long)]
    pub json_report: bool,

    /// Launch the browser with a visible window.
    #[arg(long)]
    pub show_browser: bool,
}

/// Prints per-item progress the way the run reads on a terminal.
struct Console;

impl EnrichObserver for Console {
    fn item_started(&self, item: &UrlMatch) {
        println!("--- {}", item.url);
    }

    fn item_finished(&self, kind: LinkKind, result: &EnrichmentResult) {
        match (result.status, &result.output_path) {
            (ItemStatus::Ok, Some(path)) => println!("    saved → {}", path.display()),
            _ => {
                let what = match kind {
                    LinkKind::Video => "could not fetch subtitles",
                    LinkKind::Post => "could not fetch post",
                };
                eprintln!(
                    "    warning: {}: {}",
                    what,
                    result.error_message.as_deref().unwrap_or("unknown error")
                );
            }
        }
    }

    fn post_session_ready(&self, profile: &Path, cookies: usize) {
        println!("Using browser profile: {}", profile.display());
        println!("Loaded {} post-site cookies\n", cookies);
    }
}

fn absolute(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}

/// Exports video-host cookies to a temp Netscape file; removed when dropped.
async fn video_cookie_file(
    locator: &ProfileLocator,
    explicit: Option<&Path>,
    mode: HostMatch,
) -> Result<CookieFile> {
    let profile = locator.find_profile(explicit)?;
    let jar = cookies::read_jar(&profile, &HostFilter::video_hosts(mode))
        .await
        .with_context(|| format!("reading cookies from {}", profile.display()))?;
    tracing::info!(cookies = jar.len(), "exporting video-site cookies");
    Ok(cookies::export_netscape(&jar)?)
}

pub async fn run_enrich(cfg: &NotefetchConfig, args: EnrichArgs) -> Result<()> {
    let note = absolute(&args.note)?;
    let text = enrich::read_note(&note)?;
    let name = note
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| note.display().to_string());

    let links = extract_links(&text);
    if links.is_empty() {
        println!("No video or post URLs found in {}.", name);
        return Ok(());
    }
    println!(
        "Found {} video URL(s) and {} post URL(s) in {}",
        links.videos.len(),
        links.posts.len(),
        name
    );

    let out_dir = resolve_output_dir(&note, args.output_dir.as_deref().or(cfg.output_dir.as_deref()));
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("creating output directory {}", out_dir.display()))?;
    let output = OutputConfig::new(
        out_dir,
        args.video_template.unwrap_or_else(|| cfg.video_template.clone()),
        args.post_template.unwrap_or_else(|| cfg.post_template.clone()),
    );

    let locator = profile_locator(cfg);
    let explicit_profile = args.browser_profile.or_else(|| cfg.browser_profile.clone());

    let cookie_file = if args.video_browser_cookies && !links.videos.is_empty() {
        Some(video_cookie_file(&locator, explicit_profile.as_deref(), cfg.host_match).await?)
    } else {
        None
    };
    let fetcher = subtitle_fetcher(cfg, cookie_file.as_ref().map(|f| f.path().to_path_buf()));
    let launcher = chrome_launcher(cfg, args.show_browser);

    let enricher = Enricher::new(
        output,
        args.lang.unwrap_or_else(|| cfg.caption_lang.clone()),
        &fetcher,
        PostBackend {
            locator,
            explicit_profile,
            host_match: cfg.host_match,
            launcher: &launcher,
        },
    )
    .with_observer(&Console);

    let video = enricher.run_videos(&links.videos);
    drop(cookie_file);
    let post = enricher
        .run_posts(&links.posts)
        .await
        .context("post processing aborted")?;

    let report = EnrichmentReport { video, post };
    tracing::info!(
        saved = report.saved(),
        failed = report.failed(),
        "enrichment finished for {}",
        note.display()
    );
    if args.json_report {
        println!("{}", report.to_json()?);
    }
    Ok(())
}
