//! Enrichment orchestrator: links in, one artifact (or recorded error) per link out.
//!
//! Videos run first, each isolated from the others' failures. Posts run
//! second inside one browser session; failing to set that session up
//! (profile, cookie store, launch) aborts the whole post branch.

mod result;

pub use result::{EnrichmentReport, EnrichmentResult, ItemStatus, PendingResult};

use std::path::{Path, PathBuf};

use crate::captions::CaptionSource;
use crate::cookies::{self, HostFilter, HostMatch, ProfileLocator};
use crate::error::EnrichError;
use crate::links::{extract_links, ExtractedLinks, LinkKind, UrlMatch};
use crate::output::{self, OutputConfig};
use crate::posts::{PostSession, ScrapeOutcome, SessionLauncher};

/// Reads the note as UTF-8 text.
pub fn read_note(path: &Path) -> Result<String, EnrichError> {
    if !path.is_file() {
        return Err(EnrichError::NoteNotFound(path.to_path_buf()));
    }
    Ok(std::fs::read_to_string(path)?)
}

/// Progress hooks for a front end. All methods default to no-ops.
pub trait EnrichObserver {
    fn item_started(&self, _item: &UrlMatch) {}
    fn item_finished(&self, _kind: LinkKind, _result: &EnrichmentResult) {}
    fn post_session_ready(&self, _profile: &Path, _cookies: usize) {}
}

/// Observer that ignores every event.
pub struct NoopObserver;

impl EnrichObserver for NoopObserver {}

/// Where post-branch cookies and the browser come from.
pub struct PostBackend<'a> {
    pub locator: ProfileLocator,
    pub explicit_profile: Option<PathBuf>,
    pub host_match: HostMatch,
    pub launcher: &'a dyn SessionLauncher,
}

pub struct Enricher<'a> {
    output: OutputConfig,
    lang: String,
    captions: &'a dyn CaptionSource,
    posts: PostBackend<'a>,
    observer: &'a dyn EnrichObserver,
}

impl<'a> Enricher<'a> {
    pub fn new(
        output: OutputConfig,
        lang: impl Into<String>,
        captions: &'a dyn CaptionSource,
        posts: PostBackend<'a>,
    ) -> Self {
        Self {
            output,
            lang: lang.into(),
            captions,
            posts,
            observer: &NoopObserver,
        }
    }

    pub fn with_observer(mut self, observer: &'a dyn EnrichObserver) -> Self {
        self.observer = observer;
        self
    }

    /// Extracts links from note text and runs both branches.
    pub async fn run(&self, text: &str) -> Result<EnrichmentReport, EnrichError> {
        self.run_links(&extract_links(text)).await
    }

    /// Runs both branches. A post-branch setup failure is returned as the error.
    pub async fn run_links(&self, links: &ExtractedLinks) -> Result<EnrichmentReport, EnrichError> {
        let video = self.run_videos(&links.videos);
        let post = self.run_posts(&links.posts).await?;
        Ok(EnrichmentReport { video, post })
    }

    /// Processes video links in order; failures are recorded per item.
    pub fn run_videos(&self, items: &[UrlMatch]) -> Vec<EnrichmentResult> {
        items.iter().map(|item| self.process_video(item)).collect()
    }

    fn process_video(&self, item: &UrlMatch) -> EnrichmentResult {
        self.observer.item_started(item);
        let pending = PendingResult::begin(item);
        let result = match self.captions.resolve(&item.url, &self.lang) {
            Ok(transcript) => {
                let path = self.output.video_path(&item.id, &transcript.title);
                let body = output::video_artifact(&transcript.title, &item.url, &transcript.text);
                self.save(pending, path, &body)
            }
            Err(e) => {
                tracing::warn!(url = %item.url, "could not fetch subtitles: {}", e);
                pending.error(e.to_string())
            }
        };
        self.observer.item_finished(LinkKind::Video, &result);
        result
    }

    /// Processes post links in one browser session. Returns Err without
    /// processing any item when the session cannot be set up.
    pub async fn run_posts(&self, items: &[UrlMatch]) -> Result<Vec<EnrichmentResult>, EnrichError> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let profile = self
            .posts
            .locator
            .find_profile(self.posts.explicit_profile.as_deref())?;
        tracing::info!(profile = %profile.display(), "using browser profile");
        let jar = cookies::read_jar(&profile, &HostFilter::post_hosts(self.posts.host_match)).await?;
        let params = cookies::export_session_params(&jar);
        self.observer.post_session_ready(&profile, params.len());

        let mut session = self.posts.launcher.launch(params).await?;
        let mut results = Vec::with_capacity(items.len());
        for item in items {
            results.push(self.process_post(session.as_mut(), item).await);
        }
        if let Err(e) = session.close().await {
            tracing::warn!("browser session close failed: {}", e);
        }
        Ok(results)
    }

    async fn process_post(&self, session: &mut dyn PostSession, item: &UrlMatch) -> EnrichmentResult {
        self.observer.item_started(item);
        let pending = PendingResult::begin(item);
        let outcome = session.scrape(&item.url).await;
        let result = match outcome {
            ScrapeOutcome::Found(text) => {
                let path = self.output.post_path(&item.id);
                self.save(pending, path, &output::post_artifact(&item.url, &text))
            }
            failed => {
                let message = failed.failure_message().unwrap_or_default();
                tracing::warn!(url = %item.url, "could not scrape post: {}", message);
                pending.error(message)
            }
        };
        self.observer.item_finished(LinkKind::Post, &result);
        result
    }

    fn save(&self, pending: PendingResult, path: PathBuf, body: &str) -> EnrichmentResult {
        match output::write_artifact(&path, body) {
            Ok(()) => {
                tracing::info!(path = %path.display(), "saved artifact");
                pending.ok(path)
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), "write failed: {}", e);
                pending.error(format!("write {}: {}", path.display(), e))
            }
        }
    }
}
