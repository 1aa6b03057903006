//! Post scraper: authenticated browser session that reads post text.
//!
//! A [`SessionLauncher`] opens one [`PostSession`] with the exported cookies
//! installed; the session is reused serially for every post URL and closed
//! by its owner when the batch is done.

mod chrome;

pub use chrome::{ChromeLauncher, ChromeSession};

use async_trait::async_trait;
use std::time::Duration;

use crate::cookies::SessionCookie;
use crate::error::EnrichError;

/// Element holding a post's primary text.
pub const POST_TEXT_SELECTOR: &str = r#"[data-testid="tweetText"]"#;

/// Default bound on waiting for [`POST_TEXT_SELECTOR`].
pub const DEFAULT_POST_WAIT: Duration = Duration::from_secs(15);

/// How a scrape ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScrapeOutcome {
    /// Rendered text of the first matching element.
    Found(String),
    /// The text node did not appear within the wait bound.
    TimedOut,
    /// Navigation or extraction failed.
    Unavailable(String),
}

impl ScrapeOutcome {
    /// Human-readable stand-in used when printing failed scrapes.
    pub fn placeholder(&self) -> &str {
        match self {
            ScrapeOutcome::Found(text) => text,
            ScrapeOutcome::TimedOut => "(no text found)",
            ScrapeOutcome::Unavailable(_) => "(timed out or post unavailable)",
        }
    }

    /// Error message for failed scrapes, None when text was found.
    pub fn failure_message(&self) -> Option<String> {
        match self {
            ScrapeOutcome::Found(_) => None,
            ScrapeOutcome::TimedOut => Some(format!(
                "post text did not appear within the wait bound ({POST_TEXT_SELECTOR})"
            )),
            ScrapeOutcome::Unavailable(reason) => Some(format!("post unavailable: {reason}")),
        }
    }
}

#[async_trait]
pub trait PostSession: Send {
    /// Never fails; faults are reported through the outcome.
    async fn scrape(&mut self, url: &str) -> ScrapeOutcome;

    /// Tears the session down.
    async fn close(self: Box<Self>) -> Result<(), EnrichError>;
}

#[async_trait]
pub trait SessionLauncher: Send + Sync {
    async fn launch(&self, cookies: Vec<SessionCookie>) -> Result<Box<dyn PostSession>, EnrichError>;
}
