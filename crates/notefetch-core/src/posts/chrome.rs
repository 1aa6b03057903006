//! Chromium session over CDP (chromiumoxide).

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::network::{
    CookieParam, CookieSameSite, SetCookiesParams, TimeSinceEpoch,
};
use chromiumoxide::error::CdpError;
use chromiumoxide::Page;
use futures::StreamExt;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::task::JoinHandle;

use super::{PostSession, ScrapeOutcome, SessionLauncher, DEFAULT_POST_WAIT, POST_TEXT_SELECTOR};
use crate::cookies::{SameSite, SessionCookie};
use crate::error::EnrichError;

const POLL_INTERVAL: Duration = Duration::from_millis(250);

fn browser_err(e: CdpError) -> EnrichError {
    EnrichError::Browser(e.to_string())
}

fn cookie_param(cookie: &SessionCookie) -> Result<CookieParam, EnrichError> {
    let mut builder = CookieParam::builder()
        .name(cookie.name.as_str())
        .value(cookie.value.as_str())
        .domain(cookie.domain.as_str())
        .path(cookie.path.as_str())
        .secure(cookie.secure)
        .http_only(cookie.http_only);
    // Chromium rejects SameSite=None without Secure; leave those to the browser default.
    builder = match (cookie.same_site, cookie.secure) {
        (SameSite::Lax, _) => builder.same_site(CookieSameSite::Lax),
        (SameSite::Strict, _) => builder.same_site(CookieSameSite::Strict),
        (SameSite::None, true) => builder.same_site(CookieSameSite::None),
        (SameSite::None, false) => builder,
    };
    if !cookie.is_session() {
        builder = builder.expires(TimeSinceEpoch::new(cookie.expires));
    }
    builder.build().map_err(EnrichError::Browser)
}

/// Launches Chromium and installs the cookies on a fresh page.
#[derive(Debug, Clone)]
pub struct ChromeLauncher {
    headless: bool,
    wait: Duration,
    executable: Option<PathBuf>,
}

impl Default for ChromeLauncher {
    fn default() -> Self {
        Self {
            headless: true,
            wait: DEFAULT_POST_WAIT,
            executable: None,
        }
    }
}

impl ChromeLauncher {
    pub fn new(headless: bool, wait: Duration) -> Self {
        Self {
            headless,
            wait,
            executable: None,
        }
    }

    /// Browser binary to launch; None lets chromiumoxide search the usual places.
    pub fn with_executable(mut self, executable: Option<PathBuf>) -> Self {
        self.executable = executable;
        self
    }

    pub fn executable(&self) -> Option<&Path> {
        self.executable.as_deref()
    }
}

#[async_trait]
impl SessionLauncher for ChromeLauncher {
    async fn launch(&self, cookies: Vec<SessionCookie>) -> Result<Box<dyn PostSession>, EnrichError> {
        let params = cookies
            .iter()
            .map(cookie_param)
            .collect::<Result<Vec<_>, _>>()?;

        let mut builder = BrowserConfig::builder();
        if !self.headless {
            builder = builder.with_head();
        }
        if let Some(exe) = self.executable() {
            builder = builder.chrome_executable(exe);
        }
        let config = builder.build().map_err(EnrichError::Browser)?;

        let (browser, mut handler) = Browser::launch(config).await.map_err(browser_err)?;
        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    tracing::debug!("cdp handler: {}", e);
                }
            }
        });

        let mut session = ChromeSession {
            browser: Some(browser),
            page: None,
            handler,
            wait: self.wait,
        };
        if let Err(e) = session.open_page(params).await {
            if let Err(close_err) = session.shutdown().await {
                tracing::warn!("browser close after failed setup: {}", close_err);
            }
            return Err(e);
        }
        tracing::info!(cookies = cookies.len(), headless = self.headless, "browser session ready");
        Ok(Box::new(session))
    }
}

/// One browser, one page, cookies installed once.
pub struct ChromeSession {
    browser: Option<Browser>,
    page: Option<Page>,
    handler: JoinHandle<()>,
    wait: Duration,
}

impl ChromeSession {
    async fn open_page(&mut self, cookies: Vec<CookieParam>) -> Result<(), EnrichError> {
        let browser = self
            .browser
            .as_ref()
            .ok_or_else(|| EnrichError::Browser("browser already closed".into()))?;
        let page = browser.new_page("about:blank").await.map_err(browser_err)?;
        if !cookies.is_empty() {
            page.execute(SetCookiesParams::new(cookies))
                .await
                .map_err(browser_err)?;
        }
        self.page = Some(page);
        Ok(())
    }

    async fn shutdown(&mut self) -> Result<(), EnrichError> {
        if let Some(page) = self.page.take() {
            if let Err(e) = page.close().await {
                tracing::debug!("page close: {}", e);
            }
        }
        let result = match self.browser.take() {
            Some(mut browser) => {
                let closed = browser.close().await.map(|_| ()).map_err(browser_err);
                if let Err(e) = browser.wait().await {
                    tracing::debug!("browser wait: {}", e);
                }
                closed
            }
            None => Ok(()),
        };
        self.handler.abort();
        tracing::debug!("browser session closed");
        result
    }
}

/// Text of the post node, or None while it is not in the DOM yet.
async fn find_text(page: &Page) -> Result<Option<String>, CdpError> {
    match page.find_element(POST_TEXT_SELECTOR).await {
        Ok(element) => Ok(Some(element.inner_text().await?.unwrap_or_default())),
        // A missing node comes back as a protocol error from DescribeNode.
        Err(CdpError::Chrome(_)) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Repeats `lookup` until it yields text. Transport errors end the wait.
async fn poll_for_text<F, Fut>(mut lookup: F) -> Result<String, CdpError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Option<String>, CdpError>>,
{
    loop {
        if let Some(text) = lookup().await? {
            return Ok(text);
        }
        tokio::time::sleep(POLL_INTERVAL).await;
    }
}

#[async_trait]
impl PostSession for ChromeSession {
    async fn scrape(&mut self, url: &str) -> ScrapeOutcome {
        let Some(page) = self.page.as_ref() else {
            return ScrapeOutcome::Unavailable("browser session closed".into());
        };
        if let Err(e) = page.goto(url).await {
            tracing::warn!(url, "navigation failed: {}", e);
            return ScrapeOutcome::Unavailable(e.to_string());
        }
        match tokio::time::timeout(self.wait, poll_for_text(|| find_text(page))).await {
            Ok(Ok(text)) => ScrapeOutcome::Found(text),
            Ok(Err(e)) => {
                tracing::warn!(url, "text extraction failed: {}", e);
                ScrapeOutcome::Unavailable(e.to_string())
            }
            Err(_) => ScrapeOutcome::TimedOut,
        }
    }

    async fn close(mut self: Box<Self>) -> Result<(), EnrichError> {
        self.shutdown().await
    }
}

impl Drop for ChromeSession {
    fn drop(&mut self) {
        // Browser's own Drop kills the child process; the handler task must go too.
        self.handler.abort();
    }
}
