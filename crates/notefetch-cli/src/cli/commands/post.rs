//! `notefetch post <url>...` – print post text using the browser session.

use anyhow::{Context, Result};
use notefetch_core::config::NotefetchConfig;
use notefetch_core::cookies::{self, HostFilter};
use notefetch_core::posts::SessionLauncher;
use std::path::PathBuf;

use super::setup::{chrome_launcher, profile_locator};

pub async fn run_post(
    cfg: &NotefetchConfig,
    urls: &[String],
    browser_profile: Option<PathBuf>,
    show_browser: bool,
) -> Result<()> {
    let explicit = browser_profile.or_else(|| cfg.browser_profile.clone());
    let profile = profile_locator(cfg).find_profile(explicit.as_deref())?;
    println!("Using browser profile: {}", profile.display());

    let jar = cookies::read_jar(&profile, &HostFilter::post_hosts(cfg.host_match))
        .await
        .with_context(|| format!("reading cookies from {}", profile.display()))?;
    println!("Loaded {} post-site cookies\n", jar.len());

    let launcher = chrome_launcher(cfg, show_browser);
    let mut session = launcher
        .launch(cookies::export_session_params(&jar))
        .await
        .context("launching browser")?;

    for url in urls {
        println!("--- {url}");
        let outcome = session.scrape(url).await;
        if let Some(message) = outcome.failure_message() {
            tracing::warn!(url = %url, "{}", message);
        }
        println!("{}", outcome.placeholder());
        println!();
    }

    if let Err(e) = session.close().await {
        tracing::warn!("browser session close failed: {}", e);
    }
    Ok(())
}
