//! Backends built from config plus command-line overrides.

use notefetch_core::captions::{SubtitleFetcher, TrackStrategy, YtDlp};
use notefetch_core::config::NotefetchConfig;
use notefetch_core::cookies::ProfileLocator;
use notefetch_core::posts::ChromeLauncher;
use std::path::PathBuf;

pub fn profile_locator(cfg: &NotefetchConfig) -> ProfileLocator {
    match &cfg.profiles_root {
        Some(root) => ProfileLocator::new(root),
        None => ProfileLocator::default(),
    }
}

pub fn chrome_launcher(cfg: &NotefetchConfig, show_browser: bool) -> ChromeLauncher {
    let headless = !(show_browser || cfg.show_browser);
    ChromeLauncher::new(headless, cfg.timeouts.post_wait())
        .with_executable(cfg.chrome_executable.clone())
}

pub fn subtitle_fetcher(cfg: &NotefetchConfig, cookie_file: Option<PathBuf>) -> SubtitleFetcher<YtDlp> {
    let metadata = YtDlp::new(cfg.ytdlp_program.as_str()).with_cookie_file(cookie_file);
    SubtitleFetcher::new(metadata)
        .with_strategy(TrackStrategy::from_format(cfg.track_format.as_deref()))
        .with_timeout(cfg.timeouts.caption_fetch())
}
