//! CLI for notefetch.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use notefetch_core::config;
use std::path::PathBuf;

use commands::{run_enrich, run_post, run_subtitles, EnrichArgs};

/// Top-level CLI for notefetch.
#[derive(Debug, Parser)]
#[command(name = "notefetch")]
#[command(about = "notefetch: save transcripts and post text for links in a markdown note", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Fetch every video transcript and post linked from a note into a staging directory.
    Enrich(EnrichArgs),

    /// Print a video's title and a preview of its normalized subtitles.
    Subtitles {
        /// Video URL.
        url: String,
        /// Caption language code (default from config, usually "en").
        #[arg(long, value_name = "LANG")]
        lang: Option<String>,
        /// Number of transcript characters to print.
        #[arg(long, default_value = "2000", value_name = "N")]
        preview: usize,
    },

    /// Scrape one or more posts with the browser session and print their text.
    Post {
        /// Post URLs.
        #[arg(required = true)]
        urls: Vec<String>,
        /// Explicit browser profile directory holding cookies.sqlite.
        #[arg(long, value_name = "DIR")]
        browser_profile: Option<PathBuf>,
        /// Launch the browser with a visible window.
        #[arg(long)]
        show_browser: bool,
    },
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Enrich(args) => run_enrich(&cfg, args).await?,
            CliCommand::Subtitles { url, lang, preview } => {
                run_subtitles(&cfg, &url, lang.as_deref(), preview)?;
            }
            CliCommand::Post {
                urls,
                browser_profile,
                show_browser,
            } => run_post(&cfg, &urls, browser_profile, show_browser).await?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
