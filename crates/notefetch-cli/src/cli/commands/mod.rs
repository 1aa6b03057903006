//! CLI command handlers, one file per subcommand.

mod enrich;
mod post;
mod setup;
mod subtitles;

pub use enrich::{run_enrich, EnrichArgs};
pub use post::run_post;
pub use subtitles::run_subtitles;

#[cfg(test)]
pub use subtitles::preview;
