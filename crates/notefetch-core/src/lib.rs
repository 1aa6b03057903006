pub mod config;
pub mod error;
pub mod logging;

pub mod captions;
pub mod cookies;
pub mod enrich;
pub mod links;
pub mod output;
pub mod posts;

pub use error::EnrichError;
