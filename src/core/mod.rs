pub mod config;
mod crawling;
mod errors;
pub mod retry;

pub use config::ScrapeConfig;
pub use crawling::{resolve_host, Crawler, FailedPage, ScrapeOutcome};
pub use errors::{error_chain, ScraperError, ScraperResult};
