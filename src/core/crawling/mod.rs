mod crawler;

pub use crawler::{resolve_host, Crawler, FailedPage, ScrapeOutcome};
