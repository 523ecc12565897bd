pub mod concat;
pub mod core;
pub mod http;
pub mod parser;
pub mod scrapers;
pub mod stats;
pub mod storage;

pub use core::Crawler;
pub use core::{ScrapeConfig, ScrapeOutcome, ScraperError, ScraperResult};
pub use http::HttpResponse;
pub use parser::{ListingParser, ListingRecord, PageParser};
pub use scrapers::Scraper;
pub use stats::StatsTracker;
pub use storage::{CsvStorage, CsvTable};
