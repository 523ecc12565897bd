use anyhow::Context;
use clap::Parser;
use listscraper::core::config::{DEFAULT_AREA, DEFAULT_AREA_CODE, DEFAULT_GENRE, DEFAULT_SITE_URL};
use listscraper::core::retry::RetryConfig;
use listscraper::scrapers::HttpScraper;
use listscraper::storage::save_records;
use listscraper::{Crawler, CsvStorage, ListingParser, ScrapeConfig};
use log::{error, info};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

#[derive(Debug, Parser)]
#[command(name = "listscraper")]
#[command(about = "Scrape Mapion spot listings into a deduplicated CSV")]
struct Cli {
    #[arg(long, env = "LISTSCRAPER_GENRE", default_value = DEFAULT_GENRE)]
    genre: String,

    #[arg(long, env = "LISTSCRAPER_AREA", default_value = DEFAULT_AREA)]
    area: String,

    #[arg(long, env = "LISTSCRAPER_AREA_CODE", default_value = DEFAULT_AREA_CODE)]
    area_code: String,

    #[arg(long, env = "LISTSCRAPER_SITE_URL", default_value = DEFAULT_SITE_URL)]
    site_url: String,

    #[arg(long, env = "LISTSCRAPER_OUTPUT_DIR", default_value = "data_sub")]
    output_dir: PathBuf,

    #[arg(long, default_value_t = 100)]
    max_pages: usize,

    /// Pages to scrape when the result total cannot be read.
    #[arg(long, default_value_t = 5)]
    default_pages: usize,

    /// Seconds to wait between pages.
    #[arg(long, default_value_t = 2)]
    delay_secs: u64,

    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,

    #[arg(long, default_value_t = 3)]
    max_retries: usize,

    /// Skip resolving the target host before each page.
    #[arg(long)]
    no_dns_check: bool,
}

impl Cli {
    fn into_config(self) -> ScrapeConfig {
        ScrapeConfig::new(&self.genre, &self.area)
            .with_area_code(&self.area_code)
            .with_site_url(&self.site_url)
            .with_output_dir(self.output_dir)
            .with_max_pages(self.max_pages)
            .with_default_pages(self.default_pages)
            .with_request_delay(Duration::from_secs(self.delay_secs))
            .with_timeout(Duration::from_secs(self.timeout_secs))
            .with_dns_precheck(!self.no_dns_check)
            .with_retry_config(RetryConfig {
                max_retries: self.max_retries,
                ..Default::default()
            })
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .filter_module("selectors", log::LevelFilter::Warn)
        .filter_module("html5ever", log::LevelFilter::Error)
        .parse_default_env()
        .init();

    let config = Cli::parse().into_config();

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Script failed with error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(config: ScrapeConfig) -> anyhow::Result<()> {
    info!("Starting scraper for {} in {}", config.genre, config.area);

    let scraper = HttpScraper::from_config(&config).context("failed to build HTTP client")?;
    let parser = ListingParser::new().context("failed to compile listing selectors")?;
    let crawler = Crawler::new(Box::new(scraper), Box::new(parser), config.clone());

    let outcome = crawler.run().await?;

    let storage = CsvStorage::new(&config.output_dir)
        .with_context(|| format!("failed to create {}", config.output_dir.display()))?;
    save_records(&outcome.records, &storage, &config.output_file_name())
        .context("failed to write scraped listings")?;

    Ok(())
}
