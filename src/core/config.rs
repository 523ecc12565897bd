use crate::core::retry::RetryConfig;
use crate::ScraperResult;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

pub const DEFAULT_SITE_URL: &str = "https://www.mapion.co.jp";
pub const DEFAULT_GENRE: &str = "グルメ";
pub const DEFAULT_AREA: &str = "奈良県";
pub const DEFAULT_AREA_CODE: &str = "29201";

/// Everything one scrape run needs to know about its target and pacing.
#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    pub site_url: String,
    pub genre: String,
    pub area: String,
    pub area_code: String,
    pub per_page: usize,
    /// Page count used when the result total cannot be read from the first page.
    pub default_pages: usize,
    pub max_pages: usize,
    pub request_delay: Duration,
    pub timeout: Duration,
    pub dns_precheck: bool,
    pub output_dir: PathBuf,
    pub retry_config: RetryConfig,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            site_url: DEFAULT_SITE_URL.to_string(),
            genre: DEFAULT_GENRE.to_string(),
            area: DEFAULT_AREA.to_string(),
            area_code: DEFAULT_AREA_CODE.to_string(),
            per_page: 20,
            default_pages: 5,
            max_pages: 100,
            request_delay: Duration::from_secs(2),
            timeout: Duration::from_secs(30),
            dns_precheck: true,
            output_dir: PathBuf::from("data_sub"),
            retry_config: RetryConfig::default(),
        }
    }
}

impl ScrapeConfig {
    pub fn new(genre: &str, area: &str) -> Self {
        Self {
            genre: genre.to_string(),
            area: area.to_string(),
            ..Default::default()
        }
    }

    pub fn with_site_url(mut self, site_url: &str) -> Self {
        self.site_url = site_url.to_string();
        self
    }

    pub fn with_area_code(mut self, area_code: &str) -> Self {
        self.area_code = area_code.to_string();
        self
    }

    pub fn with_request_delay(mut self, delay: Duration) -> Self {
        self.request_delay = delay;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages;
        self
    }

    pub fn with_default_pages(mut self, default_pages: usize) -> Self {
        self.default_pages = default_pages;
        self
    }

    pub fn with_dns_precheck(mut self, enabled: bool) -> Self {
        self.dns_precheck = enabled;
        self
    }

    pub fn with_output_dir<P: Into<PathBuf>>(mut self, output_dir: P) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    pub fn with_retry_config(mut self, retry_config: RetryConfig) -> Self {
        self.retry_config = retry_config;
        self
    }

    fn search_base(&self) -> String {
        format!(
            "{}/s/q={}%20{}/t=spot",
            self.site_url.trim_end_matches('/'),
            self.genre,
            self.area
        )
    }

    fn area_suffix(&self) -> String {
        format!("/?area={}", self.area_code)
    }

    /// The unpaginated search page, also used as the connectivity probe.
    pub fn search_url(&self) -> ScraperResult<Url> {
        Ok(Url::parse(&format!(
            "{}{}",
            self.search_base(),
            self.area_suffix()
        ))?)
    }

    pub fn page_url(&self, page: usize) -> ScraperResult<Url> {
        Ok(Url::parse(&format!(
            "{}/p={}{}",
            self.search_base(),
            page,
            self.area_suffix()
        ))?)
    }

    /// URLs for pages `1..=pages` in ascending order.
    pub fn page_urls(&self, pages: usize) -> ScraperResult<Vec<Url>> {
        (1..=pages).map(|page| self.page_url(page)).collect()
    }

    pub fn output_file_name(&self) -> String {
        format!("{}_{}.csv", self.genre, self.area)
    }

    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(self.output_file_name())
    }
}
