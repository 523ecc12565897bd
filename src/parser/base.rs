use super::ListingRecord;
use crate::ScraperResult;

/// Turns one fetched page into records and pagination facts.
pub trait PageParser: Send + Sync {
    /// Records in document order. Cards whose phone is not a domestic number
    /// are left out.
    fn parse_listings(&self, body: &str) -> Vec<ListingRecord>;

    /// Total number of search results announced on the page.
    fn parse_total_results(&self, body: &str) -> ScraperResult<usize>;
}
