use crate::parser::fields::{extract_field, parse_selector, FieldRule};
use crate::parser::{is_domestic_phone, ListingRecord, PageParser};
use crate::{ScraperError, ScraperResult};
use log::{debug, trace, warn};
use scraper::{ElementRef, Html, Selector};

/// Every selector the listing pages are read with, compiled once.
#[derive(Debug, Clone)]
pub struct ListingSelectors {
    pub container: Selector,
    pub card: Selector,
    pub name: (FieldRule, FieldRule),
    pub address: (FieldRule, FieldRule),
    pub phone: (FieldRule, FieldRule),
    pub result_count: Selector,
    pub result_count_span: Selector,
    pub result_count_span_index: usize,
}

impl ListingSelectors {
    pub fn new() -> ScraperResult<Self> {
        Ok(Self {
            container: parse_selector("div#NumberSection")?,
            card: parse_selector("dl")?,
            name: (FieldRule::first("a")?, FieldRule::first("dt")?),
            address: (FieldRule::nth("dd", 2)?, FieldRule::first("li.dataAdr")?),
            phone: (FieldRule::nth("dd", 3)?, FieldRule::first("li.dataTel")?),
            result_count: parse_selector("p.subTitle")?,
            result_count_span: parse_selector("span")?,
            result_count_span_index: 1,
        })
    }
}

pub struct ListingParser {
    selectors: ListingSelectors,
}

impl ListingParser {
    pub fn new() -> ScraperResult<Self> {
        Ok(Self::with_selectors(ListingSelectors::new()?))
    }

    pub fn with_selectors(selectors: ListingSelectors) -> Self {
        Self { selectors }
    }

    /// Cards inside the listing container, or every card on the page when the
    /// container is missing.
    fn cards<'a>(&self, document: &'a Html) -> Vec<ElementRef<'a>> {
        match document.select(&self.selectors.container).next() {
            Some(section) => section.select(&self.selectors.card).collect(),
            None => {
                warn!("Listing container not found, scanning the whole page for entries");
                document.select(&self.selectors.card).collect()
            }
        }
    }

    fn parse_card(&self, card: ElementRef<'_>) -> ListingRecord {
        let (name_primary, name_fallback) = &self.selectors.name;
        let (address_primary, address_fallback) = &self.selectors.address;
        let (phone_primary, phone_fallback) = &self.selectors.phone;

        ListingRecord {
            name: extract_field(card, name_primary, name_fallback),
            address: extract_field(card, address_primary, address_fallback),
            phone: extract_field(card, phone_primary, phone_fallback),
        }
    }
}

impl PageParser for ListingParser {
    fn parse_listings(&self, body: &str) -> Vec<ListingRecord> {
        let document = Html::parse_document(body);
        trace!("Parsing HTML content: {}", body);

        let cards = self.cards(&document);
        debug!("Found {} listing entries", cards.len());

        cards
            .into_iter()
            .map(|card| self.parse_card(card))
            .filter(|record| {
                let keep = is_domestic_phone(&record.phone);
                if !keep {
                    trace!("Dropping {:?}: phone {:?} is not domestic", record.name, record.phone);
                }
                keep
            })
            .collect()
    }

    fn parse_total_results(&self, body: &str) -> ScraperResult<usize> {
        let document = Html::parse_document(body);

        let subtitle = document
            .select(&self.selectors.result_count)
            .next()
            .ok_or_else(|| ScraperError::ExtractionError("result count element not found".to_string()))?;

        let count_text: String = subtitle
            .select(&self.selectors.result_count_span)
            .nth(self.selectors.result_count_span_index)
            .ok_or_else(|| ScraperError::ExtractionError("result count span not found".to_string()))?
            .text()
            .collect();

        parse_result_count(&count_text)
    }
}

/// Reads totals such as `123件` or `1,234件`.
fn parse_result_count(text: &str) -> ScraperResult<usize> {
    let digits: String = text
        .split('件')
        .next()
        .unwrap_or_default()
        .trim()
        .chars()
        .filter(|c| *c != ',')
        .collect();

    digits
        .parse()
        .map_err(|e| ScraperError::ExtractionError(format!("invalid result count {text:?}: {e}")))
}

/// Number of pages needed to show `total_results` at `per_page` a page.
pub fn total_pages(total_results: usize, per_page: usize) -> usize {
    if per_page == 0 {
        return 0;
    }
    total_results.div_ceil(per_page)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_result_count() {
        assert_eq!(parse_result_count("123件").unwrap(), 123);
        assert_eq!(parse_result_count(" 1,234件中 1-20件").unwrap(), 1234);
        assert_eq!(parse_result_count("87").unwrap(), 87);
        assert!(parse_result_count("件").is_err());
        assert!(parse_result_count("many件").is_err());
    }

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(123, 20), 7);
        assert_eq!(total_pages(120, 20), 6);
        assert_eq!(total_pages(1, 20), 1);
        assert_eq!(total_pages(0, 20), 0);
        assert_eq!(total_pages(10, 0), 0);
    }
}
