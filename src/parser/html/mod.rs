mod listing_parser;

pub use listing_parser::{total_pages, ListingParser, ListingSelectors};
