pub mod base;
pub mod fields;
pub mod html;
pub mod phone;
mod record;

pub use base::PageParser;
pub use fields::{extract_field, first_match, FieldRule, PLACEHOLDER};
pub use html::{total_pages, ListingParser, ListingSelectors};
pub use phone::is_domestic_phone;
pub use record::{ListingRecord, LISTING_HEADERS};
