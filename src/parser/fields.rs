use crate::{ScraperError, ScraperResult};
use scraper::{ElementRef, Selector};

/// Value stored for a field no extraction rule could find.
pub const PLACEHOLDER: &str = " - ";

/// Returns the first `Some` produced by `strategies`, tried in order, or `default`.
pub fn first_match<T: ?Sized>(
    input: &T,
    strategies: &[&dyn Fn(&T) -> Option<String>],
    default: &str,
) -> String {
    strategies
        .iter()
        .find_map(|strategy| strategy(input))
        .unwrap_or_else(|| default.to_string())
}

/// Full-width spaces become ASCII spaces, then surrounding whitespace is trimmed.
pub fn normalize_text(raw: &str) -> String {
    raw.replace('\u{3000}', " ").trim().to_string()
}

pub fn parse_selector(css: &str) -> ScraperResult<Selector> {
    Selector::parse(css)
        .map_err(|e| ScraperError::ExtractionError(format!("invalid selector {css:?}: {e}")))
}

/// Locates one element inside a listing card.
#[derive(Debug, Clone)]
pub enum FieldRule {
    First(Selector),
    /// The `n`th (0-indexed) match of the selector.
    Nth(Selector, usize),
}

impl FieldRule {
    pub fn first(css: &str) -> ScraperResult<Self> {
        Ok(Self::First(parse_selector(css)?))
    }

    pub fn nth(css: &str, index: usize) -> ScraperResult<Self> {
        Ok(Self::Nth(parse_selector(css)?, index))
    }

    /// Normalized text of the matched element, `None` if nothing matched.
    pub fn apply(&self, card: ElementRef<'_>) -> Option<String> {
        let element = match self {
            Self::First(selector) => card.select(selector).next(),
            Self::Nth(selector, index) => card.select(selector).nth(*index),
        }?;
        Some(normalize_text(&element.text().collect::<String>()))
    }
}

/// Applies `primary`, then `fallback`, then settles for [`PLACEHOLDER`].
pub fn extract_field<'a>(card: ElementRef<'a>, primary: &FieldRule, fallback: &FieldRule) -> String {
    let by_primary = |c: &ElementRef<'a>| primary.apply(*c);
    let by_fallback = |c: &ElementRef<'a>| fallback.apply(*c);
    first_match(&card, &[&by_primary, &by_fallback], PLACEHOLDER)
}
