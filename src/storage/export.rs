use super::{merge_and_dedupe, CsvEncoding, CsvStorage, CsvTable, MergeOutcome};
use crate::parser::ListingRecord;
use crate::ScraperResult;
use log::info;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct SavedListings {
    pub merge: MergeOutcome,
    pub path: PathBuf,
}

/// Deduplicates scraped records and writes them with a BOM. Nothing is written
/// when there are no records.
pub fn save_records(
    records: &[ListingRecord],
    storage: &CsvStorage,
    file_name: &str,
) -> ScraperResult<Option<SavedListings>> {
    if records.is_empty() {
        info!("No results to save");
        return Ok(None);
    }

    info!("Before deduplication: {} items", records.len());
    let Some(merge) = merge_and_dedupe(vec![CsvTable::from_records(records)]) else {
        return Ok(None);
    };
    info!("Found {} duplicate rows", merge.duplicates);
    info!("After deduplication: {} items", merge.table.len());

    let path = storage.save(&merge.table, file_name, CsvEncoding::Utf8Bom)?;
    info!("Data saved to: {}", path.display());

    Ok(Some(SavedListings { merge, path }))
}
