pub mod dedupe;
pub mod disk;
pub mod export;
pub mod table;

pub use dedupe::{merge_and_dedupe, MergeOutcome};
pub use disk::{CsvEncoding, CsvStorage, LoadedTable, SkippedFile};
pub use export::{save_records, SavedListings};
pub use table::CsvTable;
