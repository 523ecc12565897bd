use crate::storage::{merge_and_dedupe, CsvEncoding, CsvStorage, SkippedFile};
use crate::ScraperResult;
use log::{info, warn};
use std::path::{Path, PathBuf};

pub const DEFAULT_INPUT_DIR: &str = "data";
pub const DEFAULT_OUTPUT_NAME: &str = "concat.csv";

#[derive(Debug, Clone, Default)]
pub struct ConcatReport {
    pub files_read: Vec<PathBuf>,
    pub skipped: Vec<SkippedFile>,
    pub combined_rows: usize,
    pub duplicates: usize,
    pub final_rows: usize,
    /// Where the merged table was written, `None` if nothing was written.
    pub written: Option<PathBuf>,
}

/// Merges every CSV in `input_dir` (except `output_name`) into
/// `input_dir/output_name`, dropping duplicate rows.
pub fn concat_dir(input_dir: &Path, output_name: &str) -> ScraperResult<ConcatReport> {
    if !input_dir.is_dir() {
        warn!("No CSV files found in {} (no such directory)", input_dir.display());
        return Ok(ConcatReport::default());
    }

    let storage = CsvStorage::new(input_dir)?;
    let (loaded, skipped) = storage.load_dir(output_name)?;
    let mut report = ConcatReport {
        skipped,
        ..Default::default()
    };

    if loaded.is_empty() {
        if report.skipped.is_empty() {
            warn!("No CSV files found in {}", input_dir.display());
        } else {
            warn!("No readable CSV files in {}", input_dir.display());
        }
        return Ok(report);
    }

    let mut tables = Vec::with_capacity(loaded.len());
    for file in loaded {
        info!("Read {} ({} rows)", file.path.display(), file.table.len());
        report.files_read.push(file.path);
        tables.push(file.table);
    }

    let Some(merge) = merge_and_dedupe(tables) else {
        return Ok(report);
    };
    info!("Combined: {} rows", merge.combined_rows);
    info!("Duplicates removed: {}", merge.duplicates);
    info!("Final: {} rows", merge.table.len());

    report.combined_rows = merge.combined_rows;
    report.duplicates = merge.duplicates;
    report.final_rows = merge.table.len();

    let path = storage.save(&merge.table, output_name, CsvEncoding::Utf8)?;
    info!("Saved: {}", path.display());
    report.written = Some(path);

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const HEADER: &str = "会社名,住所,電話番号\n";

    #[test]
    fn test_unreadable_file_is_skipped() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("グルメ_奈良県.csv"),
            format!("\u{feff}{HEADER}A,奈良市1,0742-12-3456\nB,奈良市2,0742-12-0000\n"),
        )
        .unwrap();
        fs::write(
            dir.path().join("カフェ_奈良県.csv"),
            format!("{HEADER}A,奈良市1,0742-12-3456\nC,奈良市3,0742-12-1111\n"),
        )
        .unwrap();
        // Shift_JIS bytes for 会社名.
        fs::write(dir.path().join("legacy.csv"), b"\x89\xef\x8e\xd0\x96\xbc\nx\n").unwrap();

        let report = concat_dir(dir.path(), DEFAULT_OUTPUT_NAME).unwrap();

        assert_eq!(report.files_read.len(), 2);
        assert_eq!(report.skipped.len(), 1);
        assert!(report.skipped[0].path.ends_with("legacy.csv"));
        assert_eq!(report.combined_rows, 4);
        assert_eq!(report.duplicates, 1);
        assert_eq!(report.final_rows, 3);

        let written = report.written.unwrap();
        let output = CsvStorage::load(&written).unwrap();
        assert_eq!(output.len(), 3);
        assert!(!fs::read(&written).unwrap().starts_with(b"\xEF\xBB\xBF"));
    }

    #[test]
    fn test_previous_output_is_not_an_input() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.csv"), format!("{HEADER}A,1,0742-12-3456\n")).unwrap();

        let first = concat_dir(dir.path(), DEFAULT_OUTPUT_NAME).unwrap();
        let second = concat_dir(dir.path(), DEFAULT_OUTPUT_NAME).unwrap();

        assert_eq!(first.final_rows, 1);
        assert_eq!(second.files_read.len(), 1);
        assert_eq!(second.combined_rows, 1);
        assert_eq!(second.duplicates, 0);
    }

    #[test]
    fn test_empty_directory_writes_nothing() {
        let dir = TempDir::new().unwrap();

        let report = concat_dir(dir.path(), DEFAULT_OUTPUT_NAME).unwrap();

        assert!(report.written.is_none());
        assert!(!dir.path().join(DEFAULT_OUTPUT_NAME).exists());
    }

    #[test]
    fn test_missing_directory_is_not_created() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("dtaa");

        let report = concat_dir(&missing, DEFAULT_OUTPUT_NAME).unwrap();

        assert!(report.files_read.is_empty());
        assert!(report.written.is_none());
        assert!(!missing.exists());
    }

    #[test]
    fn test_only_unreadable_files_writes_nothing() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("bad.csv"), b"\xff\xfe\x00").unwrap();

        let report = concat_dir(dir.path(), DEFAULT_OUTPUT_NAME).unwrap();

        assert_eq!(report.skipped.len(), 1);
        assert!(report.written.is_none());
        assert!(!dir.path().join(DEFAULT_OUTPUT_NAME).exists());
    }
}
