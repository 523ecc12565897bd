use super::CsvTable;
use crate::{ScraperError, ScraperResult};
use log::{debug, warn};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CsvEncoding {
    Utf8,
    /// UTF-8 prefixed with a byte-order mark, which spreadsheet tools use to
    /// detect the encoding.
    Utf8Bom,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

#[derive(Debug, Clone)]
pub struct LoadedTable {
    pub path: PathBuf,
    pub table: CsvTable,
}

/// CSV files under one base directory.
#[derive(Debug, Clone)]
pub struct CsvStorage {
    base_path: PathBuf,
}

impl CsvStorage {
    pub fn new<P: AsRef<Path>>(base_path: P) -> ScraperResult<Self> {
        let base_path = base_path.as_ref().to_path_buf();
        fs::create_dir_all(&base_path)?;
        Ok(Self { base_path })
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Writes `table` with its header row to `file_name` and returns the path.
    pub fn save(
        &self,
        table: &CsvTable,
        file_name: &str,
        encoding: CsvEncoding,
    ) -> ScraperResult<PathBuf> {
        let final_path = self.base_path.join(file_name);
        let mut file = fs::File::create(&final_path)?;
        if encoding == CsvEncoding::Utf8Bom {
            file.write_all(UTF8_BOM)?;
        }

        let mut writer = csv::Writer::from_writer(file);
        writer.write_record(&table.headers)?;
        for row in &table.rows {
            writer.write_record(row)?;
        }
        writer.flush()?;

        debug!("Saved {} rows to {}", table.len(), final_path.display());
        Ok(final_path)
    }

    /// Reads one table. The file must be UTF-8 (a leading BOM is ignored),
    /// have a header row and the same number of fields on every row.
    pub fn load(path: &Path) -> ScraperResult<CsvTable> {
        let bytes = fs::read(path)?;
        let content = bytes.strip_prefix(UTF8_BOM).unwrap_or(&bytes);

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(content);

        let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        if headers.is_empty() || headers.iter().all(String::is_empty) {
            return Err(ScraperError::ExtractionError(
                "no columns to parse from file".to_string(),
            ));
        }

        let mut table = CsvTable::new(headers);
        for record in reader.records() {
            table
                .rows
                .push(record?.iter().map(str::to_string).collect());
        }
        Ok(table)
    }

    /// Loads every `*.csv` directly under the base directory except
    /// `exclude`, in file name order. Files that cannot be read are returned
    /// as skipped instead of failing the whole load.
    pub fn load_dir(&self, exclude: &str) -> ScraperResult<(Vec<LoadedTable>, Vec<SkippedFile>)> {
        let mut paths: Vec<PathBuf> = fs::read_dir(&self.base_path)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.is_file())
            .filter(|path| path.extension().is_some_and(|ext| ext == "csv"))
            .filter(|path| path.file_name().is_some_and(|name| name != exclude))
            .collect();
        paths.sort();

        let mut loaded = Vec::new();
        let mut skipped = Vec::new();
        for path in paths {
            match Self::load(&path) {
                Ok(table) => loaded.push(LoadedTable { path, table }),
                Err(error) => {
                    warn!("Skipping {}: {}", path.display(), error);
                    skipped.push(SkippedFile {
                        path,
                        reason: error.to_string(),
                    });
                }
            }
        }

        Ok((loaded, skipped))
    }
}
