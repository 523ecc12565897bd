use super::CsvTable;
use log::debug;
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOutcome {
    pub table: CsvTable,
    /// Row count after concatenation, before duplicates were dropped.
    pub combined_rows: usize,
    pub duplicates: usize,
}

/// Concatenates `tables` in order and drops rows equal in every column to an
/// earlier row, keeping first occurrences.
///
/// Columns are aligned by exact header name; the output header is the union
/// of input headers in first-seen order and cells a table lacks are empty.
/// Returns `None` when there is nothing to merge.
pub fn merge_and_dedupe(tables: Vec<CsvTable>) -> Option<MergeOutcome> {
    if tables.is_empty() {
        return None;
    }

    let mut headers: Vec<String> = Vec::new();
    for table in &tables {
        for header in &table.headers {
            if !headers.contains(header) {
                headers.push(header.clone());
            }
        }
    }

    let mut combined = Vec::new();
    for table in tables {
        let positions: Vec<Option<usize>> =
            headers.iter().map(|h| table.column_index(h)).collect();
        for row in table.rows {
            let aligned = positions
                .iter()
                .map(|position| {
                    position
                        .and_then(|i| row.get(i).cloned())
                        .unwrap_or_default()
                })
                .collect::<Vec<String>>();
            combined.push(aligned);
        }
    }

    let combined_rows = combined.len();
    let mut seen = HashSet::with_capacity(combined_rows);
    let rows: Vec<Vec<String>> = combined
        .into_iter()
        .filter(|row| seen.insert(row.clone()))
        .collect();
    let duplicates = combined_rows - rows.len();
    debug!(
        "Merged {} rows into {} ({} duplicates)",
        combined_rows,
        rows.len(),
        duplicates
    );

    Some(MergeOutcome {
        table: CsvTable::with_rows(headers, rows),
        combined_rows,
        duplicates,
    })
}
