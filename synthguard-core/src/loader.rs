//! Delimited file loading.
//!
//! The first line is the header. Each following line is zipped against the
//! header and truncated to the shorter of the two, so a short row silently
//! omits its trailing columns and a long row drops its extra fields. Headers
//! and values are trimmed. Quoted fields are honoured, so a quoted value may
//! contain the delimiter.

use std::fs::File;
use std::path::Path;

use tracing::{debug, warn};

use crate::error::{Result, SynthGuardError};
use crate::models::{Dataset, Record};

/// Header and data rows of a delimited file.
#[derive(Debug, Clone, Default)]
pub struct LoadedTable {
    pub columns: Vec<String>,
    pub records: Vec<Record>,
}

/// Reads a comma-delimited file with a header row.
///
/// An empty file yields no columns and no records.
///
/// # Errors
/// Returns `SynthGuardError::Io` if the path cannot be opened and
/// `SynthGuardError::Parse` if a line is not valid UTF-8.
pub fn load_records(path: &Path) -> Result<LoadedTable> {
    let file = File::open(path).map_err(|e| SynthGuardError::io(path, e))?;
    read_table(file, path)
}

/// Loads a dataset named after the file.
pub fn load_dataset(path: &Path) -> Result<Dataset> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    load_named_dataset(path, name)
}

/// Loads a dataset under an explicit name.
pub fn load_named_dataset(path: &Path, name: impl Into<String>) -> Result<Dataset> {
    let size_bytes = std::fs::metadata(path)
        .map_err(|e| SynthGuardError::io(path, e))?
        .len();
    let table = load_records(path)?;

    debug!(
        "Loaded {} rows x {} header columns from {}",
        table.records.len(),
        table.columns.len(),
        path.display()
    );
    if table.records.is_empty() {
        warn!("Dataset {} has no data rows", path.display());
    }

    Ok(Dataset::new(name, table.columns, table.records, size_bytes))
}

fn read_table<R: std::io::Read>(reader: R, path: &Path) -> Result<LoadedTable> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rows = csv_reader.records();

    let columns: Vec<String> = match rows.next() {
        Some(header) => header
            .map_err(|e| SynthGuardError::parse(path, e))?
            .iter()
            .map(str::to_string)
            .collect(),
        None => return Ok(LoadedTable::default()),
    };

    let mut records = Vec::new();
    for row in rows {
        let row = row.map_err(|e| SynthGuardError::parse(path, e))?;
        let record: Record = columns
            .iter()
            .zip(row.iter())
            .map(|(column, value)| (column.as_str(), value))
            .collect();
        records.push(record);
    }

    Ok(LoadedTable { columns, records })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn parse(input: &str) -> LoadedTable {
        read_table(input.as_bytes(), &PathBuf::from("inline.csv")).unwrap()
    }

    #[test]
    fn test_header_and_rows() {
        let table = parse("id, name ,salary\n1,A,100\n2,B,200\n");

        assert_eq!(table.columns, vec!["id", "name", "salary"]);
        assert_eq!(table.records.len(), 2);
        assert_eq!(table.records[0].get("name"), Some("A"));
        assert_eq!(table.records[1].get("salary"), Some("200"));
    }

    #[test]
    fn test_short_row_truncates() {
        let table = parse("a,b,c\n1,2\n");

        let record = &table.records[0];
        assert_eq!(record.len(), 2);
        assert_eq!(record.get("b"), Some("2"));
        assert_eq!(record.get("c"), None);
    }

    #[test]
    fn test_long_row_drops_extra_fields() {
        let table = parse("a,b\n1,2,3,4\n");
        assert_eq!(table.records[0].len(), 2);
    }

    #[test]
    fn test_values_are_trimmed() {
        let table = parse("a\n   padded  \n");
        assert_eq!(table.records[0].get("a"), Some("padded"));
    }

    #[test]
    fn test_quoted_field_keeps_comma() {
        let table = parse("city,zip\n\"Portland, OR\",97201\n");
        assert_eq!(table.records[0].get("city"), Some("Portland, OR"));
        assert_eq!(table.records[0].get("zip"), Some("97201"));
    }

    #[test]
    fn test_empty_input() {
        let table = parse("");
        assert!(table.columns.is_empty());
        assert!(table.records.is_empty());
    }

    #[test]
    fn test_header_only() {
        let table = parse("a,b\n");
        assert_eq!(table.columns.len(), 2);
        assert!(table.records.is_empty());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = load_records(&PathBuf::from("/nonexistent/synthguard/missing.csv"));
        assert!(matches!(result, Err(SynthGuardError::Io { .. })));
    }
}
