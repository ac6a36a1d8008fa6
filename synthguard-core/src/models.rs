//! Core data models for tabular datasets and their column profiles.
//!
//! A [`Dataset`] is immutable once loaded: its column profiles are derived
//! from the records at construction time and never recomputed.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::classifier::profile_records;

/// Inferred semantic type of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DataType {
    Integer,
    Double,
    String,
}

impl DataType {
    /// Returns true for INTEGER and DOUBLE columns.
    pub fn is_numeric(&self) -> bool {
        matches!(self, DataType::Integer | DataType::Double)
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataType::Integer => write!(f, "INTEGER"),
            DataType::Double => write!(f, "DOUBLE"),
            DataType::String => write!(f, "STRING"),
        }
    }
}

/// Reason a column was tagged as sensitive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SensitivityCategory {
    #[serde(rename = "PII")]
    Pii,
    #[serde(rename = "FINANCIAL")]
    Financial,
    #[serde(rename = "MEDICAL")]
    Medical,
    #[serde(rename = "LOCATION")]
    Location,
}

impl SensitivityCategory {
    /// All categories in classification priority order.
    pub const ALL: [SensitivityCategory; 4] = [
        SensitivityCategory::Pii,
        SensitivityCategory::Financial,
        SensitivityCategory::Medical,
        SensitivityCategory::Location,
    ];

    /// Human-readable explanation shown next to a sensitive column.
    pub fn description(&self) -> &'static str {
        match self {
            SensitivityCategory::Pii => "Potential PII (Personally Identifiable Information)",
            SensitivityCategory::Financial => "Financial Information",
            SensitivityCategory::Medical => "Medical/Health Information",
            SensitivityCategory::Location => "Precise Location Data",
        }
    }
}

impl fmt::Display for SensitivityCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SensitivityCategory::Pii => write!(f, "PII"),
            SensitivityCategory::Financial => write!(f, "FINANCIAL"),
            SensitivityCategory::Medical => write!(f, "MEDICAL"),
            SensitivityCategory::Location => write!(f, "LOCATION"),
        }
    }
}

/// Classification result for a single column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnProfile {
    pub name: String,
    pub data_type: DataType,
    pub sensitive: bool,
    pub sensitivity_reason: Option<SensitivityCategory>,
}

/// One row of a dataset: column name to raw string value.
///
/// Insertion order is the column order of the source file. Equality is
/// row equality: same column set, same values, regardless of order. A
/// missing column and an empty string are different things.
#[derive(Debug, Clone, Default)]
pub struct Record {
    fields: Vec<(String, String)>,
}

impl Record {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `column` to `value`.
    ///
    /// Re-inserting an existing column replaces its value in place, so the
    /// last duplicate header wins while keeping the first header's position.
    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<String>) {
        let column = column.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(name, _)| *name == column) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((column, value)),
        }
    }

    /// Value stored for `column`, if present.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value.as_str())
    }

    /// Column names in insertion order.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    /// `(column, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Number of columns present in this record.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if the record has no columns.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Order-independent string form used for exact-match comparisons.
    ///
    /// Keys are sorted through a `BTreeMap` so that two rows holding the
    /// same pairs in a different order produce the same representation.
    pub fn canonical(&self) -> String {
        let sorted: BTreeMap<&str, &str> = self.iter().collect();
        serde_json::to_string(&sorted).unwrap_or_else(|e| {
            tracing::trace!("Failed to serialize record for comparison: {}", e);
            String::new()
        })
    }
}

impl<K, V> FromIterator<(K, V)> for Record
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (column, value) in iter {
            record.insert(column, value);
        }
        record
    }
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(column, value)| other.get(column) == Some(value))
    }
}

impl Eq for Record {}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (column, value) in self.iter() {
            map.serialize_entry(column, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RecordVisitor;

        impl<'de> Visitor<'de> for RecordVisitor {
            type Value = Record;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of column names to string values")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Record, A::Error> {
                let mut record = Record::new();
                while let Some((column, value)) = access.next_entry::<String, String>()? {
                    record.insert(column, value);
                }
                Ok(record)
            }
        }

        deserializer.deserialize_map(RecordVisitor)
    }
}

/// Summary of one dataset as it appears in a report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetInfo {
    pub name: String,
    pub row_count: usize,
    pub column_count: usize,
    pub size_bytes: u64,
    pub columns: Vec<ColumnProfile>,
}

/// A loaded tabular dataset.
#[derive(Debug, Clone)]
pub struct Dataset {
    name: String,
    columns: Vec<String>,
    records: Vec<Record>,
    size_bytes: u64,
    column_profiles: Vec<ColumnProfile>,
}

impl Dataset {
    /// Creates a dataset and derives its column profiles.
    ///
    /// `columns` is the header of the source file. Profiles come from the
    /// first record, so a column that is missing from a short first row is
    /// not profiled.
    pub fn new(
        name: impl Into<String>,
        columns: Vec<String>,
        records: Vec<Record>,
        size_bytes: u64,
    ) -> Self {
        let column_profiles = profile_records(&records);
        Self {
            name: name.into(),
            columns,
            records,
            size_bytes,
            column_profiles,
        }
    }

    /// Creates an in-memory dataset whose header is its first record's columns.
    pub fn from_records(name: impl Into<String>, records: Vec<Record>) -> Self {
        let columns = records
            .first()
            .map(|record| record.columns().map(str::to_string).collect())
            .unwrap_or_default();
        Self::new(name, columns, records, 0)
    }

    /// Dataset name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Header columns of the source file.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// All records in file order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Size of the source file in bytes.
    pub fn size_bytes(&self) -> u64 {
        self.size_bytes
    }

    /// Column profiles derived at load time.
    pub fn column_profiles(&self) -> &[ColumnProfile] {
        &self.column_profiles
    }

    /// Number of data rows.
    pub fn row_count(&self) -> usize {
        self.records.len()
    }

    /// Number of profiled columns (0 for an empty dataset).
    pub fn column_count(&self) -> usize {
        self.column_profiles.len()
    }

    /// Returns true if the dataset has no data rows.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Profiles of columns tagged as sensitive.
    pub fn sensitive_columns(&self) -> impl Iterator<Item = &ColumnProfile> {
        self.column_profiles.iter().filter(|c| c.sensitive)
    }

    /// Returns true if any column carries the given sensitivity category.
    pub fn has_category(&self, category: SensitivityCategory) -> bool {
        self.column_profiles
            .iter()
            .any(|c| c.sensitivity_reason == Some(category))
    }

    /// Names of INTEGER and DOUBLE columns in profile order.
    pub fn numeric_columns(&self) -> Vec<&str> {
        self.column_profiles
            .iter()
            .filter(|c| c.data_type.is_numeric())
            .map(|c| c.name.as_str())
            .collect()
    }

    /// Looks up the profile of a column.
    pub fn profile(&self, column: &str) -> Option<&ColumnProfile> {
        self.column_profiles.iter().find(|c| c.name == column)
    }

    /// Report summary of this dataset.
    pub fn info(&self) -> DatasetInfo {
        DatasetInfo {
            name: self.name.clone(),
            row_count: self.row_count(),
            column_count: self.column_count(),
            size_bytes: self.size_bytes,
            columns: self.column_profiles.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(pairs: &[(&str, &str)]) -> Record {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_record_preserves_insertion_order() {
        let r = record(&[("id", "1"), ("name", "A"), ("salary", "100")]);
        let columns: Vec<&str> = r.columns().collect();
        assert_eq!(columns, vec!["id", "name", "salary"]);
    }

    #[test]
    fn test_record_duplicate_column_last_value_wins() {
        let r = record(&[("id", "1"), ("id", "2")]);
        assert_eq!(r.len(), 1);
        assert_eq!(r.get("id"), Some("2"));
    }

    #[test]
    fn test_record_equality_ignores_order() {
        let a = record(&[("id", "1"), ("name", "A")]);
        let b = record(&[("name", "A"), ("id", "1")]);
        assert_eq!(a, b);
        assert_eq!(a.canonical(), b.canonical());
    }

    #[test]
    fn test_record_missing_differs_from_empty() {
        let with_empty = record(&[("id", "1"), ("name", "")]);
        let missing = record(&[("id", "1")]);
        assert_ne!(with_empty, missing);
        assert_ne!(with_empty.canonical(), missing.canonical());
    }

    #[test]
    fn test_record_serializes_in_column_order() {
        let r = record(&[("zeta", "1"), ("alpha", "2")]);
        let json = serde_json::to_string(&r).unwrap();
        assert_eq!(json, r#"{"zeta":"1","alpha":"2"}"#);

        let back: Record = serde_json::from_str(&json).unwrap();
        assert_eq!(back, r);
    }

    #[test]
    fn test_dataset_profiles_from_first_record() {
        let dataset = Dataset::from_records(
            "people",
            vec![
                record(&[("id", "1"), ("name", "A"), ("salary", "100.5")]),
                record(&[("id", "2"), ("name", "B"), ("salary", "200")]),
            ],
        );

        assert_eq!(dataset.row_count(), 2);
        assert_eq!(dataset.column_count(), 3);
        assert_eq!(dataset.columns(), ["id", "name", "salary"]);
        assert_eq!(dataset.sensitive_columns().count(), 3);
        assert!(dataset.has_category(SensitivityCategory::Financial));
        assert!(!dataset.has_category(SensitivityCategory::Medical));
        assert_eq!(dataset.numeric_columns(), vec!["id", "salary"]);
        assert_eq!(
            dataset.profile("salary").map(|p| p.data_type),
            Some(DataType::Double)
        );
    }

    #[test]
    fn test_empty_dataset_info() {
        let dataset = Dataset::new("empty", vec!["a".to_string()], vec![], 12);
        let info = dataset.info();

        assert!(dataset.is_empty());
        assert_eq!(info.row_count, 0);
        assert_eq!(info.column_count, 0);
        assert_eq!(info.size_bytes, 12);
        assert!(info.columns.is_empty());
    }

    #[test]
    fn test_dataset_info_serializes_camel_case() {
        let dataset = Dataset::from_records("d", vec![record(&[("notes", "hi")])]);
        let json = serde_json::to_value(dataset.info()).unwrap();

        assert_eq!(json["rowCount"], 1);
        assert_eq!(json["columnCount"], 1);
        assert_eq!(json["columns"][0]["dataType"], "STRING");
        assert_eq!(json["columns"][0]["sensitivityReason"], serde_json::Value::Null);
    }

    #[test]
    fn test_sensitivity_category_labels() {
        assert_eq!(SensitivityCategory::Pii.to_string(), "PII");
        assert_eq!(
            serde_json::to_string(&SensitivityCategory::Location).unwrap(),
            "\"LOCATION\""
        );
        assert!(SensitivityCategory::Medical.description().contains("Medical"));
    }

    #[test]
    fn test_data_type_is_numeric() {
        assert!(DataType::Integer.is_numeric());
        assert!(DataType::Double.is_numeric());
        assert!(!DataType::String.is_numeric());
    }
}
