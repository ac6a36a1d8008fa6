//! Column sensitivity and type classification.
//!
//! Sensitivity is decided from the column name alone with an ordered keyword
//! table; the first category with a matching keyword wins. Data types are
//! inferred from a single sample value, the column's value in the first
//! record. Neither heuristic looks at the rest of the column.

use crate::models::{ColumnProfile, DataType, Record, SensitivityCategory};

/// Keyword table, in priority order.
const SENSITIVE_KEYWORDS: [(SensitivityCategory, &[&str]); 4] = [
    (
        SensitivityCategory::Pii,
        &[
            "name", "email", "phone", "address", "ssn", "id", "passport", "license",
        ],
    ),
    (
        SensitivityCategory::Financial,
        &["salary", "income", "credit", "account", "balance", "payment"],
    ),
    (
        SensitivityCategory::Medical,
        &["medical", "health", "diagnosis", "prescription", "patient"],
    ),
    (
        SensitivityCategory::Location,
        &["latitude", "longitude", "gps", "location", "coordinate"],
    ),
];

/// Classifies a column from its name and one sample value.
///
/// A missing sample classifies as STRING.
///
/// # Example
/// ```rust
/// use synthguard_core::classifier::classify;
/// use synthguard_core::{DataType, SensitivityCategory};
///
/// let profile = classify("annual_salary", Some("55000"));
/// assert_eq!(profile.sensitivity_reason, Some(SensitivityCategory::Financial));
/// assert_eq!(profile.data_type, DataType::Integer);
/// ```
pub fn classify(column_name: &str, sample_value: Option<&str>) -> ColumnProfile {
    let sensitivity_reason = detect_sensitivity(column_name);
    ColumnProfile {
        name: column_name.to_string(),
        data_type: infer_data_type(sample_value),
        sensitive: sensitivity_reason.is_some(),
        sensitivity_reason,
    }
}

/// Returns the first sensitivity category whose keywords appear in the name.
///
/// Matching is case-insensitive substring containment.
pub fn detect_sensitivity(column_name: &str) -> Option<SensitivityCategory> {
    let lower = column_name.to_lowercase();
    SENSITIVE_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| lower.contains(k)))
        .map(|(category, _)| *category)
}

/// Returns true if `value` is written as a decimal or exponent number, or
/// as one of the exact spellings `NaN` and `Infinity` (optionally signed).
///
/// `f64::from_str` also accepts `inf`, `infinity` and `nan` in any case;
/// those are treated as text.
fn is_number_literal(value: &str) -> bool {
    let unsigned = value.strip_prefix(['+', '-']).unwrap_or(value);
    if unsigned == "Infinity" || unsigned == "NaN" {
        return true;
    }
    !unsigned.contains(|c: char| c.is_ascii_alphabetic() && c != 'e' && c != 'E')
        && value.parse::<f64>().is_ok()
}

/// Infers a data type from a single sample value.
///
/// Values that parse as a number are DOUBLE when they contain a decimal
/// point and INTEGER otherwise; everything else is STRING.
pub fn infer_data_type(sample_value: Option<&str>) -> DataType {
    match sample_value {
        Some(value) if is_number_literal(value) => {
            if value.contains('.') {
                DataType::Double
            } else {
                DataType::Integer
            }
        }
        _ => DataType::String,
    }
}

/// Profiles every column of the first record, in column order.
///
/// Returns no profiles for an empty record set.
pub fn profile_records(records: &[Record]) -> Vec<ColumnProfile> {
    let Some(first) = records.first() else {
        return Vec::new();
    };

    first
        .iter()
        .map(|(column, value)| classify(column, Some(value)))
        .collect()
}
