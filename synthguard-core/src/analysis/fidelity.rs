//! Moment errors of numeric columns.
//!
//! Errors are scaled by the original column's population standard deviation
//! so columns measured in different units can be averaged together.

use rayon::prelude::*;

use crate::models::Dataset;

use super::models::ColumnError;
use super::numeric::{mean, mean_and_std_dev, numeric_values};

/// Standard deviations below this fall back to a scale of 1.
const SCALE_EPSILON: f64 = 1e-10;

/// Normalised mean and standard deviation errors per shared numeric column.
///
/// Columns without a numeric value on either side are left out, as are
/// columns whose error does not fit in an `f64`.
pub fn column_errors(original: &Dataset, synthetic: &Dataset) -> Vec<ColumnError> {
    let columns: Vec<&str> = original
        .numeric_columns()
        .into_iter()
        .filter(|column| synthetic.profile(column).is_some())
        .collect();

    columns
        .par_iter()
        .filter_map(|&column| {
            let original_values = numeric_values(original.records(), column);
            let synthetic_values = numeric_values(synthetic.records(), column);
            if original_values.is_empty() || synthetic_values.is_empty() {
                return None;
            }

            let (original_mean, original_std) = mean_and_std_dev(&original_values);
            let (synthetic_mean, synthetic_std) = mean_and_std_dev(&synthetic_values);
            let scale = if original_std > SCALE_EPSILON {
                original_std
            } else {
                1.0
            };

            let mean_error = (original_mean / scale - synthetic_mean / scale).abs();
            let std_dev_error = (original_std / scale - synthetic_std / scale).abs();
            if !(mean_error.is_finite() && std_dev_error.is_finite()) {
                tracing::debug!("Column '{}' moment error overflows, skipped", column);
                return None;
            }

            Some(ColumnError {
                column_name: column.to_string(),
                mean_error,
                std_dev_error,
            })
        })
        .collect()
}

/// Mean of the per-column mean errors; 0.0 without numeric columns.
pub fn mean_absolute_error(errors: &[ColumnError]) -> f64 {
    mean(errors.iter().map(|e| e.mean_error))
}

/// Mean of the per-column standard deviation errors; 0.0 without numeric columns.
pub fn standard_deviation_error(errors: &[ColumnError]) -> f64 {
    mean(errors.iter().map(|e| e.std_dev_error))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Record;

    fn dataset(rows: &[(&str, &str)]) -> Dataset {
        let records: Vec<Record> = rows
            .iter()
            .map(|(amount, label)| [("amount", *amount), ("label", *label)].into_iter().collect())
            .collect();
        Dataset::from_records("d", records)
    }

    #[test]
    fn test_identical_columns_have_no_error() {
        let data = dataset(&[("1", "a"), ("3", "b")]);
        let errors = column_errors(&data, &data);

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].column_name, "amount");
        assert_eq!(mean_absolute_error(&errors), 0.0);
        assert_eq!(standard_deviation_error(&errors), 0.0);
    }

    #[test]
    fn test_errors_scaled_by_original_std_dev() {
        // Original: mean 2, std 1. Synthetic: mean 4, std 2.
        let original = dataset(&[("1", "a"), ("3", "b")]);
        let synthetic = dataset(&[("2", "a"), ("6", "b")]);

        let errors = column_errors(&original, &synthetic);
        assert!((errors[0].mean_error - 2.0).abs() < 1e-12);
        assert!((errors[0].std_dev_error - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_constant_original_uses_unit_scale() {
        let original = dataset(&[("5", "a"), ("5", "b")]);
        let synthetic = dataset(&[("7", "a"), ("7", "b")]);

        let errors = column_errors(&original, &synthetic);
        assert!((errors[0].mean_error - 2.0).abs() < 1e-12);
        assert_eq!(errors[0].std_dev_error, 0.0);
    }

    #[test]
    fn test_no_numeric_values_on_one_side() {
        let original = dataset(&[("5", "a")]);
        let synthetic = dataset(&[("n/a", "a")]);
        assert!(column_errors(&original, &synthetic).is_empty());
        assert_eq!(mean_absolute_error(&[]), 0.0);
    }

    #[test]
    fn test_huge_values_give_finite_errors() {
        let original = dataset(&[("1e200", "a"), ("3e200", "b")]);
        let synthetic = dataset(&[("2e200", "a"), ("6e200", "b")]);

        let errors = column_errors(&original, &synthetic);
        assert!((errors[0].mean_error - 2.0).abs() < 1e-9);
        assert!((errors[0].std_dev_error - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_overflowing_error_is_skipped() {
        let original = dataset(&[("1.7e308", "a")]);
        let synthetic = dataset(&[("-1.7e308", "a")]);
        assert!(column_errors(&original, &synthetic).is_empty());
    }
}
