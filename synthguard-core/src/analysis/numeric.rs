//! Numeric cell extraction and moments.

use crate::models::Record;

/// Parses a cell as a finite number.
///
/// "NaN" and "inf" parse as floats but are rejected so they cannot poison
/// means, variances or histogram ranges.
pub(crate) fn parse_numeric(value: &str) -> Option<f64> {
    match value.parse::<f64>() {
        Ok(v) if v.is_finite() => Some(v),
        _ => None,
    }
}

/// Finite numeric values of `column`, in record order.
///
/// Missing and unparsable cells are skipped.
pub(crate) fn numeric_values(records: &[Record], column: &str) -> Vec<f64> {
    let mut skipped = 0usize;
    let values: Vec<f64> = records
        .iter()
        .filter_map(|record| record.get(column))
        .filter_map(|cell| {
            let parsed = parse_numeric(cell);
            if parsed.is_none() {
                skipped += 1;
            }
            parsed
        })
        .collect();

    if skipped > 0 {
        tracing::debug!(
            "Skipped {} non-numeric cells in column '{}'",
            skipped,
            column
        );
    }
    values
}

/// Largest absolute value; 0.0 when empty.
pub(crate) fn max_magnitude(values: &[f64]) -> f64 {
    values.iter().fold(0.0, |max: f64, v| max.max(v.abs()))
}

/// Mean and population standard deviation; `(0.0, 0.0)` when empty.
///
/// Moments are taken over values divided by their largest magnitude, so
/// sums of squares stay finite for any finite input.
pub(crate) fn mean_and_std_dev(values: &[f64]) -> (f64, f64) {
    let scale = max_magnitude(values);
    if values.is_empty() || scale == 0.0 {
        return (0.0, 0.0);
    }

    let n = values.len() as f64;
    let mean = values.iter().map(|x| x / scale).sum::<f64>() / n;
    let variance = values
        .iter()
        .map(|x| (x / scale - mean).powi(2))
        .sum::<f64>()
        / n;

    (mean * scale, variance.sqrt() * scale)
}

/// Arithmetic mean; 0.0 when empty.
///
/// Accumulated as a running mean so large finite inputs cannot overflow
/// an intermediate sum.
pub(crate) fn mean(values: impl IntoIterator<Item = f64>) -> f64 {
    let mut running = 0.0;
    for (count, v) in values.into_iter().enumerate() {
        running += (v - running) / (count + 1) as f64;
    }
    running
}
