//! Normalized record dissimilarity.

use crate::error::{Result, SynthGuardError};
use crate::models::Record;

/// Fraction of `a`'s columns whose value differs in `b`.
///
/// A column absent from `b` counts as a difference. The result is in
/// `[0, 1]` and is symmetric when both records share one column set.
///
/// # Errors
/// Returns `SynthGuardError::SchemaMismatch` if `a` has no columns, since
/// the ratio is undefined.
///
/// # Example
/// ```rust
/// use synthguard_core::{Record, distance::record_distance};
///
/// let a: Record = [("id", "1"), ("name", "A")].into_iter().collect();
/// let b: Record = [("id", "1"), ("name", "B")].into_iter().collect();
/// assert_eq!(record_distance(&a, &b).unwrap(), 0.5);
/// ```
pub fn record_distance(a: &Record, b: &Record) -> Result<f64> {
    if a.is_empty() {
        return Err(SynthGuardError::schema_mismatch(
            "cannot measure distance from a record with no columns",
        ));
    }

    let differences = a
        .iter()
        .filter(|(column, value)| b.get(column) != Some(*value))
        .count();

    Ok(differences as f64 / a.len() as f64)
}
