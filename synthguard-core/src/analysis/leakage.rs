//! Record duplication and nearest-neighbour similarity.
//!
//! Leakage is an exact match: a synthetic record whose canonical form equals
//! that of any original record. Similarity is approximate and sampled; only
//! the leading records of each dataset take part, so the pairwise scan stays
//! bounded no matter how large the inputs are.

use std::collections::{BTreeSet, HashSet};

use tracing::debug;

use crate::distance::record_distance;
use crate::error::{Result, SynthGuardError};
use crate::models::{Dataset, Record};

use super::config::ReportConfig;

/// Raw record-level measurements for one dataset pair.
#[derive(Debug, Clone, PartialEq)]
pub struct LeakageAnalysis {
    /// Synthetic records identical to some original record
    pub leaked_records: usize,
    /// Mean nearest-neighbour similarity percentage (0-100)
    pub record_similarity_score: f64,
    /// Smallest sampled record distance (0-1)
    pub minimum_record_distance: f64,
}

impl LeakageAnalysis {
    /// Returns true when no synthetic record was copied verbatim.
    pub fn zero_leakage(&self) -> bool {
        self.leaked_records == 0
    }
}

/// Fails if two non-empty datasets do not share one column set.
///
/// Column order is irrelevant. An empty dataset is compatible with anything
/// so degenerate inputs still produce a report.
pub fn check_schema(original: &Dataset, synthetic: &Dataset) -> Result<()> {
    if original.is_empty() || synthetic.is_empty() {
        return Ok(());
    }

    let original_columns: BTreeSet<&str> = original.columns().iter().map(String::as_str).collect();
    let synthetic_columns: BTreeSet<&str> =
        synthetic.columns().iter().map(String::as_str).collect();

    if original_columns == synthetic_columns {
        return Ok(());
    }

    let missing: Vec<&str> = original_columns
        .difference(&synthetic_columns)
        .copied()
        .collect();
    let unexpected: Vec<&str> = synthetic_columns
        .difference(&original_columns)
        .copied()
        .collect();

    Err(SynthGuardError::schema_mismatch(format!(
        "synthetic dataset '{}' is missing columns [{}] and has unexpected columns [{}] relative to '{}'",
        synthetic.name(),
        missing.join(", "),
        unexpected.join(", "),
        original.name()
    )))
}

/// Counts synthetic records that exactly match an original record.
pub fn count_leaked_records(original: &[Record], synthetic: &[Record]) -> usize {
    let seen: HashSet<String> = original.iter().map(Record::canonical).collect();
    synthetic
        .iter()
        .filter(|record| seen.contains(&record.canonical()))
        .count()
}

/// Mean nearest-neighbour similarity over the first `limit` records of each side.
///
/// Each sampled synthetic record contributes `(1 - d) * 100`, where `d` is its
/// smallest distance to any sampled original record. Returns 0.0 when either
/// side is empty.
pub fn similarity_score(original: &[Record], synthetic: &[Record], limit: usize) -> Result<f64> {
    let originals = &original[..original.len().min(limit)];
    let synthetics = &synthetic[..synthetic.len().min(limit)];
    if originals.is_empty() || synthetics.is_empty() {
        return Ok(0.0);
    }

    let mut total = 0.0;
    for candidate in synthetics {
        let nearest = nearest_distance(originals, candidate)?;
        total += (1.0 - nearest) * 100.0;
    }

    Ok(total / synthetics.len() as f64)
}

/// Smallest distance between the first `limit` records of each side.
///
/// Returns 1.0 when either side is empty.
pub fn minimum_record_distance(
    original: &[Record],
    synthetic: &[Record],
    limit: usize,
) -> Result<f64> {
    let originals = &original[..original.len().min(limit)];
    let synthetics = &synthetic[..synthetic.len().min(limit)];
    if originals.is_empty() || synthetics.is_empty() {
        return Ok(1.0);
    }

    let mut minimum: f64 = 1.0;
    for candidate in synthetics {
        minimum = minimum.min(nearest_distance(originals, candidate)?);
    }
    Ok(minimum)
}

/// Distance from `candidate` to its closest record in `originals`.
fn nearest_distance(originals: &[Record], candidate: &Record) -> Result<f64> {
    let mut nearest: f64 = 1.0;
    for original in originals {
        nearest = nearest.min(record_distance(original, candidate)?);
        if nearest == 0.0 {
            break;
        }
    }
    Ok(nearest)
}

/// Runs the duplication check and both sampled distance scans.
///
/// # Errors
/// Returns `SynthGuardError::SchemaMismatch` when the datasets do not share
/// a column set.
pub fn analyze_leakage(
    original: &Dataset,
    synthetic: &Dataset,
    config: &ReportConfig,
) -> Result<LeakageAnalysis> {
    check_schema(original, synthetic)?;

    let leaked_records = count_leaked_records(original.records(), synthetic.records());
    let record_similarity_score = similarity_score(
        original.records(),
        synthetic.records(),
        config.similarity_sample_limit,
    )?;
    let minimum_record_distance = minimum_record_distance(
        original.records(),
        synthetic.records(),
        config.min_distance_sample_limit,
    )?;

    debug!(
        "Leakage scan: {} leaked records, similarity {:.2}%, minimum distance {:.4}",
        leaked_records, record_similarity_score, minimum_record_distance
    );

    Ok(LeakageAnalysis {
        leaked_records,
        record_similarity_score: record_similarity_score.clamp(0.0, 100.0),
        minimum_record_distance,
    })
}
