//! Pearson correlation structure of numeric columns.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use rayon::prelude::*;

use crate::models::{Dataset, Record};

use super::models::{CorrelationAnalysis, CorrelationPair};
use super::numeric::{max_magnitude, mean, parse_numeric};

/// Variances below this are treated as zero.
const VARIANCE_EPSILON: f64 = 1e-12;

/// Pearson correlation of two columns over rows where both cells are numeric.
///
/// Returns 0.0 with fewer than two usable rows or when either column is
/// constant.
pub fn pearson(records: &[Record], column1: &str, column2: &str) -> f64 {
    let pairs: Vec<(f64, f64)> = records
        .iter()
        .filter_map(|record| {
            let x = record.get(column1).and_then(parse_numeric)?;
            let y = record.get(column2).and_then(parse_numeric)?;
            Some((x, y))
        })
        .collect();

    if pairs.len() < 2 {
        return 0.0;
    }

    // The coefficient is scale-invariant; unit-scaled values keep the
    // sums of squares finite.
    let (xs, ys): (Vec<f64>, Vec<f64>) = pairs.into_iter().unzip();
    let scale_x = max_magnitude(&xs);
    let scale_y = max_magnitude(&ys);
    if scale_x == 0.0 || scale_y == 0.0 {
        return 0.0;
    }

    let n = xs.len() as f64;
    let mean_x = xs.iter().map(|x| x / scale_x).sum::<f64>() / n;
    let mean_y = ys.iter().map(|y| y / scale_y).sum::<f64>() / n;

    let (mut covariance, mut variance_x, mut variance_y) = (0.0, 0.0, 0.0);
    for (x, y) in xs.iter().zip(&ys) {
        let dx = x / scale_x - mean_x;
        let dy = y / scale_y - mean_y;
        covariance += dx * dy;
        variance_x += dx * dx;
        variance_y += dy * dy;
    }

    if variance_x < VARIANCE_EPSILON || variance_y < VARIANCE_EPSILON {
        return 0.0;
    }
    let coefficient = covariance / (variance_x.sqrt() * variance_y.sqrt());
    if coefficient.is_finite() {
        coefficient.clamp(-1.0, 1.0)
    } else {
        0.0
    }
}

/// Numeric columns of the original dataset that the synthetic dataset also profiles.
fn shared_numeric_columns<'a>(original: &'a Dataset, synthetic: &Dataset) -> Vec<&'a str> {
    original
        .numeric_columns()
        .into_iter()
        .filter(|column| synthetic.profile(column).is_some())
        .collect()
}

fn insert_symmetric(
    matrix: &mut BTreeMap<String, BTreeMap<String, f64>>,
    column1: &str,
    column2: &str,
    value: f64,
) {
    matrix
        .entry(column1.to_string())
        .or_default()
        .insert(column2.to_string(), value);
    matrix
        .entry(column2.to_string())
        .or_default()
        .insert(column1.to_string(), value);
}

/// Orders pairs by descending difference, then by column names.
fn by_difference(a: &CorrelationPair, b: &CorrelationPair) -> Ordering {
    b.difference
        .total_cmp(&a.difference)
        .then_with(|| a.column1.cmp(&b.column1))
        .then_with(|| a.column2.cmp(&b.column2))
}

/// Correlates every pair of shared numeric columns in both datasets.
///
/// Returns an empty analysis when either dataset has no rows.
pub fn analyze_correlations(
    original: &Dataset,
    synthetic: &Dataset,
    top_differences: usize,
) -> CorrelationAnalysis {
    if original.is_empty() || synthetic.is_empty() {
        return CorrelationAnalysis::default();
    }

    let columns = shared_numeric_columns(original, synthetic);
    let column_pairs: Vec<(&str, &str)> = columns
        .iter()
        .enumerate()
        .flat_map(|(i, &a)| columns[i + 1..].iter().map(move |&b| (a, b)))
        .collect();

    let pairs: Vec<CorrelationPair> = column_pairs
        .par_iter()
        .map(|&(column1, column2)| {
            let original_correlation = pearson(original.records(), column1, column2);
            let synthetic_correlation = pearson(synthetic.records(), column1, column2);
            CorrelationPair {
                column1: column1.to_string(),
                column2: column2.to_string(),
                original_correlation,
                synthetic_correlation,
                difference: (original_correlation - synthetic_correlation).abs(),
            }
        })
        .collect();

    let mut analysis = CorrelationAnalysis {
        overall_correlation_error: mean(pairs.iter().map(|p| p.difference)),
        ..CorrelationAnalysis::default()
    };
    for pair in &pairs {
        insert_symmetric(
            &mut analysis.original_correlations,
            &pair.column1,
            &pair.column2,
            pair.original_correlation,
        );
        insert_symmetric(
            &mut analysis.synthetic_correlations,
            &pair.column1,
            &pair.column2,
            pair.synthetic_correlation,
        );
    }

    let mut ranked = pairs;
    ranked.sort_by(by_difference);
    ranked.truncate(top_differences);
    analysis.top_differences = ranked;

    tracing::debug!(
        "Correlated {} numeric column pairs, mean difference {:.4}",
        column_pairs.len(),
        analysis.overall_correlation_error
    );
    analysis
}

/// Scores how well correlations survived, from 0 to 100.
///
/// 0.0 when either dataset is empty; 100.0 when both have rows but no
/// numeric column pair exists.
pub fn correlation_preservation(
    analysis: &CorrelationAnalysis,
    original: &Dataset,
    synthetic: &Dataset,
) -> f64 {
    if original.is_empty() || synthetic.is_empty() {
        return 0.0;
    }
    if analysis.original_correlations.is_empty() {
        return 100.0;
    }
    (100.0 * (1.0 - analysis.overall_correlation_error / 2.0)).clamp(0.0, 100.0)
}
