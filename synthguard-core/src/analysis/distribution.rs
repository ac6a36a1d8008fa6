//! Per-column distribution comparison.
//!
//! STRING columns are compared on raw value frequencies. Numeric columns are
//! first bucketed into equal-width bins spanning the combined range of both
//! datasets, so the two histograms share their bucket boundaries.

use std::collections::BTreeMap;
use std::f64::consts::LN_2;

use rayon::prelude::*;
use tracing::debug;

use crate::models::{ColumnProfile, Dataset, Record};

use super::config::ReportConfig;
use super::models::DistributionAnalysis;
use super::numeric::{mean, numeric_values};

/// Observation counts of both datasets over one shared support.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Histogram {
    /// Value or bucket label of each support element
    pub labels: Vec<String>,
    pub original: Vec<usize>,
    pub synthetic: Vec<usize>,
}

impl Histogram {
    fn original_total(&self) -> usize {
        self.original.iter().sum()
    }

    fn synthetic_total(&self) -> usize {
        self.synthetic.iter().sum()
    }

    /// Relative frequencies keyed by label; empty when the side has no observations.
    fn relative(&self, counts: &[usize]) -> BTreeMap<String, f64> {
        let total: usize = counts.iter().sum();
        let mut frequencies = BTreeMap::new();
        if total == 0 {
            return frequencies;
        }
        for (label, &count) in self.labels.iter().zip(counts) {
            if count > 0 {
                frequencies.insert(label.clone(), count as f64 / total as f64);
            }
        }
        frequencies
    }
}

/// Counts raw values of `column` in both datasets.
pub fn categorical_histogram(original: &[Record], synthetic: &[Record], column: &str) -> Histogram {
    let mut counts: BTreeMap<&str, (usize, usize)> = BTreeMap::new();
    for value in original.iter().filter_map(|r| r.get(column)) {
        counts.entry(value).or_default().0 += 1;
    }
    for value in synthetic.iter().filter_map(|r| r.get(column)) {
        counts.entry(value).or_default().1 += 1;
    }

    let mut histogram = Histogram::default();
    for (label, (o, s)) in counts {
        histogram.labels.push(label.to_string());
        histogram.original.push(o);
        histogram.synthetic.push(s);
    }
    histogram
}

/// Bucket boundaries at or above this magnitude are labelled in scientific notation.
const SCIENTIFIC_MAGNITUDE: f64 = 1e15;
/// Fixed-point labels never use more decimals than this.
const MAX_FIXED_DECIMALS: usize = 10;

/// Number formatting shared by every bucket label of one histogram.
#[derive(Debug, Clone, Copy, PartialEq)]
enum LabelStyle {
    Fixed(usize),
    Scientific(usize),
}

impl LabelStyle {
    /// Picks a precision at which boundaries `width` apart print differently.
    ///
    /// Two decimals suffice for bins at least 0.1 wide; narrower bins get one
    /// more decimal per decade. Very large or very fine ranges switch to
    /// scientific notation with enough significant digits for the width.
    fn for_range(magnitude: f64, width: f64) -> Self {
        let significant = || {
            if width > 0.0 {
                ((magnitude / width).log10().ceil() as i64 + 1).clamp(2, 17) as usize
            } else {
                2
            }
        };
        if magnitude >= SCIENTIFIC_MAGNITUDE {
            return LabelStyle::Scientific(significant());
        }
        let decimals = if width > 0.0 {
            (1.0 - width.log10()).ceil().max(2.0) as usize
        } else {
            2
        };
        if decimals > MAX_FIXED_DECIMALS {
            LabelStyle::Scientific(significant())
        } else {
            LabelStyle::Fixed(decimals)
        }
    }

    fn label(self, start: f64, end: f64) -> String {
        match self {
            LabelStyle::Fixed(p) => format!("{start:.p$}-{end:.p$}"),
            LabelStyle::Scientific(p) => format!("{start:.p$e}-{end:.p$e}"),
        }
    }
}

/// Buckets numeric values of `column` into `bins` equal-width bins.
///
/// Bins span the combined min..max of both datasets and are labelled
/// `"lo-hi"`, with two decimals unless the bins are narrower than 0.1.
/// Every bin gets its own label. Only bins holding at least one observation
/// are kept. A zero-width range collapses into a single bucket, as does a
/// range too narrow to split at the values' floating point resolution.
pub fn numeric_histogram(
    original: &[Record],
    synthetic: &[Record],
    column: &str,
    bins: usize,
) -> Histogram {
    let original_values = numeric_values(original, column);
    let synthetic_values = numeric_values(synthetic, column);

    let (lo, hi) = original_values
        .iter()
        .chain(&synthetic_values)
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    if lo > hi {
        return Histogram::default();
    }

    let bins = bins.max(1);
    let magnitude = lo.abs().max(hi.abs());
    // Divided before subtracting so a range wider than f64::MAX stays finite
    let width = hi / bins as f64 - lo / bins as f64;
    let bucket_count = if width > 4.0 * f64::EPSILON * magnitude {
        bins
    } else {
        1
    };
    let bucket = |v: f64| -> usize {
        if bucket_count == 1 {
            0
        } else {
            (((v - lo) / width).floor() as usize).min(bucket_count - 1)
        }
    };

    let mut original_counts = vec![0usize; bucket_count];
    let mut synthetic_counts = vec![0usize; bucket_count];
    for &v in &original_values {
        original_counts[bucket(v)] += 1;
    }
    for &v in &synthetic_values {
        synthetic_counts[bucket(v)] += 1;
    }

    let style = if bucket_count == 1 {
        LabelStyle::for_range(magnitude, 0.0)
    } else {
        LabelStyle::for_range(magnitude, width)
    };

    let mut histogram = Histogram::default();
    for i in 0..bucket_count {
        if original_counts[i] == 0 && synthetic_counts[i] == 0 {
            continue;
        }
        let (start, end) = if bucket_count == 1 {
            (lo, hi)
        } else if i + 1 == bucket_count {
            (lo + i as f64 * width, hi)
        } else {
            (lo + i as f64 * width, lo + (i + 1) as f64 * width)
        };
        histogram.labels.push(style.label(start, end));
        histogram.original.push(original_counts[i]);
        histogram.synthetic.push(synthetic_counts[i]);
    }
    histogram
}

/// Smoothed Kullback-Leibler divergence KL(P || Q), natural log.
///
/// Each probability is `(count + alpha) / (n + alpha * k)` over the shared
/// support of size `k`, so an element unseen on one side stays finite.
pub fn kl_divergence(p: &[usize], q: &[usize], alpha: f64) -> f64 {
    let k = p.len().min(q.len());
    if k == 0 {
        return 0.0;
    }
    let n_p: usize = p.iter().take(k).sum();
    let n_q: usize = q.iter().take(k).sum();
    let p_denominator = n_p as f64 + alpha * k as f64;
    let q_denominator = n_q as f64 + alpha * k as f64;

    let divergence: f64 = p
        .iter()
        .zip(q)
        .map(|(&pc, &qc)| {
            let pi = (pc as f64 + alpha) / p_denominator;
            let qi = (qc as f64 + alpha) / q_denominator;
            pi * (pi / qi).ln()
        })
        .sum();
    divergence.max(0.0)
}

/// Jensen-Shannon divergence, natural log, bounded to [0, ln 2].
///
/// Two empty sides are identical (0.0); one empty side is maximally
/// different (ln 2).
pub fn js_divergence(p: &[usize], q: &[usize]) -> f64 {
    let n_p: usize = p.iter().sum();
    let n_q: usize = q.iter().sum();
    match (n_p, n_q) {
        (0, 0) => return 0.0,
        (0, _) | (_, 0) => return LN_2,
        _ => {}
    }

    let mut divergence = 0.0;
    for (&pc, &qc) in p.iter().zip(q) {
        let pi = pc as f64 / n_p as f64;
        let qi = qc as f64 / n_q as f64;
        let mi = (pi + qi) / 2.0;
        if pi > 0.0 {
            divergence += 0.5 * pi * (pi / mi).ln();
        }
        if qi > 0.0 {
            divergence += 0.5 * qi * (qi / mi).ln();
        }
    }
    divergence.clamp(0.0, LN_2)
}

/// Builds the distribution analysis of one column.
pub fn analyze_column(
    profile: &ColumnProfile,
    original: &Dataset,
    synthetic: &Dataset,
    config: &ReportConfig,
) -> DistributionAnalysis {
    let histogram = if profile.data_type.is_numeric() {
        numeric_histogram(
            original.records(),
            synthetic.records(),
            &profile.name,
            config.histogram_bins,
        )
    } else {
        categorical_histogram(original.records(), synthetic.records(), &profile.name)
    };

    if histogram.original_total() == 0 || histogram.synthetic_total() == 0 {
        debug!(
            "Column '{}' has no comparable values on one side",
            profile.name
        );
    }

    DistributionAnalysis {
        column_name: profile.name.clone(),
        data_type: profile.data_type,
        original_distribution: histogram.relative(&histogram.original),
        synthetic_distribution: histogram.relative(&histogram.synthetic),
        kl_divergence: kl_divergence(&histogram.original, &histogram.synthetic, config.smoothing),
        js_divergence: js_divergence(&histogram.original, &histogram.synthetic),
    }
}

/// Compares the leading columns of the original dataset.
///
/// Column order and types come from the original dataset's profiles. Returns
/// an empty list when either dataset has no rows.
pub fn analyze_distributions(
    original: &Dataset,
    synthetic: &Dataset,
    config: &ReportConfig,
) -> Vec<DistributionAnalysis> {
    if original.is_empty() || synthetic.is_empty() {
        return Vec::new();
    }

    let profiles = original.column_profiles();
    let selected = &profiles[..profiles.len().min(config.distribution_column_limit)];

    selected
        .par_iter()
        .map(|profile| analyze_column(profile, original, synthetic, config))
        .collect()
}

/// Maps the mean JS divergence from [0, ln 2] onto a [100, 0] score.
///
/// Returns 0.0 when there is nothing to compare.
pub fn distribution_similarity(analyses: &[DistributionAnalysis]) -> f64 {
    if analyses.is_empty() {
        return 0.0;
    }
    let mean_js = mean(analyses.iter().map(|a| a.js_divergence));
    (100.0 * (1.0 - mean_js / LN_2)).clamp(0.0, 100.0)
}
