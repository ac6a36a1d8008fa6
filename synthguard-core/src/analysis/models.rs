//! Comparison result models.
//!
//! These blocks make up the body of a `PrivacyReport`. They carry scores,
//! counts, coefficients and frequencies, never whole records. Distributions
//! of STRING columns are keyed by the raw cell values, so names or emails
//! in an analysed column appear in the report as frequency keys.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::DataType;

/// Privacy band derived from the anonymization score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PrivacyLevel {
    High,
    Medium,
    Low,
}

impl fmt::Display for PrivacyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrivacyLevel::High => write!(f, "HIGH"),
            PrivacyLevel::Medium => write!(f, "MEDIUM"),
            PrivacyLevel::Low => write!(f, "LOW"),
        }
    }
}

/// Fidelity band derived from distribution and correlation scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum QualityScore {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl fmt::Display for QualityScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QualityScore::Excellent => write!(f, "EXCELLENT"),
            QualityScore::Good => write!(f, "GOOD"),
            QualityScore::Fair => write!(f, "FAIR"),
            QualityScore::Poor => write!(f, "POOR"),
        }
    }
}

/// Record-level privacy measurements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrivacyMetrics {
    /// 100 minus the record similarity score (0-100, higher is better)
    pub anonymization_score: f64,
    /// Mean nearest-neighbour similarity percentage (0-100, lower is better)
    pub record_similarity_score: f64,
    /// Sensitive columns found in the original dataset
    pub sensitive_fields_detected: usize,
    /// Sensitive columns regenerated rather than copied
    pub sensitive_fields_protected: usize,
    /// True when no synthetic record exactly matches an original record
    pub zero_leakage_guarantee: bool,
    pub privacy_level: PrivacyLevel,
}

/// Normalised moment errors for one numeric column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnError {
    pub column_name: String,
    /// |mean(original) - mean(synthetic)| over the original standard deviation
    pub mean_error: f64,
    /// |std(original) - std(synthetic)| over the original standard deviation
    pub std_dev_error: f64,
}

/// Aggregate statistical fidelity of the synthetic dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticalComparison {
    /// Mean JS divergence mapped from [0, ln 2] onto [100, 0]
    pub distribution_similarity: f64,
    /// 100 * (1 - mean |r_orig - r_synth| / 2), clamped to [0, 100]
    pub correlation_preservation: f64,
    pub mean_absolute_error: f64,
    pub standard_deviation_error: f64,
    pub quality_score: QualityScore,
    #[serde(default)]
    pub column_errors: Vec<ColumnError>,
}

/// Empirical distributions of one column in both datasets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistributionAnalysis {
    pub column_name: String,
    pub data_type: DataType,
    /// Value or bucket label to relative frequency
    pub original_distribution: BTreeMap<String, f64>,
    pub synthetic_distribution: BTreeMap<String, f64>,
    /// Smoothed KL(original || synthetic)
    pub kl_divergence: f64,
    /// Jensen-Shannon divergence, natural log, in [0, ln 2]
    pub js_divergence: f64,
}

/// Pearson coefficients of one numeric column pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrelationPair {
    pub column1: String,
    pub column2: String,
    pub original_correlation: f64,
    pub synthetic_correlation: f64,
    /// Absolute difference of the two coefficients
    pub difference: f64,
}

/// Correlation structure of both datasets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrelationAnalysis {
    /// Symmetric column -> column -> coefficient map, diagonal omitted
    pub original_correlations: BTreeMap<String, BTreeMap<String, f64>>,
    pub synthetic_correlations: BTreeMap<String, BTreeMap<String, f64>>,
    /// Mean absolute coefficient difference over all pairs
    pub overall_correlation_error: f64,
    /// Pairs with the largest difference, descending
    pub top_differences: Vec<CorrelationPair>,
}

/// Pass/fail privacy statements attached to a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrivacyGuarantees {
    pub no_pii_leakage: bool,
    pub no_financial_data_leakage: bool,
    pub no_medical_data_leakage: bool,
    pub no_location_data_leakage: bool,
    pub no_original_records_copied: bool,
    /// Smallest distance between sampled synthetic and original records
    pub minimum_record_distance: f64,
    pub compliance_level: String,
    /// Informational only; nothing here is verified
    pub privacy_techniques_applied: Vec<String>,
}
