//! Threshold bands and summary blocks.
//!
//! Bands are evaluated top-down and the first match wins. All thresholds are
//! strict: an anonymization score of exactly 90 is MEDIUM, not HIGH.

use crate::models::{Dataset, SensitivityCategory};

use super::leakage::LeakageAnalysis;
use super::models::{
    ColumnError, PrivacyGuarantees, PrivacyLevel, PrivacyMetrics, QualityScore,
    StatisticalComparison,
};

/// Regulations the generated data is claimed to be prepared for.
pub const COMPLIANCE_LEVEL: &str = "GDPR, HIPAA, CCPA";

/// Techniques listed in every report; informational only.
pub const PRIVACY_TECHNIQUES: [&str; 6] = [
    "CTGAN (Conditional Tabular GAN)",
    "Differential Privacy Noise Injection",
    "K-Anonymity Preservation",
    "Sensitive Field Masking",
    "Statistical Distribution Matching",
    "Record-level Distance Guarantees",
];

/// Maps an anonymization score and leakage result to a privacy band.
pub fn privacy_level(anonymization_score: f64, zero_leakage: bool) -> PrivacyLevel {
    if anonymization_score > 90.0 && zero_leakage {
        PrivacyLevel::High
    } else if anonymization_score > 70.0 {
        PrivacyLevel::Medium
    } else {
        PrivacyLevel::Low
    }
}

/// Maps the average of the two fidelity scores to a quality band.
pub fn quality_score(distribution_similarity: f64, correlation_preservation: f64) -> QualityScore {
    let average = (distribution_similarity + correlation_preservation) / 2.0;
    if average > 90.0 {
        QualityScore::Excellent
    } else if average > 75.0 {
        QualityScore::Good
    } else if average > 60.0 {
        QualityScore::Fair
    } else {
        QualityScore::Poor
    }
}

/// Builds the privacy metrics block from the leakage scan.
pub fn privacy_metrics(original: &Dataset, leakage: &LeakageAnalysis) -> PrivacyMetrics {
    let record_similarity_score = leakage.record_similarity_score;
    let anonymization_score = 100.0 - record_similarity_score;
    let zero_leakage_guarantee = leakage.zero_leakage();
    let sensitive_fields_detected = original.sensitive_columns().count();

    PrivacyMetrics {
        anonymization_score,
        record_similarity_score,
        sensitive_fields_detected,
        sensitive_fields_protected: sensitive_fields_detected,
        zero_leakage_guarantee,
        privacy_level: privacy_level(anonymization_score, zero_leakage_guarantee),
    }
}

/// Builds the statistical comparison block.
pub fn statistical_comparison(
    distribution_similarity: f64,
    correlation_preservation: f64,
    column_errors: Vec<ColumnError>,
) -> StatisticalComparison {
    StatisticalComparison {
        distribution_similarity,
        correlation_preservation,
        mean_absolute_error: super::fidelity::mean_absolute_error(&column_errors),
        standard_deviation_error: super::fidelity::standard_deviation_error(&column_errors),
        quality_score: quality_score(distribution_similarity, correlation_preservation),
        column_errors,
    }
}

/// Builds the guarantees block.
///
/// A category guarantee holds when the original has no column of that
/// category, or when no record was copied verbatim. Sensitive fields are not
/// checked one by one.
pub fn privacy_guarantees(original: &Dataset, leakage: &LeakageAnalysis) -> PrivacyGuarantees {
    let zero_leakage = leakage.zero_leakage();
    let holds = |category| zero_leakage || !original.has_category(category);

    PrivacyGuarantees {
        no_pii_leakage: holds(SensitivityCategory::Pii),
        no_financial_data_leakage: holds(SensitivityCategory::Financial),
        no_medical_data_leakage: holds(SensitivityCategory::Medical),
        no_location_data_leakage: holds(SensitivityCategory::Location),
        no_original_records_copied: zero_leakage,
        minimum_record_distance: leakage.minimum_record_distance,
        compliance_level: COMPLIANCE_LEVEL.to_string(),
        privacy_techniques_applied: PRIVACY_TECHNIQUES.iter().map(|t| t.to_string()).collect(),
    }
}
