//! The root report value.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::analysis::{
    CorrelationAnalysis, DistributionAnalysis, PrivacyGuarantees, PrivacyMetrics,
    StatisticalComparison,
};
use crate::models::DatasetInfo;

/// Report format version written into every report.
pub const REPORT_FORMAT_VERSION: &str = "1.0";

/// Privacy & fidelity report for one (original, synthetic) dataset pair.
///
/// Built once by [`PrivacyReport::assemble`] and read-only afterwards; the
/// fields are reachable through accessors only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrivacyReport {
    report_id: String,
    generated_at: DateTime<Utc>,
    format_version: String,
    original_dataset: DatasetInfo,
    synthetic_dataset: DatasetInfo,
    privacy_metrics: PrivacyMetrics,
    statistical_comparison: StatisticalComparison,
    distributions: Vec<DistributionAnalysis>,
    correlation_analysis: CorrelationAnalysis,
    privacy_guarantees: PrivacyGuarantees,
}

impl PrivacyReport {
    /// Composes a report from its computed blocks.
    ///
    /// Stamps a fresh v4 identifier and the current UTC time.
    pub fn assemble(
        original_dataset: DatasetInfo,
        synthetic_dataset: DatasetInfo,
        privacy_metrics: PrivacyMetrics,
        statistical_comparison: StatisticalComparison,
        distributions: Vec<DistributionAnalysis>,
        correlation_analysis: CorrelationAnalysis,
        privacy_guarantees: PrivacyGuarantees,
    ) -> Self {
        Self {
            report_id: Uuid::new_v4().to_string(),
            generated_at: Utc::now(),
            format_version: REPORT_FORMAT_VERSION.to_string(),
            original_dataset,
            synthetic_dataset,
            privacy_metrics,
            statistical_comparison,
            distributions,
            correlation_analysis,
            privacy_guarantees,
        }
    }

    pub fn report_id(&self) -> &str {
        &self.report_id
    }

    pub fn generated_at(&self) -> DateTime<Utc> {
        self.generated_at
    }

    pub fn format_version(&self) -> &str {
        &self.format_version
    }

    pub fn original_dataset(&self) -> &DatasetInfo {
        &self.original_dataset
    }

    pub fn synthetic_dataset(&self) -> &DatasetInfo {
        &self.synthetic_dataset
    }

    pub fn privacy_metrics(&self) -> &PrivacyMetrics {
        &self.privacy_metrics
    }

    pub fn statistical_comparison(&self) -> &StatisticalComparison {
        &self.statistical_comparison
    }

    /// Per-column distribution analyses; empty for an empty dataset.
    pub fn distributions(&self) -> &[DistributionAnalysis] {
        &self.distributions
    }

    pub fn correlation_analysis(&self) -> &CorrelationAnalysis {
        &self.correlation_analysis
    }

    pub fn privacy_guarantees(&self) -> &PrivacyGuarantees {
        &self.privacy_guarantees
    }

    /// Serializes the report as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> crate::Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| crate::SynthGuardError::serialization("Failed to serialize privacy report", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{PrivacyLevel, QualityScore};
    use crate::models::Dataset;

    fn sample_report() -> PrivacyReport {
        let info = Dataset::from_records("d", vec![]).info();
        PrivacyReport::assemble(
            info.clone(),
            info,
            PrivacyMetrics {
                anonymization_score: 100.0,
                record_similarity_score: 0.0,
                sensitive_fields_detected: 0,
                sensitive_fields_protected: 0,
                zero_leakage_guarantee: true,
                privacy_level: PrivacyLevel::High,
            },
            StatisticalComparison {
                distribution_similarity: 0.0,
                correlation_preservation: 0.0,
                mean_absolute_error: 0.0,
                standard_deviation_error: 0.0,
                quality_score: QualityScore::Poor,
                column_errors: vec![],
            },
            vec![],
            CorrelationAnalysis::default(),
            PrivacyGuarantees {
                no_pii_leakage: true,
                no_financial_data_leakage: true,
                no_medical_data_leakage: true,
                no_location_data_leakage: true,
                no_original_records_copied: true,
                minimum_record_distance: 1.0,
                compliance_level: "GDPR, HIPAA, CCPA".to_string(),
                privacy_techniques_applied: vec![],
            },
        )
    }

    #[test]
    fn test_assemble_stamps_identity() {
        let first = sample_report();
        let second = sample_report();

        assert_eq!(first.format_version(), "1.0");
        assert_ne!(first.report_id(), second.report_id());
        assert!(Uuid::parse_str(first.report_id()).is_ok());
    }

    #[test]
    fn test_report_json_shape() {
        let report = sample_report();
        let json: serde_json::Value =
            serde_json::from_str(&report.to_json_pretty().unwrap()).unwrap();

        assert_eq!(json["formatVersion"], "1.0");
        assert_eq!(json["privacyMetrics"]["privacyLevel"], "HIGH");
        assert_eq!(json["statisticalComparison"]["qualityScore"], "POOR");
        assert!(json["distributions"].as_array().unwrap().is_empty());
        assert!(json["generatedAt"].is_string());
    }

    #[test]
    fn test_report_roundtrip() {
        let report = sample_report();
        let json = report.to_json_pretty().unwrap();
        let back: PrivacyReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back, report);
    }
}
