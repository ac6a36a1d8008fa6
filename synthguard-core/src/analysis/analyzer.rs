//! Privacy analyzer facade.
//!
//! This module provides the `PrivacyAnalyzer` that runs every comparison
//! stage over a dataset pair and assembles the resulting report.

use std::path::Path;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::Result;
use crate::loader::load_dataset;
use crate::models::Dataset;
use crate::report::PrivacyReport;

use super::config::ReportConfig;
use super::correlation::{analyze_correlations, correlation_preservation};
use super::distribution::{analyze_distributions, distribution_similarity};
use super::fidelity::column_errors;
use super::leakage::analyze_leakage;
use super::scoring::{privacy_guarantees, privacy_metrics, statistical_comparison};

/// Compares an original dataset with a synthetic one.
///
/// The analyzer holds configuration only, so one instance can serve any
/// number of concurrent comparisons.
///
/// # Example
///
/// ```rust
/// use synthguard_core::{Dataset, Record};
/// use synthguard_core::analysis::{PrivacyAnalyzer, ReportConfig};
///
/// let original = Dataset::from_records(
///     "original",
///     vec![[("id", "1"), ("salary", "100")].into_iter().collect::<Record>()],
/// );
/// let synthetic = Dataset::from_records(
///     "synthetic",
///     vec![[("id", "7"), ("salary", "180")].into_iter().collect::<Record>()],
/// );
///
/// let analyzer = PrivacyAnalyzer::new(ReportConfig::default());
/// let report = analyzer.generate_report(&original, &synthetic).unwrap();
/// assert!(report.privacy_metrics().zero_leakage_guarantee);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PrivacyAnalyzer {
    config: ReportConfig,
}

impl PrivacyAnalyzer {
    /// Creates a new analyzer with the given configuration.
    pub fn new(config: ReportConfig) -> Self {
        Self { config }
    }

    /// Creates a new analyzer with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(ReportConfig::default())
    }

    /// Returns a reference to the analyzer configuration.
    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Produces the full report for a dataset pair.
    ///
    /// Empty datasets are valid input: their similarity and fidelity scores
    /// come out as 0.0 and the report is still assembled.
    ///
    /// # Errors
    /// Returns `SynthGuardError::Configuration` for an invalid configuration
    /// and `SynthGuardError::SchemaMismatch` when both datasets have rows but
    /// different column sets. No partial report is produced on error.
    pub fn generate_report(&self, original: &Dataset, synthetic: &Dataset) -> Result<PrivacyReport> {
        self.config.validate()?;
        let started = Instant::now();

        info!(
            "Comparing '{}' ({} rows) with '{}' ({} rows)",
            original.name(),
            original.row_count(),
            synthetic.name(),
            synthetic.row_count()
        );
        if original.is_empty() || synthetic.is_empty() {
            warn!("At least one dataset is empty; similarity and fidelity scores will be 0");
        }

        let leakage = analyze_leakage(original, synthetic, &self.config)?;
        let metrics = privacy_metrics(original, &leakage);
        debug!(
            "Privacy: anonymization {:.2}, level {}",
            metrics.anonymization_score, metrics.privacy_level
        );

        let distributions = analyze_distributions(original, synthetic, &self.config);
        let correlations = analyze_correlations(original, synthetic, self.config.top_differences);
        let comparison = statistical_comparison(
            distribution_similarity(&distributions),
            correlation_preservation(&correlations, original, synthetic),
            column_errors(original, synthetic),
        );
        debug!(
            "Fidelity: distributions {:.2}, correlations {:.2}, quality {}",
            comparison.distribution_similarity,
            comparison.correlation_preservation,
            comparison.quality_score
        );

        let guarantees = privacy_guarantees(original, &leakage);

        let report = PrivacyReport::assemble(
            original.info(),
            synthetic.info(),
            metrics,
            comparison,
            distributions,
            correlations,
            guarantees,
        );
        info!(
            "Report {} generated in {} ms",
            report.report_id(),
            started.elapsed().as_millis()
        );
        Ok(report)
    }

    /// Loads both files and produces their report.
    ///
    /// # Errors
    /// Returns `SynthGuardError::Io` or `SynthGuardError::Parse` when a file
    /// cannot be loaded, plus the errors of [`Self::generate_report`].
    pub fn generate_report_from_paths(
        &self,
        original: &Path,
        synthetic: &Path,
    ) -> Result<PrivacyReport> {
        let original = load_dataset(original)?;
        let synthetic = load_dataset(synthetic)?;
        self.generate_report(&original, &synthetic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{PrivacyLevel, QualityScore};
    use crate::models::Record;

    fn dataset(name: &str, rows: &[(&str, &str, &str)]) -> Dataset {
        let records: Vec<Record> = rows
            .iter()
            .map(|(id, age, income)| {
                [("id", *id), ("age", *age), ("income", *income)]
                    .into_iter()
                    .collect()
            })
            .collect();
        Dataset::from_records(name, records)
    }

    #[test]
    fn test_identical_datasets() {
        let data = dataset(
            "people",
            &[("1", "30", "100"), ("2", "40", "200"), ("3", "50", "350")],
        );
        let report = PrivacyAnalyzer::with_defaults()
            .generate_report(&data, &data)
            .unwrap();

        let metrics = report.privacy_metrics();
        assert!(!metrics.zero_leakage_guarantee);
        assert_eq!(metrics.record_similarity_score, 100.0);
        assert_eq!(metrics.anonymization_score, 0.0);
        assert_eq!(metrics.privacy_level, PrivacyLevel::Low);

        let comparison = report.statistical_comparison();
        assert_eq!(comparison.distribution_similarity, 100.0);
        assert_eq!(comparison.correlation_preservation, 100.0);
        assert_eq!(comparison.quality_score, QualityScore::Excellent);
        assert_eq!(comparison.mean_absolute_error, 0.0);

        assert!(!report.privacy_guarantees().no_original_records_copied);
        assert_eq!(report.privacy_guarantees().minimum_record_distance, 0.0);
    }

    #[test]
    fn test_fresh_synthetic_rows() {
        let original = dataset(
            "original",
            &[("1", "30", "100"), ("2", "40", "200"), ("3", "50", "300")],
        );
        let synthetic = dataset(
            "synthetic",
            &[("7", "35", "150"), ("8", "45", "250"), ("9", "55", "290")],
        );

        let report = PrivacyAnalyzer::with_defaults()
            .generate_report(&original, &synthetic)
            .unwrap();

        let metrics = report.privacy_metrics();
        assert!(metrics.zero_leakage_guarantee);
        assert_eq!(metrics.record_similarity_score, 0.0);
        assert_eq!(metrics.privacy_level, PrivacyLevel::High);
        assert_eq!(report.distributions().len(), 3);
        assert_eq!(report.correlation_analysis().top_differences.len(), 3);
        assert_eq!(report.privacy_guarantees().minimum_record_distance, 1.0);
    }

    #[test]
    fn test_schema_mismatch_is_top_level_error() {
        let original = dataset("original", &[("1", "30", "100")]);
        let synthetic = Dataset::from_records(
            "synthetic",
            vec![[("id", "1"), ("city", "Oslo")].into_iter().collect()],
        );

        let err = PrivacyAnalyzer::with_defaults()
            .generate_report(&original, &synthetic)
            .unwrap_err();
        assert!(err.is_schema_mismatch());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = ReportConfig {
            histogram_bins: 0,
            ..ReportConfig::default()
        };
        let data = dataset("d", &[("1", "2", "3")]);

        let err = PrivacyAnalyzer::new(config)
            .generate_report(&data, &data)
            .unwrap_err();
        assert!(matches!(err, crate::SynthGuardError::Configuration { .. }));
    }

    #[test]
    fn test_analyzer_config_access() {
        let analyzer = PrivacyAnalyzer::new(ReportConfig::new().with_top_differences(2));
        assert_eq!(analyzer.config().top_differences, 2);
    }
}
