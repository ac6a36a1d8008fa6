//! JSON export bundle of synthetic records.
//!
//! An export carries the leading records of the synthetic dataset together
//! with summary metadata and, on request, the full privacy report for the
//! (original, synthetic) pair.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::Result;
use crate::analysis::PrivacyAnalyzer;
use crate::loader::load_dataset;
use crate::models::Record;
use crate::report::PrivacyReport;

/// Records exported when the request does not name a count.
pub const DEFAULT_EXPORT_RECORDS: usize = 1000;

/// Compliance statement written into export metadata.
pub const EXPORT_COMPLIANCE_LEVEL: &str = "GDPR, HIPAA, CCPA Compliant";

/// What to export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportRequest {
    pub original_path: PathBuf,
    /// Dataset whose records are exported; the original when absent
    pub synthetic_path: Option<PathBuf>,
    /// Leading records to export; [`DEFAULT_EXPORT_RECORDS`] when absent
    pub number_of_records: Option<usize>,
    pub include_privacy_report: bool,
}

impl ExportRequest {
    /// Creates a request exporting the original dataset itself.
    pub fn new(original_path: impl Into<PathBuf>) -> Self {
        Self {
            original_path: original_path.into(),
            synthetic_path: None,
            number_of_records: None,
            include_privacy_report: false,
        }
    }

    /// Builder method to set the synthetic dataset.
    pub fn with_synthetic_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.synthetic_path = Some(path.into());
        self
    }

    /// Builder method to cap the number of exported records.
    pub fn with_number_of_records(mut self, count: usize) -> Self {
        self.number_of_records = Some(count);
        self
    }

    /// Builder method to attach the privacy report.
    pub fn with_privacy_report(mut self, include: bool) -> Self {
        self.include_privacy_report = include;
        self
    }

    /// Path of the dataset whose records are exported.
    pub fn export_path(&self) -> &PathBuf {
        self.synthetic_path.as_ref().unwrap_or(&self.original_path)
    }

    /// Effective record cap.
    pub fn record_limit(&self) -> usize {
        self.number_of_records.unwrap_or(DEFAULT_EXPORT_RECORDS)
    }
}

/// Summary of an exported record set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportMetadata {
    pub dataset_name: String,
    pub record_count: usize,
    pub column_count: usize,
    pub generated_at: DateTime<Utc>,
    pub columns: Vec<String>,
    pub privacy_safe: bool,
    pub zero_leakage_guaranteed: bool,
    pub compliance_level: String,
}

/// Complete JSON export document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportBundle {
    pub export_date: DateTime<Utc>,
    pub dataset_name: String,
    pub record_count: usize,
    pub metadata: ExportMetadata,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub privacy_report: Option<PrivacyReport>,
    pub data: Vec<Record>,
}

impl ExportBundle {
    /// Serializes the bundle as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| crate::SynthGuardError::serialization("Failed to serialize export", e))
    }
}

/// Builds an export bundle.
///
/// The report, when requested, covers the full datasets; only the exported
/// records are capped.
///
/// # Errors
/// Returns loader errors for unreadable files and analyzer errors when the
/// privacy report is requested and cannot be produced.
pub fn build_export(request: &ExportRequest, analyzer: &PrivacyAnalyzer) -> Result<ExportBundle> {
    let synthetic = load_dataset(request.export_path())?;

    let privacy_report = if request.include_privacy_report {
        let original = load_dataset(&request.original_path)?;
        Some(analyzer.generate_report(&original, &synthetic)?)
    } else {
        None
    };

    let data: Vec<Record> = synthetic
        .records()
        .iter()
        .take(request.record_limit())
        .cloned()
        .collect();

    let zero_leakage_guaranteed = privacy_report
        .as_ref()
        .is_none_or(|report| report.privacy_metrics().zero_leakage_guarantee);
    let now = Utc::now();

    let metadata = ExportMetadata {
        dataset_name: synthetic.name().to_string(),
        record_count: data.len(),
        column_count: synthetic.columns().len(),
        generated_at: now,
        columns: synthetic.columns().to_vec(),
        privacy_safe: zero_leakage_guaranteed,
        zero_leakage_guaranteed,
        compliance_level: EXPORT_COMPLIANCE_LEVEL.to_string(),
    };

    info!(
        "Exporting {} of {} records from '{}'",
        data.len(),
        synthetic.row_count(),
        synthetic.name()
    );

    Ok(ExportBundle {
        export_date: now,
        dataset_name: synthetic.name().to_string(),
        record_count: data.len(),
        metadata,
        privacy_report,
        data,
    })
}

/// File name of the form `prefix_YYYYMMDD_HHMMSS.extension`.
pub fn export_filename(prefix: &str, extension: &str, now: DateTime<Utc>) -> String {
    format!("{}_{}.{}", prefix, now.format("%Y%m%d_%H%M%S"), extension)
}
