//! Core comparison engine for SynthGuard.
//!
//! This crate compares an original tabular dataset with a synthetic one and
//! produces a Privacy & Fidelity Report: evidence that no original record
//! was copied, together with scores for how closely the synthetic data
//! follows the original's distributions and correlations.
//!
//! # Security Guarantees
//! - Offline-only operation: two local files in, one report out
//! - Record values are never written to logs
//! - Reports carry scores, counts and frequencies, never whole records;
//!   categorical frequencies are keyed by the raw cell values
//!
//! # Architecture
//! Loader -> classifier -> {distance -> leakage; distributions, correlations}
//! -> scoring -> report. Every stage is a pure function of the two datasets
//! and the [`ReportConfig`].
//!
//! This is an empirical measurement, not a differential-privacy mechanism:
//! nothing here adds noise or enforces formal guarantees.

pub mod analysis;
pub mod classifier;
pub mod distance;
pub mod error;
pub mod export;
pub mod loader;
pub mod logging;
pub mod models;
pub mod report;
pub mod validation;

// Re-export commonly used types
pub use analysis::{PrivacyAnalyzer, ReportConfig};
pub use error::{Result, SynthGuardError};
pub use export::{ExportBundle, ExportRequest, build_export, export_filename};
pub use loader::{load_dataset, load_records};
pub use logging::init_logging;
pub use models::{ColumnProfile, DataType, Dataset, DatasetInfo, Record, SensitivityCategory};
pub use report::PrivacyReport;
pub use validation::{
    ValidationError, initialize_schema_validator, validate_and_parse_report,
    validate_report_output,
};
