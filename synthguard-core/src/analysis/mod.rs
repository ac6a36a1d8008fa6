//! Privacy and fidelity comparison of an original and a synthetic dataset.
//!
//! This module provides:
//! - **Leakage**: exact record copies and sampled nearest-neighbour similarity
//! - **Distributions**: per-column KL and JS divergence
//! - **Correlations**: Pearson structure of numeric column pairs
//! - **Scoring**: threshold bands and pass/fail guarantees
//!
//! # Security Guarantees
//! - Results carry scores, counts and frequencies, never whole records
//! - STRING column distributions are keyed by raw cell values
//! - Offline-only operation with no network dependencies
//!
//! # Example
//! ```rust,ignore
//! use synthguard_core::analysis::{PrivacyAnalyzer, ReportConfig};
//!
//! let analyzer = PrivacyAnalyzer::new(ReportConfig::default());
//! let report = analyzer.generate_report(&original, &synthetic)?;
//! println!("Privacy level: {}", report.privacy_metrics().privacy_level);
//! ```

mod analyzer;
mod config;
pub mod correlation;
pub mod distribution;
pub mod fidelity;
pub mod leakage;
mod models;
mod numeric;
pub mod scoring;

// Re-export public API
pub use analyzer::PrivacyAnalyzer;
pub use config::{ConfigValidationError, ReportConfig};
pub use leakage::LeakageAnalysis;
pub use models::{
    ColumnError, CorrelationAnalysis, CorrelationPair, DistributionAnalysis, PrivacyGuarantees,
    PrivacyLevel, PrivacyMetrics, QualityScore, StatisticalComparison,
};
