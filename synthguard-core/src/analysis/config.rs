//! Comparison engine configuration.
//!
//! Sampling caps keep the pairwise record scans bounded: with the defaults
//! the similarity scan performs at most 100 x 100 distance computations per
//! report.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default cap, per side, for the nearest-neighbour similarity scan.
pub const DEFAULT_SIMILARITY_SAMPLE_LIMIT: usize = 100;
/// Default cap, per side, for the minimum record distance scan.
pub const DEFAULT_MIN_DISTANCE_SAMPLE_LIMIT: usize = 50;
/// Default number of leading columns given a distribution analysis.
pub const DEFAULT_DISTRIBUTION_COLUMN_LIMIT: usize = 5;
/// Default number of equal-width buckets for numeric columns.
pub const DEFAULT_HISTOGRAM_BINS: usize = 10;
/// Default additive smoothing constant for KL divergence.
pub const DEFAULT_SMOOTHING: f64 = 1e-10;
/// Default number of correlation pairs listed in `topDifferences`.
pub const DEFAULT_TOP_DIFFERENCES: usize = 5;

/// Tunables for one comparison run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Records sampled from each dataset for the similarity score
    pub similarity_sample_limit: usize,
    /// Records sampled from each dataset for the minimum record distance
    pub min_distance_sample_limit: usize,
    /// Leading columns that receive a distribution analysis
    pub distribution_column_limit: usize,
    /// Equal-width buckets used for numeric columns
    pub histogram_bins: usize,
    /// Additive smoothing constant keeping KL divergence finite
    pub smoothing: f64,
    /// Correlation pairs reported in `topDifferences`
    pub top_differences: usize,
}

/// Validation errors for report configuration.
#[derive(Debug, Error)]
pub enum ConfigValidationError {
    #[error("similarity_sample_limit must be at least 1")]
    InvalidSimilaritySample,
    #[error("min_distance_sample_limit must be at least 1")]
    InvalidMinDistanceSample,
    #[error("distribution_column_limit must be at least 1")]
    InvalidDistributionColumns,
    #[error("histogram_bins must be at least 1")]
    InvalidHistogramBins,
    #[error("smoothing must be a positive finite number, got {0}")]
    InvalidSmoothing(f64),
}

impl From<ConfigValidationError> for crate::SynthGuardError {
    fn from(error: ConfigValidationError) -> Self {
        crate::SynthGuardError::configuration(error.to_string())
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            similarity_sample_limit: DEFAULT_SIMILARITY_SAMPLE_LIMIT,
            min_distance_sample_limit: DEFAULT_MIN_DISTANCE_SAMPLE_LIMIT,
            distribution_column_limit: DEFAULT_DISTRIBUTION_COLUMN_LIMIT,
            histogram_bins: DEFAULT_HISTOGRAM_BINS,
            smoothing: DEFAULT_SMOOTHING,
            top_differences: DEFAULT_TOP_DIFFERENCES,
        }
    }
}

/// Raises a zero limit to 1, warning when it does.
fn at_least_one(name: &str, value: usize) -> usize {
    if value == 0 {
        tracing::warn!("{} of 0 raised to 1", name);
        1
    } else {
        value
    }
}

impl ReportConfig {
    /// Creates a new report config with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set the similarity sample cap.
    pub fn with_similarity_sample_limit(mut self, limit: usize) -> Self {
        self.similarity_sample_limit = at_least_one("similarity_sample_limit", limit);
        self
    }

    /// Builder method to set the minimum-distance sample cap.
    pub fn with_min_distance_sample_limit(mut self, limit: usize) -> Self {
        self.min_distance_sample_limit = at_least_one("min_distance_sample_limit", limit);
        self
    }

    /// Builder method to set how many leading columns get a distribution analysis.
    pub fn with_distribution_column_limit(mut self, limit: usize) -> Self {
        self.distribution_column_limit = at_least_one("distribution_column_limit", limit);
        self
    }

    /// Builder method to set the numeric histogram bucket count.
    pub fn with_histogram_bins(mut self, bins: usize) -> Self {
        self.histogram_bins = at_least_one("histogram_bins", bins);
        self
    }

    /// Builder method to set the KL smoothing constant.
    pub fn with_smoothing(mut self, smoothing: f64) -> Self {
        if smoothing.is_finite() && smoothing > 0.0 {
            self.smoothing = smoothing;
        } else {
            tracing::warn!(
                "smoothing {} rejected, keeping {}",
                smoothing,
                self.smoothing
            );
        }
        self
    }

    /// Builder method to set how many correlation pairs are listed.
    ///
    /// Zero is allowed and yields an empty `topDifferences` list.
    pub fn with_top_differences(mut self, count: usize) -> Self {
        self.top_differences = count;
        self
    }

    /// Validates the configuration.
    ///
    /// Only needed for configs built by hand or deserialized; the builder
    /// methods never produce an invalid value.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.similarity_sample_limit == 0 {
            return Err(ConfigValidationError::InvalidSimilaritySample);
        }
        if self.min_distance_sample_limit == 0 {
            return Err(ConfigValidationError::InvalidMinDistanceSample);
        }
        if self.distribution_column_limit == 0 {
            return Err(ConfigValidationError::InvalidDistributionColumns);
        }
        if self.histogram_bins == 0 {
            return Err(ConfigValidationError::InvalidHistogramBins);
        }
        if !(self.smoothing.is_finite() && self.smoothing > 0.0) {
            return Err(ConfigValidationError::InvalidSmoothing(self.smoothing));
        }
        Ok(())
    }
}
