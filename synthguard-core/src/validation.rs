//! JSON Schema validation for the privacy report format.
//!
//! Reports are checked against an embedded JSON Schema and then against the
//! cross-field invariants a schema cannot express, before they are written
//! anywhere.
//!
//! # Guarantees
//! - Every score lies in its documented range
//! - `anonymizationScore + recordSimilarityScore == 100`
//! - Labels are restricted to the published bands
//! - Format version compatibility is checked first
//!
//! # Example
//! ```rust
//! use synthguard_core::validation::{initialize_schema_validator, validate_report_output};
//! use synthguard_core::{Dataset, PrivacyAnalyzer};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! initialize_schema_validator()?;
//! let data = Dataset::from_records("empty", vec![]);
//! let report = PrivacyAnalyzer::with_defaults().generate_report(&data, &data)?;
//!
//! validate_report_output(&serde_json::to_value(&report)?)?;
//! # Ok(())
//! # }
//! ```

use std::f64::consts::LN_2;
use std::sync::OnceLock;

use jsonschema::Validator;
use serde_json::Value;
use thiserror::Error;

use crate::report::PrivacyReport;

/// Absolute tolerance for floating point invariants.
const TOLERANCE: f64 = 1e-6;

/// Report validation errors with field-level detail
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Schema compilation failed during initialization
    #[error("JSON Schema compilation failed: {message}")]
    SchemaCompilation { message: String },

    /// Validation failed with specific field errors
    #[error("Report validation failed with {error_count} errors: {errors:?}")]
    ValidationFailed {
        error_count: usize,
        errors: Vec<String>,
    },

    /// Unsupported format version detected
    #[error("Unsupported format version '{version}'. Supported versions: {supported:?}")]
    UnsupportedVersion {
        version: String,
        supported: Vec<String>,
    },

    /// A cross-field invariant does not hold
    #[error("Report invariant violated: {reason}")]
    InvariantViolation { reason: String },

    /// JSON parsing error
    #[error("JSON parsing failed: {source}")]
    JsonParsing {
        #[from]
        source: serde_json::Error,
    },
}

/// Supported format versions
const SUPPORTED_VERSIONS: &[&str] = &["1.0"];

/// Embedded JSON Schema for v1.0 reports
const SCHEMA_V1_0: &str = r##"{
  "$schema": "https://json-schema.org/draft/2020-12/schema",
  "title": "SynthGuard Privacy & Fidelity Report Format v1.0",
  "type": "object",
  "required": [
    "reportId", "generatedAt", "formatVersion", "originalDataset", "syntheticDataset",
    "privacyMetrics", "statisticalComparison", "distributions", "correlationAnalysis",
    "privacyGuarantees"
  ],
  "$defs": {
    "score": { "type": "number", "minimum": 0, "maximum": 100 },
    "unit": { "type": "number", "minimum": 0, "maximum": 1 },
    "dataType": { "enum": ["INTEGER", "DOUBLE", "STRING"] },
    "frequencies": {
      "type": "object",
      "additionalProperties": { "type": "number", "minimum": 0, "maximum": 1 }
    },
    "correlationMatrix": {
      "type": "object",
      "additionalProperties": {
        "type": "object",
        "additionalProperties": { "type": "number", "minimum": -1, "maximum": 1 }
      }
    },
    "datasetInfo": {
      "type": "object",
      "required": ["name", "rowCount", "columnCount", "sizeBytes", "columns"],
      "properties": {
        "name": { "type": "string" },
        "rowCount": { "type": "integer", "minimum": 0 },
        "columnCount": { "type": "integer", "minimum": 0 },
        "sizeBytes": { "type": "integer", "minimum": 0 },
        "columns": {
          "type": "array",
          "items": {
            "type": "object",
            "required": ["name", "dataType", "sensitive"],
            "properties": {
              "name": { "type": "string" },
              "dataType": { "$ref": "#/$defs/dataType" },
              "sensitive": { "type": "boolean" },
              "sensitivityReason": {
                "enum": ["PII", "FINANCIAL", "MEDICAL", "LOCATION", null]
              }
            }
          }
        }
      }
    }
  },
  "properties": {
    "reportId": { "type": "string", "minLength": 1 },
    "generatedAt": { "type": "string", "format": "date-time" },
    "formatVersion": { "type": "string", "pattern": "^1\\.0$" },
    "originalDataset": { "$ref": "#/$defs/datasetInfo" },
    "syntheticDataset": { "$ref": "#/$defs/datasetInfo" },
    "privacyMetrics": {
      "type": "object",
      "required": [
        "anonymizationScore", "recordSimilarityScore", "sensitiveFieldsDetected",
        "sensitiveFieldsProtected", "zeroLeakageGuarantee", "privacyLevel"
      ],
      "properties": {
        "anonymizationScore": { "$ref": "#/$defs/score" },
        "recordSimilarityScore": { "$ref": "#/$defs/score" },
        "sensitiveFieldsDetected": { "type": "integer", "minimum": 0 },
        "sensitiveFieldsProtected": { "type": "integer", "minimum": 0 },
        "zeroLeakageGuarantee": { "type": "boolean" },
        "privacyLevel": { "enum": ["HIGH", "MEDIUM", "LOW"] }
      }
    },
    "statisticalComparison": {
      "type": "object",
      "required": [
        "distributionSimilarity", "correlationPreservation", "meanAbsoluteError",
        "standardDeviationError", "qualityScore"
      ],
      "properties": {
        "distributionSimilarity": { "$ref": "#/$defs/score" },
        "correlationPreservation": { "$ref": "#/$defs/score" },
        "meanAbsoluteError": { "type": "number", "minimum": 0 },
        "standardDeviationError": { "type": "number", "minimum": 0 },
        "qualityScore": { "enum": ["EXCELLENT", "GOOD", "FAIR", "POOR"] },
        "columnErrors": {
          "type": "array",
          "items": {
            "type": "object",
            "required": ["columnName", "meanError", "stdDevError"],
            "properties": {
              "columnName": { "type": "string" },
              "meanError": { "type": "number", "minimum": 0 },
              "stdDevError": { "type": "number", "minimum": 0 }
            }
          }
        }
      }
    },
    "distributions": {
      "type": "array",
      "items": {
        "type": "object",
        "required": [
          "columnName", "dataType", "originalDistribution", "syntheticDistribution",
          "klDivergence", "jsDivergence"
        ],
        "properties": {
          "columnName": { "type": "string" },
          "dataType": { "$ref": "#/$defs/dataType" },
          "originalDistribution": { "$ref": "#/$defs/frequencies" },
          "syntheticDistribution": { "$ref": "#/$defs/frequencies" },
          "klDivergence": { "type": "number", "minimum": 0 },
          "jsDivergence": { "type": "number", "minimum": 0 }
        }
      }
    },
    "correlationAnalysis": {
      "type": "object",
      "required": [
        "originalCorrelations", "syntheticCorrelations", "overallCorrelationError",
        "topDifferences"
      ],
      "properties": {
        "originalCorrelations": { "$ref": "#/$defs/correlationMatrix" },
        "syntheticCorrelations": { "$ref": "#/$defs/correlationMatrix" },
        "overallCorrelationError": { "type": "number", "minimum": 0, "maximum": 2 },
        "topDifferences": {
          "type": "array",
          "items": {
            "type": "object",
            "required": [
              "column1", "column2", "originalCorrelation", "syntheticCorrelation", "difference"
            ],
            "properties": {
              "column1": { "type": "string" },
              "column2": { "type": "string" },
              "originalCorrelation": { "type": "number", "minimum": -1, "maximum": 1 },
              "syntheticCorrelation": { "type": "number", "minimum": -1, "maximum": 1 },
              "difference": { "type": "number", "minimum": 0, "maximum": 2 }
            }
          }
        }
      }
    },
    "privacyGuarantees": {
      "type": "object",
      "required": [
        "noPiiLeakage", "noFinancialDataLeakage", "noMedicalDataLeakage",
        "noLocationDataLeakage", "noOriginalRecordsCopied", "minimumRecordDistance",
        "complianceLevel", "privacyTechniquesApplied"
      ],
      "properties": {
        "noPiiLeakage": { "type": "boolean" },
        "noFinancialDataLeakage": { "type": "boolean" },
        "noMedicalDataLeakage": { "type": "boolean" },
        "noLocationDataLeakage": { "type": "boolean" },
        "noOriginalRecordsCopied": { "type": "boolean" },
        "minimumRecordDistance": { "$ref": "#/$defs/unit" },
        "complianceLevel": { "type": "string" },
        "privacyTechniquesApplied": { "type": "array", "items": { "type": "string" } }
      }
    }
  }
}"##;

/// Compiled JSON Schema instance (initialized once)
static COMPILED_SCHEMA: OnceLock<Validator> = OnceLock::new();

/// Compiles the embedded report schema and caches it for reuse.
///
/// Safe to call more than once; later calls are no-ops.
///
/// # Errors
/// Returns `ValidationError::SchemaCompilation` if the embedded schema is invalid.
pub fn initialize_schema_validator() -> Result<(), ValidationError> {
    if COMPILED_SCHEMA.get().is_some() {
        return Ok(());
    }

    let schema_json = get_schema_definition()?;
    let compiled =
        jsonschema::validator_for(&schema_json).map_err(|e| ValidationError::SchemaCompilation {
            message: format!("Schema compilation error: {}", e),
        })?;

    // Another thread may have won the race; either instance is identical
    let _ = COMPILED_SCHEMA.set(compiled);
    Ok(())
}

/// Validates a serialized report.
///
/// Checks, in order: format version, JSON Schema, then cross-field
/// invariants.
///
/// # Errors
/// Returns the first failing check as a `ValidationError`.
pub fn validate_report_output(json_value: &Value) -> Result<(), ValidationError> {
    let schema = COMPILED_SCHEMA
        .get()
        .ok_or_else(|| ValidationError::SchemaCompilation {
            message: "Schema validator not initialized. Call initialize_schema_validator() first."
                .to_string(),
        })?;

    validate_format_version(json_value)?;

    if let Err(validation_error) = schema.validate(json_value) {
        return Err(ValidationError::ValidationFailed {
            error_count: 1,
            errors: vec![format!("Schema validation failed: {}", validation_error)],
        });
    }

    validate_invariants(json_value)
}

/// Ensures `formatVersion` is present and supported.
fn validate_format_version(json_value: &Value) -> Result<(), ValidationError> {
    let version = json_value
        .get("formatVersion")
        .and_then(Value::as_str)
        .ok_or_else(|| ValidationError::ValidationFailed {
            error_count: 1,
            errors: vec!["Missing required field 'formatVersion'".to_string()],
        })?;

    if !SUPPORTED_VERSIONS.contains(&version) {
        return Err(ValidationError::UnsupportedVersion {
            version: version.to_string(),
            supported: SUPPORTED_VERSIONS.iter().map(|s| s.to_string()).collect(),
        });
    }

    Ok(())
}

fn number_at(json_value: &Value, pointer: &str) -> Result<f64, ValidationError> {
    json_value
        .pointer(pointer)
        .and_then(Value::as_f64)
        .ok_or_else(|| ValidationError::InvariantViolation {
            reason: format!("'{}' is not a number", pointer),
        })
}

/// Checks relations between fields that the schema cannot express.
fn validate_invariants(json_value: &Value) -> Result<(), ValidationError> {
    let anonymization = number_at(json_value, "/privacyMetrics/anonymizationScore")?;
    let similarity = number_at(json_value, "/privacyMetrics/recordSimilarityScore")?;
    if (anonymization + similarity - 100.0).abs() > TOLERANCE {
        return Err(ValidationError::InvariantViolation {
            reason: format!(
                "anonymizationScore ({}) + recordSimilarityScore ({}) must equal 100",
                anonymization, similarity
            ),
        });
    }

    let detected = number_at(json_value, "/privacyMetrics/sensitiveFieldsDetected")?;
    let protected = number_at(json_value, "/privacyMetrics/sensitiveFieldsProtected")?;
    if protected > detected {
        return Err(ValidationError::InvariantViolation {
            reason: "sensitiveFieldsProtected exceeds sensitiveFieldsDetected".to_string(),
        });
    }

    let distributions = json_value
        .get("distributions")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();
    for (index, analysis) in distributions.iter().enumerate() {
        let js = number_at(analysis, "/jsDivergence")?;
        if js > LN_2 + TOLERANCE {
            return Err(ValidationError::InvariantViolation {
                reason: format!(
                    "distributions[{}].jsDivergence ({}) exceeds ln 2",
                    index, js
                ),
            });
        }
    }

    let differences = json_value
        .pointer("/correlationAnalysis/topDifferences")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();
    let ordered = differences
        .windows(2)
        .all(|pair| pair[0]["difference"].as_f64() >= pair[1]["difference"].as_f64());
    if !ordered {
        return Err(ValidationError::InvariantViolation {
            reason: "correlationAnalysis.topDifferences is not sorted by difference".to_string(),
        });
    }

    Ok(())
}

/// Parses, validates and deserializes a report.
///
/// # Errors
/// Returns validation errors for malformed JSON, schema violations or
/// broken invariants.
pub fn validate_and_parse_report(json_str: &str) -> Result<PrivacyReport, ValidationError> {
    let json_value: Value = serde_json::from_str(json_str)?;
    validate_report_output(&json_value)?;

    let report: PrivacyReport = serde_json::from_value(json_value)?;
    Ok(report)
}

/// Returns the embedded JSON Schema as a parsed value.
pub fn get_schema_definition() -> Result<Value, ValidationError> {
    serde_json::from_str(SCHEMA_V1_0).map_err(|e| ValidationError::SchemaCompilation {
        message: format!("Failed to parse embedded schema: {}", e),
    })
}

impl From<ValidationError> for crate::SynthGuardError {
    fn from(error: ValidationError) -> Self {
        crate::SynthGuardError::configuration(format!("Report validation failed: {}", error))
    }
}

#[cfg(test)]
mod tests;
