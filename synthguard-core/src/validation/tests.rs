//! Tests for report validation.
//!
//! These tests check that the embedded schema accepts real reports and that
//! malformed reports, unsupported versions and broken invariants are
//! rejected.

use super::*;
use crate::analysis::PrivacyAnalyzer;
use crate::models::{Dataset, Record};
use serde_json::json;

/// Ensures the validator is initialized for every test
fn setup() {
    let _ = initialize_schema_validator();
}

fn records(rows: &[(&str, &str, &str)]) -> Vec<Record> {
    rows.iter()
        .map(|(id, name, salary)| {
            [("id", *id), ("name", *name), ("salary", *salary)]
                .into_iter()
                .collect()
        })
        .collect()
}

fn real_report() -> Value {
    let original = Dataset::from_records(
        "original",
        records(&[("1", "A", "100"), ("2", "B", "200"), ("3", "C", "300")]),
    );
    let synthetic = Dataset::from_records(
        "synthetic",
        records(&[("9", "X", "150"), ("8", "Y", "260")]),
    );
    let report = PrivacyAnalyzer::with_defaults()
        .generate_report(&original, &synthetic)
        .unwrap();
    serde_json::to_value(&report).unwrap()
}

fn minimal_report() -> Value {
    json!({
        "reportId": "6f9619ff-8b86-d011-b42d-00cf4fc964ff",
        "generatedAt": "2024-01-15T10:30:00Z",
        "formatVersion": "1.0",
        "originalDataset": {
            "name": "original.csv", "rowCount": 0, "columnCount": 0, "sizeBytes": 0, "columns": []
        },
        "syntheticDataset": {
            "name": "synthetic.csv", "rowCount": 0, "columnCount": 0, "sizeBytes": 0, "columns": []
        },
        "privacyMetrics": {
            "anonymizationScore": 100.0,
            "recordSimilarityScore": 0.0,
            "sensitiveFieldsDetected": 0,
            "sensitiveFieldsProtected": 0,
            "zeroLeakageGuarantee": true,
            "privacyLevel": "HIGH"
        },
        "statisticalComparison": {
            "distributionSimilarity": 0.0,
            "correlationPreservation": 0.0,
            "meanAbsoluteError": 0.0,
            "standardDeviationError": 0.0,
            "qualityScore": "POOR",
            "columnErrors": []
        },
        "distributions": [],
        "correlationAnalysis": {
            "originalCorrelations": {},
            "syntheticCorrelations": {},
            "overallCorrelationError": 0.0,
            "topDifferences": []
        },
        "privacyGuarantees": {
            "noPiiLeakage": true,
            "noFinancialDataLeakage": true,
            "noMedicalDataLeakage": true,
            "noLocationDataLeakage": true,
            "noOriginalRecordsCopied": true,
            "minimumRecordDistance": 1.0,
            "complianceLevel": "GDPR, HIPAA, CCPA",
            "privacyTechniquesApplied": []
        }
    })
}

#[test]
fn test_schema_initialization_success() {
    assert!(initialize_schema_validator().is_ok());
    assert!(initialize_schema_validator().is_ok());
}

#[test]
fn test_valid_minimal_report_passes() {
    setup();
    assert!(validate_report_output(&minimal_report()).is_ok());
}

#[test]
fn test_generated_report_passes() {
    setup();
    let report = real_report();
    assert!(validate_report_output(&report).is_ok());
    assert_eq!(report["originalDataset"]["columns"][1]["sensitivityReason"], "PII");
}

#[test]
fn test_missing_required_block_fails() {
    setup();
    let mut report = minimal_report();
    report.as_object_mut().unwrap().remove("privacyGuarantees");

    let result = validate_report_output(&report);
    assert!(matches!(result, Err(ValidationError::ValidationFailed { .. })));
}

#[test]
fn test_score_out_of_range_fails() {
    setup();
    let mut report = minimal_report();
    report["statisticalComparison"]["distributionSimilarity"] = json!(130.0);

    assert!(validate_report_output(&report).is_err());
}

#[test]
fn test_unknown_label_fails() {
    setup();
    let mut report = minimal_report();
    report["privacyMetrics"]["privacyLevel"] = json!("EXTREME");

    assert!(matches!(
        validate_report_output(&report),
        Err(ValidationError::ValidationFailed { .. })
    ));
}

#[test]
fn test_unsupported_version_fails() {
    setup();
    let mut report = minimal_report();
    report["formatVersion"] = json!("2.0");

    let result = validate_report_output(&report);
    assert!(matches!(
        result,
        Err(ValidationError::UnsupportedVersion { ref version, .. }) if version == "2.0"
    ));
}

#[test]
fn test_missing_format_version_fails() {
    setup();
    let mut report = minimal_report();
    report.as_object_mut().unwrap().remove("formatVersion");

    let result = validate_report_output(&report);
    assert!(matches!(result, Err(ValidationError::ValidationFailed { .. })));
}

#[test]
fn test_scores_not_summing_to_hundred_fail() {
    setup();
    let mut report = minimal_report();
    report["privacyMetrics"]["recordSimilarityScore"] = json!(12.5);

    let result = validate_report_output(&report);
    assert!(matches!(result, Err(ValidationError::InvariantViolation { .. })));
}

#[test]
fn test_js_divergence_above_ln2_fails() {
    setup();
    let mut report = minimal_report();
    report["distributions"] = json!([{
        "columnName": "age",
        "dataType": "INTEGER",
        "originalDistribution": {"1.00-2.00": 1.0},
        "syntheticDistribution": {"1.00-2.00": 1.0},
        "klDivergence": 0.0,
        "jsDivergence": 0.9
    }]);

    let result = validate_report_output(&report);
    assert!(matches!(result, Err(ValidationError::InvariantViolation { .. })));
}

#[test]
fn test_unsorted_top_differences_fail() {
    setup();
    let mut report = minimal_report();
    report["correlationAnalysis"]["topDifferences"] = json!([
        {"column1": "a", "column2": "b", "originalCorrelation": 0.1,
         "syntheticCorrelation": 0.1, "difference": 0.0},
        {"column1": "a", "column2": "c", "originalCorrelation": 0.9,
         "syntheticCorrelation": 0.1, "difference": 0.8}
    ]);

    let result = validate_report_output(&report);
    assert!(matches!(result, Err(ValidationError::InvariantViolation { .. })));
}

#[test]
fn test_validate_and_parse_report_success() {
    setup();
    let json_str = serde_json::to_string(&real_report()).unwrap();

    let report = validate_and_parse_report(&json_str).unwrap();
    assert_eq!(report.original_dataset().row_count, 3);
    assert_eq!(report.synthetic_dataset().row_count, 2);
}

#[test]
fn test_validate_and_parse_invalid_json_fails() {
    setup();
    let result = validate_and_parse_report("{ not json");
    assert!(matches!(result, Err(ValidationError::JsonParsing { .. })));
}

#[test]
fn test_get_schema_definition_success() {
    let schema = get_schema_definition().unwrap();
    assert_eq!(
        schema["$schema"],
        "https://json-schema.org/draft/2020-12/schema"
    );
    assert!(schema["required"].as_array().unwrap().len() >= 10);
}

#[test]
fn test_validation_error_converts_to_configuration() {
    let error: crate::SynthGuardError = ValidationError::InvariantViolation {
        reason: "broken".to_string(),
    }
    .into();
    assert!(error.to_string().contains("broken"));
}
