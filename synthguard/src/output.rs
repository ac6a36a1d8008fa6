//! File and terminal output for reports, export bundles and column profiles.

use std::fmt::Write as _;
use std::path::Path;

use synthguard_core::{Dataset, PrivacyReport, Result, SynthGuardError, validate_report_output};

/// Serializes a report and validates it against the embedded schema.
///
/// Returns the pretty-printed JSON only when validation passes, so nothing
/// invalid ever reaches disk or stdout.
pub fn validated_report_json(report: &PrivacyReport) -> Result<String> {
    let json_data = report.to_json_pretty()?;

    let json_value: serde_json::Value = serde_json::from_str(&json_data)
        .map_err(|e| SynthGuardError::serialization("JSON parsing for validation", e))?;
    validate_report_output(&json_value)?;

    tracing::info!("Output validation passed");
    Ok(json_data)
}

/// Saves JSON data to file.
pub async fn save_json(json_data: &str, output_path: &Path) -> Result<()> {
    tokio::fs::write(output_path, json_data)
        .await
        .map_err(|e| SynthGuardError::Io {
            context: format!("Failed to write to {}", output_path.display()),
            source: e,
        })?;
    Ok(())
}

/// Prints the headline numbers of a report.
pub fn print_summary(report: &PrivacyReport) {
    let metrics = report.privacy_metrics();
    let comparison = report.statistical_comparison();

    println!(
        "Privacy level: {} (anonymization {:.1}%, similarity {:.1}%)",
        metrics.privacy_level, metrics.anonymization_score, metrics.record_similarity_score
    );
    println!(
        "Quality: {} (distribution {:.1}%, correlation {:.1}%)",
        comparison.quality_score,
        comparison.distribution_similarity,
        comparison.correlation_preservation
    );
    println!(
        "Sensitive fields: {} detected, {} protected",
        metrics.sensitive_fields_detected, metrics.sensitive_fields_protected
    );
    if !metrics.zero_leakage_guarantee {
        println!("WARNING: synthetic data contains verbatim original records");
    }
}

/// Renders one line per column: name, inferred type and sensitivity.
pub fn format_profiles(dataset: &Dataset) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} ({} rows, {} columns)",
        dataset.name(),
        dataset.row_count(),
        dataset.column_count()
    );
    for profile in dataset.column_profiles() {
        let sensitivity = profile
            .sensitivity_reason
            .map_or_else(|| "-".to_string(), |c| c.to_string());
        let _ = writeln!(
            out,
            "  {:<24} {:<8} {}",
            profile.name,
            profile.data_type.to_string(),
            sensitivity
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use synthguard_core::{PrivacyAnalyzer, Record, initialize_schema_validator};
    use tempfile::TempDir;

    fn dataset(name: &str, rows: &[(&str, &str)]) -> Dataset {
        let records = rows
            .iter()
            .map(|(email, salary)| {
                let mut record = Record::new();
                record.insert("email", *email);
                record.insert("salary", *salary);
                record
            })
            .collect();
        Dataset::from_records(name, records)
    }

    fn sample_report() -> PrivacyReport {
        let original = dataset("original", &[("a@x.io", "100"), ("b@x.io", "200")]);
        let synthetic = dataset("synthetic", &[("q@y.io", "150"), ("r@y.io", "250")]);
        PrivacyAnalyzer::with_defaults()
            .generate_report(&original, &synthetic)
            .unwrap()
    }

    #[test]
    fn test_validated_report_json() {
        initialize_schema_validator().unwrap();
        let json = validated_report_json(&sample_report()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["formatVersion"], "1.0");
    }

    #[tokio::test]
    async fn test_save_json_writes_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("report.json");

        save_json("{\"ok\":true}", &path).await.unwrap();

        let written = tokio::fs::read_to_string(&path).await.unwrap();
        assert_eq!(written, "{\"ok\":true}");
    }

    #[tokio::test]
    async fn test_save_json_missing_directory() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("report.json");

        let err = save_json("{}", &path).await.unwrap_err();
        assert!(matches!(err, SynthGuardError::Io { .. }));
        assert!(err.to_string().contains("report.json"));
    }

    #[test]
    fn test_format_profiles() {
        let text = format_profiles(&dataset("people", &[("a@x.io", "100")]));
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "people (1 rows, 2 columns)");
        assert!(lines[1].contains("email") && lines[1].contains("PII"));
        assert!(lines[2].contains("salary") && lines[2].contains("FINANCIAL"));
    }
}
