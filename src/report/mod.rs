//! @ai:module:intent Report generation for benchmark comparisons
//! @ai:module:layer infrastructure
//! @ai:module:public_api ReportGenerator, GeneratedReports, TextReporter, CsvReporter, JsonReporter

pub mod csv_report;
pub mod json_report;
pub mod text_report;

pub use csv_report::{CsvReporter, CsvReporterTrait, CSV_COLUMNS};
pub use json_report::{JsonReporter, JsonReporterTrait};
pub use text_report::{TextReporter, TextReporterTrait};

use crate::config::AnalyzerConfig;
use crate::error::Result;
use crate::metrics::{Comparison, ResultSet};
use std::path::{Path, PathBuf};

/// @ai:intent Paths of the files written by one run
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedReports {
    pub report: PathBuf,
    pub csv: PathBuf,
    /// `None` when only the report and CSV were regenerated
    pub json: Option<PathBuf>,
}

/// @ai:intent Combined report generator
pub struct ReportGenerator {
    text: TextReporter,
    csv: CsvReporter,
    json: JsonReporter,
    report_prefix: String,
    csv_file: String,
    json_file: String,
}

impl ReportGenerator {
    /// @ai:intent Create a report generator from configuration
    /// @ai:effects pure
    pub fn new(config: &AnalyzerConfig) -> Self {
        Self {
            text: TextReporter::new(config.report.clone()),
            csv: CsvReporter::new(),
            json: JsonReporter::new(),
            report_prefix: config.paths.report_prefix.clone(),
            csv_file: config.paths.csv_file.clone(),
            json_file: config.paths.json_file.clone(),
        }
    }

    pub fn text(&self) -> &TextReporter {
        &self.text
    }

    /// @ai:intent Write the text report, CSV and JSON exports
    /// @ai:pre comparison was computed from results
    /// @ai:effects fs:write
    pub fn generate_all(
        &self,
        results: &ResultSet,
        comparison: &Comparison,
        output_dir: &Path,
    ) -> Result<GeneratedReports> {
        let mut generated = self.generate_summaries(results, comparison, output_dir)?;

        let json = output_dir.join(&self.json_file);
        self.json.generate(results, &json)?;
        tracing::info!("Results exported to: {}", json.display());

        generated.json = Some(json);
        Ok(generated)
    }

    /// @ai:intent Write only the text report and CSV export
    /// @ai:pre comparison was computed from results
    /// @ai:effects fs:write
    pub fn generate_summaries(
        &self,
        results: &ResultSet,
        comparison: &Comparison,
        output_dir: &Path,
    ) -> Result<GeneratedReports> {
        std::fs::create_dir_all(output_dir)?;

        let generated = GeneratedReports {
            report: output_dir.join(TextReporter::file_name(&self.report_prefix, comparison)),
            csv: output_dir.join(&self.csv_file),
            json: None,
        };

        self.text.generate(comparison, &generated.report)?;
        tracing::info!("Report saved to: {}", generated.report.display());

        self.csv.generate(results, &generated.csv)?;
        tracing::info!("Results exported to: {}", generated.csv.display());

        Ok(generated)
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new(&AnalyzerConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::{ComparisonAggregator, ComparisonAggregatorTrait, MetricRecord};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn single_result() -> (ResultSet, Comparison) {
        let results: ResultSet = [(
            "java_virtual",
            MetricRecord {
                requests_per_second: 10.0,
                ..Default::default()
            },
        )]
        .into_iter()
        .collect();
        let generated_at = NaiveDate::from_ymd_opt(2026, 1, 2)
            .unwrap()
            .and_hms_opt(3, 4, 5)
            .unwrap();
        let comparison = ComparisonAggregator::default()
            .compare(&results, generated_at)
            .unwrap();
        (results, comparison)
    }

    #[test]
    fn test_generate_all_writes_three_files() {
        let temp = TempDir::new().unwrap();
        let (results, comparison) = single_result();

        let generated = ReportGenerator::default()
            .generate_all(&results, &comparison, temp.path())
            .unwrap();

        assert_eq!(
            generated.report,
            temp.path().join("comparison_report_20260102_030405.txt")
        );
        assert!(generated.report.exists());
        assert!(temp.path().join("performance_comparison.csv").exists());
        assert_eq!(
            generated.json,
            Some(temp.path().join("performance_results.json"))
        );
        assert!(temp.path().join("performance_results.json").exists());
    }

    #[test]
    fn test_generate_summaries_leaves_json_alone() {
        let temp = TempDir::new().unwrap();
        let (results, comparison) = single_result();

        let generated = ReportGenerator::default()
            .generate_summaries(&results, &comparison, temp.path())
            .unwrap();

        assert!(generated.report.exists());
        assert!(generated.csv.exists());
        assert_eq!(generated.json, None);
        assert!(!temp.path().join("performance_results.json").exists());
    }
}
