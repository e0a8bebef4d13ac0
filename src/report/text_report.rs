//! @ai:module:intent Human-readable comparison report
//! @ai:module:layer infrastructure
//! @ai:module:public_api TextReporter, TextReporterTrait
//! @ai:module:stateless true

use crate::config::ReportConfig;
use crate::error::{Error, Result};
use crate::metrics::{Comparison, GroupSummary, Insight, NamedResult};
use std::io::{BufWriter, Write};
use std::path::Path;

const WIDE_RULE: usize = 80;
const NARROW_RULE: usize = 50;

/// @ai:intent Trait for text report generation
pub trait TextReporterTrait: Send + Sync {
    /// @ai:intent Render the report as a string
    fn render(&self, comparison: &Comparison) -> String;

    /// @ai:intent Render the report and write it to a file
    fn generate(&self, comparison: &Comparison, output_path: &Path) -> Result<()>;
}

/// @ai:intent Renders a comparison as a fixed-width plaintext report
pub struct TextReporter {
    config: ReportConfig,
}

impl TextReporter {
    /// @ai:intent Create a text reporter with the given headings
    /// @ai:effects pure
    pub fn new(config: ReportConfig) -> Self {
        Self { config }
    }

    /// @ai:intent File name for a report generated at the comparison time
    /// @ai:effects pure
    pub fn file_name(prefix: &str, comparison: &Comparison) -> String {
        format!(
            "{}_{}.txt",
            prefix,
            comparison.generated_at.format("%Y%m%d_%H%M%S")
        )
    }

    fn header(&self, comparison: &Comparison) -> Vec<String> {
        vec![
            "=".repeat(WIDE_RULE),
            self.config.title.clone(),
            "=".repeat(WIDE_RULE),
            format!(
                "Generated: {}",
                comparison.generated_at.format("%Y-%m-%d %H:%M:%S")
            ),
            String::new(),
        ]
    }

    fn summary_table(ranked: &[NamedResult]) -> Vec<String> {
        let mut lines = vec![
            "PERFORMANCE SUMMARY (sorted by Requests/sec)".to_string(),
            "-".repeat(WIDE_RULE),
            format!(
                "{:<25} {:<10} {:<10} {:<10} {:<8}",
                "Test Name", "RPS", "Mean(ms)", "95th%", "Failed"
            ),
            "-".repeat(WIDE_RULE),
        ];

        for entry in ranked {
            let m = &entry.metrics;
            let p95 = m
                .percentile("p95")
                .map(|v| format!("{:.1}", v))
                .unwrap_or_else(|| "N/A".to_string());

            lines.push(format!(
                "{:<25} {:<10.1} {:<10.1} {:<10} {:<8}",
                entry.name, m.requests_per_second, m.time_per_request_mean, p95, m.failed_requests
            ));
        }

        lines.push(String::new());
        lines
    }

    fn detailed_analysis(comparison: &Comparison) -> Vec<String> {
        vec![
            "DETAILED ANALYSIS".to_string(),
            "-".repeat(NARROW_RULE),
            format!(
                "Best throughput: {} ({:.1} RPS)",
                comparison.best.name, comparison.best.metrics.requests_per_second
            ),
            format!(
                "Worst throughput: {} ({:.1} RPS)",
                comparison.worst.name, comparison.worst.metrics.requests_per_second
            ),
            format!("Performance improvement: {}", comparison.improvement),
            String::new(),
        ]
    }

    /// Every group after the first is preceded by a blank line, even when
    /// the groups before it were empty and printed nothing.
    fn group_sections(groups: &[GroupSummary]) -> Vec<String> {
        let mut lines = Vec::new();

        for (i, group) in groups.iter().enumerate() {
            if group.members.is_empty() {
                continue;
            }
            if i > 0 {
                lines.push(String::new());
            }
            lines.push(format!("{}:", group.label));
            for member in &group.members {
                lines.push(format!(
                    "  {}: {:.1} RPS",
                    member.name, member.metrics.requests_per_second
                ));
            }
        }

        lines
    }

    fn insight_section(&self, insights: &[Insight]) -> Vec<String> {
        let mut lines = vec![String::new(), format!("{}:", self.config.insights_title)];
        lines.extend(
            insights
                .iter()
                .map(|i| format!("  {}: {} improvement", i.label, i.change.signed())),
        );
        lines
    }
}

impl Default for TextReporter {
    fn default() -> Self {
        Self::new(ReportConfig::default())
    }
}

impl TextReporterTrait for TextReporter {
    /// @ai:effects pure
    fn render(&self, comparison: &Comparison) -> String {
        let mut lines = self.header(comparison);
        lines.extend(Self::summary_table(&comparison.ranked));
        lines.extend(Self::detailed_analysis(comparison));
        lines.extend(Self::group_sections(&comparison.groups));
        lines.extend(self.insight_section(&comparison.insights));
        lines.join("\n")
    }

    /// @ai:effects fs:write
    fn generate(&self, comparison: &Comparison, output_path: &Path) -> Result<()> {
        let write_err = |source| Error::FileWrite {
            path: output_path.to_path_buf(),
            source,
        };

        let file = std::fs::File::create(output_path).map_err(write_err)?;
        let mut writer = BufWriter::new(file);
        writer
            .write_all(self.render(comparison).as_bytes())
            .map_err(write_err)?;
        writer.flush().map_err(write_err)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::{
        ComparisonAggregator, ComparisonAggregatorTrait, MetricRecord, Percentiles, ResultSet,
    };
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn record(rps: f64, mean: f64, p95: Option<f64>, failed: u64) -> MetricRecord {
        MetricRecord {
            requests_per_second: rps,
            time_per_request_mean: mean,
            failed_requests: failed,
            percentiles: p95.map(|v| {
                let mut p = Percentiles::new();
                p.insert("p95".to_string(), v);
                p
            }),
            ..Default::default()
        }
    }

    fn comparison(results: &ResultSet) -> Comparison {
        let generated_at = NaiveDate::from_ymd_opt(2026, 10, 17)
            .unwrap()
            .and_hms_opt(9, 5, 3)
            .unwrap();
        ComparisonAggregator::default()
            .compare(results, generated_at)
            .unwrap()
    }

    #[test]
    fn test_file_name_uses_timestamp() {
        let results: ResultSet = [("a", record(1.0, 1.0, None, 0))].into_iter().collect();
        assert_eq!(
            TextReporter::file_name("comparison_report", &comparison(&results)),
            "comparison_report_20261017_090503.txt"
        );
    }

    #[test]
    fn test_render_full_report() {
        let results: ResultSet = [
            ("java_platform", record(100.0, 50.0, Some(80.0), 0)),
            ("java_virtual", record(150.0, 33.3, Some(60.0), 1)),
            ("kotlin_coroutine", record(120.0, 41.7, None, 0)),
        ]
        .into_iter()
        .collect();

        let report = TextReporter::default().render(&comparison(&results));

        let expected = [
            "================================================================================",
            "THREAD PERFORMANCE COMPARISON REPORT",
            "================================================================================",
            "Generated: 2026-10-17 09:05:03",
            "",
            "PERFORMANCE SUMMARY (sorted by Requests/sec)",
            "--------------------------------------------------------------------------------",
            "Test Name                 RPS        Mean(ms)   95th%      Failed  ",
            "--------------------------------------------------------------------------------",
            "java_virtual              150.0      33.3       60.0       1       ",
            "kotlin_coroutine          120.0      41.7       N/A        0       ",
            "java_platform             100.0      50.0       80.0       0       ",
            "",
            "DETAILED ANALYSIS",
            "--------------------------------------------------",
            "Best throughput: java_virtual (150.0 RPS)",
            "Worst throughput: java_platform (100.0 RPS)",
            "Performance improvement: 50.0%",
            "",
            "JAVA IMPLEMENTATIONS:",
            "  java_platform: 100.0 RPS",
            "  java_virtual: 150.0 RPS",
            "",
            "KOTLIN IMPLEMENTATIONS:",
            "  kotlin_coroutine: 120.0 RPS",
            "",
            "THREADING MODEL INSIGHTS:",
            "  Virtual threads vs Platform threads: +50.0% improvement",
            "  Kotlin coroutines vs Platform threads: +20.0% improvement",
        ]
        .join("\n");

        assert_eq!(report, expected);
    }

    #[test]
    fn test_render_not_applicable_improvement() {
        let results: ResultSet = [
            ("fast", record(10.0, 1.0, None, 0)),
            ("dead", record(0.0, 0.0, None, 100)),
        ]
        .into_iter()
        .collect();

        let report = TextReporter::default().render(&comparison(&results));
        assert!(report.contains("Performance improvement: N/A"));
        assert!(report.ends_with("THREADING MODEL INSIGHTS:"));
    }

    #[test]
    fn test_kotlin_section_after_empty_java_group() {
        let results: ResultSet = [
            ("kotlin_coroutine", record(120.0, 41.7, None, 0)),
            ("kotlin_platform", record(100.0, 50.0, None, 0)),
        ]
        .into_iter()
        .collect();

        let report = TextReporter::default().render(&comparison(&results));

        assert!(!report.contains("JAVA IMPLEMENTATIONS:"));
        assert!(report.contains(
            "Performance improvement: 20.0%\n\n\nKOTLIN IMPLEMENTATIONS:\n  kotlin_coroutine"
        ));
    }

    #[test]
    fn test_only_java_group_has_no_leading_gap() {
        let results: ResultSet = [("java_virtual", record(150.0, 33.3, None, 0))]
            .into_iter()
            .collect();

        let report = TextReporter::default().render(&comparison(&results));

        assert!(report.contains("Performance improvement: 0.0%\n\nJAVA IMPLEMENTATIONS:"));
        assert!(report.contains("java_virtual: 150.0 RPS\n\nTHREADING MODEL INSIGHTS:"));
        assert!(!report.contains("KOTLIN IMPLEMENTATIONS:"));
    }

    #[test]
    fn test_custom_headings() {
        let reporter = TextReporter::new(ReportConfig {
            title: "NIGHTLY RUN".to_string(),
            insights_title: "NOTES".to_string(),
        });
        let results: ResultSet = [("a", record(1.0, 1.0, None, 0))].into_iter().collect();

        let report = reporter.render(&comparison(&results));
        assert!(report.contains("\nNIGHTLY RUN\n"));
        assert!(report.contains("\nNOTES:"));
    }

    #[test]
    fn test_generate_writes_file() {
        let temp = TempDir::new().unwrap();
        let output = temp.path().join("report.txt");
        let results: ResultSet = [("a", record(1.0, 1.0, None, 0))].into_iter().collect();
        let c = comparison(&results);

        let reporter = TextReporter::default();
        reporter.generate(&c, &output).unwrap();

        let content = std::fs::read_to_string(&output).unwrap();
        assert_eq!(content, reporter.render(&c));
    }
}
