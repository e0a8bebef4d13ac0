//! @ai:module:intent Fixed-schema CSV export of a result set
//! @ai:module:layer infrastructure
//! @ai:module:public_api CsvReporter, CsvReporterTrait, CSV_COLUMNS
//! @ai:module:stateless true

use crate::error::{Error, Result};
use crate::metrics::{MetricRecord, ResultSet};
use std::io::Write;
use std::path::Path;

/// Percentile columns exported, in order.
const PERCENTILE_COLUMNS: [&str; 4] = ["p50", "p90", "p95", "p99"];

pub const CSV_COLUMNS: [&str; 11] = [
    "test_name",
    "requests_per_second",
    "time_per_request_mean",
    "time_per_request_concurrent",
    "failed_requests",
    "total_requests",
    "concurrency_level",
    "p50",
    "p90",
    "p95",
    "p99",
];

/// @ai:intent Trait for CSV export
pub trait CsvReporterTrait: Send + Sync {
    /// @ai:intent Write all results as CSV to a writer
    /// @ai:post fails with EmptyResultSet, writing nothing, when there are no results
    fn write<W: Write>(&self, results: &ResultSet, writer: W) -> Result<()>;

    /// @ai:intent Write all results as CSV to a file
    /// @ai:post no file is created when there are no results
    fn generate(&self, results: &ResultSet, output_path: &Path) -> Result<()>;
}

/// @ai:intent Writes one row per test in discovery order
pub struct CsvReporter;

impl CsvReporter {
    /// @ai:intent Create a new CSV reporter
    /// @ai:effects pure
    pub fn new() -> Self {
        Self
    }

    /// @ai:intent Build the row for one test; missing percentiles are empty
    /// @ai:effects pure
    fn row(name: &str, m: &MetricRecord) -> Vec<String> {
        let mut row = vec![
            name.to_string(),
            format_float(m.requests_per_second),
            format_float(m.time_per_request_mean),
            format_float(m.time_per_request_concurrent),
            m.failed_requests.to_string(),
            m.total_requests.to_string(),
            m.concurrency_level.to_string(),
        ];

        row.extend(
            PERCENTILE_COLUMNS
                .iter()
                .map(|label| m.percentile(label).map(format_float).unwrap_or_default()),
        );
        row
    }
}

impl Default for CsvReporter {
    fn default() -> Self {
        Self::new()
    }
}

/// Whole numbers keep one decimal so float columns read as floats.
fn format_float(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{:.1}", value)
    } else {
        value.to_string()
    }
}

impl CsvReporterTrait for CsvReporter {
    /// @ai:effects io:write
    fn write<W: Write>(&self, results: &ResultSet, writer: W) -> Result<()> {
        if results.is_empty() {
            return Err(Error::EmptyResultSet);
        }

        let mut wtr = csv::WriterBuilder::new().from_writer(writer);

        wtr.write_record(CSV_COLUMNS)?;
        for (name, metrics) in results.iter() {
            wtr.write_record(Self::row(name, metrics))?;
        }

        wtr.flush()?;
        Ok(())
    }

    /// @ai:effects fs:write
    fn generate(&self, results: &ResultSet, output_path: &Path) -> Result<()> {
        if results.is_empty() {
            return Err(Error::EmptyResultSet);
        }

        let file = std::fs::File::create(output_path).map_err(|source| Error::FileWrite {
            path: output_path.to_path_buf(),
            source,
        })?;
        self.write(results, file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::Percentiles;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn to_csv(results: &ResultSet) -> String {
        let mut buf = Vec::new();
        CsvReporter::new().write(results, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_header_order() {
        let results: ResultSet = [("a", MetricRecord::default())].into_iter().collect();
        let csv = to_csv(&results);
        assert_eq!(
            csv.lines().next().unwrap(),
            "test_name,requests_per_second,time_per_request_mean,time_per_request_concurrent,\
             failed_requests,total_requests,concurrency_level,p50,p90,p95,p99"
        );
    }

    #[test]
    fn test_empty_results_write_nothing() {
        let mut buf = Vec::new();
        let err = CsvReporter::new()
            .write(&ResultSet::new(), &mut buf)
            .unwrap_err();

        assert!(matches!(err, Error::EmptyResultSet));
        assert!(buf.is_empty());
    }

    #[test]
    fn test_empty_results_create_no_file() {
        let temp = TempDir::new().unwrap();
        let output = temp.path().join("performance_comparison.csv");

        let err = CsvReporter::new()
            .generate(&ResultSet::new(), &output)
            .unwrap_err();

        assert!(matches!(err, Error::EmptyResultSet));
        assert!(!output.exists());
    }

    #[test]
    fn test_missing_percentile_is_empty_not_zero() {
        let percentiles: Percentiles = [("p50", 10.0), ("p90", 25.0), ("p95", 40.0)]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();
        let results: ResultSet = [(
            "java_virtual",
            MetricRecord {
                requests_per_second: 1234.56,
                time_per_request_mean: 40.5,
                time_per_request_concurrent: 0.81,
                failed_requests: 2,
                total_requests: 10000,
                concurrency_level: 50,
                percentiles: Some(percentiles),
            },
        )]
        .into_iter()
        .collect();

        let csv = to_csv(&results);
        let row = csv.lines().nth(1).unwrap();
        assert_eq!(row, "java_virtual,1234.56,40.5,0.81,2,10000,50,10.0,25.0,40.0,");
        assert!(row.ends_with(','));
    }

    #[test]
    fn test_no_percentile_section() {
        let results: ResultSet = [("bare", MetricRecord::default())].into_iter().collect();
        let row = to_csv(&results).lines().nth(1).unwrap().to_string();
        assert_eq!(row, "bare,0.0,0.0,0.0,0,0,0,,,,");
    }

    #[test]
    fn test_rows_in_discovery_order() {
        let results: ResultSet = [
            (
                "slow",
                MetricRecord {
                    requests_per_second: 1.0,
                    ..Default::default()
                },
            ),
            (
                "fast",
                MetricRecord {
                    requests_per_second: 9.0,
                    ..Default::default()
                },
            ),
        ]
        .into_iter()
        .collect();

        let csv = to_csv(&results);
        let names: Vec<_> = csv
            .lines()
            .skip(1)
            .map(|l| l.split(',').next().unwrap())
            .collect();
        assert_eq!(names, vec!["slow", "fast"]);
    }

    #[test]
    fn test_generate_writes_file() {
        let temp = TempDir::new().unwrap();
        let output = temp.path().join("performance_comparison.csv");
        let results: ResultSet = [("a", MetricRecord::default())].into_iter().collect();

        CsvReporter::new().generate(&results, &output).unwrap();

        let content = std::fs::read_to_string(&output).unwrap();
        assert_eq!(content.lines().count(), 2);
    }
}
