//! @ai:module:intent Extract metrics from ApacheBench plaintext output
//! @ai:module:layer application
//! @ai:module:public_api ReportExtractor, ReportExtractorTrait, PERCENTILE_HEADER
//! @ai:module:stateless true

use crate::metrics::{MetricRecord, Percentiles};
use regex::Regex;
use std::str::FromStr;

/// Heading that opens the latency distribution block in `ab` output.
pub const PERCENTILE_HEADER: &str = "Percentage of the requests served within a certain time (ms)";

/// @ai:intent Trait for metric extraction
pub trait ReportExtractorTrait: Send + Sync {
    /// @ai:intent Extract a metric record from report text
    /// @ai:post never fails, missing fields take their defaults
    fn extract(&self, text: &str) -> MetricRecord;
}

/// @ai:intent Extracts labelled metrics and the percentile block from `ab` reports
pub struct ReportExtractor {
    requests_per_second: Regex,
    time_per_request_mean: Regex,
    /// Must match the full qualifier so it never picks up the `(mean)` line
    time_per_request_concurrent: Regex,
    failed_requests: Regex,
    total_requests: Regex,
    concurrency_level: Regex,
    percentile_header: Regex,
}

impl ReportExtractor {
    /// @ai:intent Create a new report extractor
    /// @ai:effects pure
    pub fn new() -> Self {
        Self {
            requests_per_second: compile(r"Requests per second:\s+([0-9.]+)\s+\[#/sec\]"),
            time_per_request_mean: compile(r"Time per request:\s+([0-9.]+)\s+\[ms\]\s+\(mean\)"),
            time_per_request_concurrent: compile(concat!(
                r"Time per request:\s+([0-9.]+)\s+\[ms\]\s+",
                r"\(mean, across all concurrent requests\)",
            )),
            failed_requests: compile(r"Failed requests:\s+([0-9]+)"),
            total_requests: compile(r"Complete requests:\s+([0-9]+)"),
            concurrency_level: compile(r"Concurrency Level:\s+([0-9]+)"),
            percentile_header: compile(&format!(r"{}\s+", regex::escape(PERCENTILE_HEADER))),
        }
    }

    /// @ai:intent Parse the percentile block, if the report has one
    /// @ai:effects pure
    fn extract_percentiles(&self, text: &str) -> Option<Percentiles> {
        let header = self.percentile_header.find(text)?;

        let percentiles = text[header.end()..]
            .lines()
            .take_while(|line| !line.trim().is_empty())
            .filter(|line| line.contains('%'))
            .filter_map(parse_percentile_line)
            .collect();

        Some(percentiles)
    }
}

impl Default for ReportExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportExtractorTrait for ReportExtractor {
    /// @ai:intent Extract all metrics from report text
    /// @ai:effects pure
    fn extract(&self, text: &str) -> MetricRecord {
        MetricRecord {
            requests_per_second: parse_field(
                &self.requests_per_second,
                text,
                "requests_per_second",
            ),
            time_per_request_mean: parse_field(
                &self.time_per_request_mean,
                text,
                "time_per_request_mean",
            ),
            time_per_request_concurrent: parse_field(
                &self.time_per_request_concurrent,
                text,
                "time_per_request_concurrent",
            ),
            failed_requests: parse_field(&self.failed_requests, text, "failed_requests"),
            total_requests: parse_field(&self.total_requests, text, "total_requests"),
            concurrency_level: parse_field(&self.concurrency_level, text, "concurrency_level"),
            percentiles: self.extract_percentiles(text),
        }
    }
}

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("metric patterns are valid regular expressions")
}

/// @ai:intent Parse the first capture of a pattern, defaulting when absent or unparseable
/// @ai:effects pure
fn parse_field<T: FromStr + Default>(pattern: &Regex, text: &str, field: &str) -> T {
    let Some(raw) = pattern
        .captures(text)
        .and_then(|cap| cap.get(1))
        .map(|m| m.as_str())
    else {
        tracing::debug!("{} not found, using default", field);
        return T::default();
    };

    raw.parse().unwrap_or_else(|_| {
        tracing::warn!("{} has unparseable value {:?}, using default", field, raw);
        T::default()
    })
}

/// @ai:intent Turn a line such as `  95%     40` into `("p95", 40.0)`
/// @ai:effects pure
fn parse_percentile_line(line: &str) -> Option<(String, f64)> {
    let mut parts = line.split_whitespace();
    let label = parts.next()?;
    let value: f64 = parts.next()?.parse().ok()?;

    if !value.is_finite() {
        return None;
    }

    Some((format!("p{}", label.replace('%', "")), value))
}
