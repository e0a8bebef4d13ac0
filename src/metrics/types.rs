//! @ai:module:intent Metric types extracted from ApacheBench reports
//! @ai:module:layer domain
//! @ai:module:public_api MetricRecord, Percentiles, ResultSet
//! @ai:module:stateless true

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Latency in milliseconds keyed by percentile label (`"p50"`, `"p95"`, ...),
/// in the order the report lists them.
pub type Percentiles = IndexMap<String, f64>;

/// @ai:intent Metrics for a single benchmark run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricRecord {
    pub requests_per_second: f64,
    pub time_per_request_mean: f64,
    pub time_per_request_concurrent: f64,
    pub failed_requests: u64,
    pub total_requests: u64,
    pub concurrency_level: u64,
    /// `None` when the report had no percentile section
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percentiles: Option<Percentiles>,
}

impl MetricRecord {
    /// @ai:intent Look up a single percentile latency
    /// @ai:effects pure
    pub fn percentile(&self, label: &str) -> Option<f64> {
        self.percentiles
            .as_ref()
            .and_then(|p| p.get(label))
            .copied()
    }
}

/// @ai:intent All metric records keyed by test name, in discovery order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultSet {
    tests: IndexMap<String, MetricRecord>,
}

impl ResultSet {
    /// @ai:intent Create an empty result set
    /// @ai:effects pure
    pub fn new() -> Self {
        Self::default()
    }

    /// @ai:intent Insert a record, replacing any earlier record with the same name
    /// @ai:post a replaced record keeps its original position
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        record: MetricRecord,
    ) -> Option<MetricRecord> {
        self.tests.insert(name.into(), record)
    }

    pub fn get(&self, name: &str) -> Option<&MetricRecord> {
        self.tests.get(name)
    }

    pub fn len(&self) -> usize {
        self.tests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tests.is_empty()
    }

    /// @ai:intent Iterate over (name, record) pairs in discovery order
    /// @ai:effects pure
    pub fn iter(&self) -> impl Iterator<Item = (&str, &MetricRecord)> {
        self.tests.iter().map(|(name, record)| (name.as_str(), record))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tests.keys().map(String::as_str)
    }
}

impl<N: Into<String>> FromIterator<(N, MetricRecord)> for ResultSet {
    fn from_iter<I: IntoIterator<Item = (N, MetricRecord)>>(iter: I) -> Self {
        let mut results = Self::new();
        for (name, record) in iter {
            results.insert(name, record);
        }
        results
    }
}
