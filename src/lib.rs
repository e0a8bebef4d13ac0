//! @ai:module:intent ApacheBench result analysis library
//! @ai:module:layer application
//! @ai:module:public_api config, error, extractor, loader, metrics, report
//!
//! # perf-analyzer
//!
//! Parses `ab` result files, ranks them by throughput and writes a text
//! report plus CSV and JSON exports.
//!
//! ```rust,no_run
//! use perf_analyzer::{
//!     AnalyzerConfig, ComparisonAggregator, ComparisonAggregatorTrait, Grouping,
//!     ReportGenerator, ResultLoader, ResultLoaderTrait,
//! };
//! use std::path::Path;
//!
//! let config = AnalyzerConfig::default();
//! let dir = Path::new("performance_results");
//!
//! let results = ResultLoader::new(&config.paths.result_suffix).load_required(dir).unwrap();
//! let aggregator = ComparisonAggregator::new(Grouping::from_config(&config));
//! let now = chrono::Local::now().naive_local();
//!
//! if let Some(comparison) = aggregator.compare(&results, now) {
//!     ReportGenerator::new(&config).generate_all(&results, &comparison, dir).unwrap();
//! }
//! ```

pub mod config;
pub mod error;
pub mod extractor;
pub mod loader;
pub mod metrics;
pub mod report;

pub use config::AnalyzerConfig;
pub use error::{Error, Result};
pub use extractor::{ReportExtractor, ReportExtractorTrait};
pub use loader::{ResultLoader, ResultLoaderTrait};
pub use metrics::{
    Comparison, ComparisonAggregator, ComparisonAggregatorTrait, Grouping, MetricRecord, Ratio,
    ResultSet,
};
pub use report::{GeneratedReports, ReportGenerator};
