//! @ai:module:intent Metric records, grouping and comparison
//! @ai:module:layer application
//! @ai:module:public_api MetricRecord, Percentiles, ResultSet, Grouping, TestGroup,
//! @ai:module:public_api ComparisonAggregator, Comparison, Ratio

pub mod aggregator;
pub mod grouping;
pub mod types;

pub use aggregator::{
    Comparison, ComparisonAggregator, ComparisonAggregatorTrait, GroupSummary, Insight,
    NamedResult, Ratio,
};
pub use grouping::{Grouping, InsightRule, TestGroup};
pub use types::{MetricRecord, Percentiles, ResultSet};
