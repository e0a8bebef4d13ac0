//! @ai:module:intent Rank benchmark results and derive comparison figures
//! @ai:module:layer application
//! @ai:module:public_api ComparisonAggregator, ComparisonAggregatorTrait, Comparison, Ratio
//! @ai:module:stateless true

use crate::metrics::grouping::{Grouping, InsightRule};
use crate::metrics::types::{MetricRecord, ResultSet};
use chrono::NaiveDateTime;
use std::fmt;

/// @ai:intent A relative change that is undefined when its denominator is zero
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Ratio {
    Percent(f64),
    NotApplicable,
}

impl Ratio {
    /// @ai:intent Compute `(numerator / denominator - 1) * 100`
    /// @ai:post NotApplicable instead of infinity or NaN
    /// @ai:effects pure
    pub fn relative(numerator: f64, denominator: f64) -> Self {
        if denominator == 0.0 {
            return Ratio::NotApplicable;
        }

        let percent = (numerator / denominator - 1.0) * 100.0;
        if percent.is_finite() {
            Ratio::Percent(percent)
        } else {
            Ratio::NotApplicable
        }
    }

    pub fn as_percent(&self) -> Option<f64> {
        match self {
            Ratio::Percent(p) => Some(*p),
            Ratio::NotApplicable => None,
        }
    }

    /// @ai:intent Format with an explicit sign, e.g. `+12.3%`
    /// @ai:effects pure
    pub fn signed(&self) -> String {
        match self {
            Ratio::Percent(p) => format!("{:+.1}%", p),
            Ratio::NotApplicable => "N/A".to_string(),
        }
    }
}

impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ratio::Percent(p) => write!(f, "{:.1}%", p),
            Ratio::NotApplicable => write!(f, "N/A"),
        }
    }
}

/// @ai:intent A named test result
#[derive(Debug, Clone, PartialEq)]
pub struct NamedResult {
    pub name: String,
    pub metrics: MetricRecord,
}

impl NamedResult {
    fn new(name: &str, metrics: &MetricRecord) -> Self {
        Self {
            name: name.to_string(),
            metrics: metrics.clone(),
        }
    }
}

/// @ai:intent Members of one report group, in discovery order
#[derive(Debug, Clone, PartialEq)]
pub struct GroupSummary {
    pub label: String,
    pub members: Vec<NamedResult>,
}

/// @ai:intent Average-RPS comparison between two non-empty groups
#[derive(Debug, Clone, PartialEq)]
pub struct Insight {
    pub label: String,
    pub subject_avg_rps: f64,
    pub baseline_avg_rps: f64,
    pub change: Ratio,
}

/// @ai:intent Complete comparison of a non-empty result set
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    pub generated_at: NaiveDateTime,
    /// Sorted by requests per second, descending; never empty
    pub ranked: Vec<NamedResult>,
    pub best: NamedResult,
    pub worst: NamedResult,
    pub improvement: Ratio,
    /// Every configured group in order, including those with no members
    pub groups: Vec<GroupSummary>,
    /// Only insights whose groups were both non-empty
    pub insights: Vec<Insight>,
}

/// @ai:intent Trait for result comparison
pub trait ComparisonAggregatorTrait: Send + Sync {
    /// @ai:intent Compare all results
    /// @ai:post None when the result set is empty
    fn compare(&self, results: &ResultSet, generated_at: NaiveDateTime) -> Option<Comparison>;
}

/// @ai:intent Ranks results and applies the configured grouping
pub struct ComparisonAggregator {
    grouping: Grouping,
}

impl ComparisonAggregator {
    /// @ai:intent Create an aggregator using the given grouping
    /// @ai:effects pure
    pub fn new(grouping: Grouping) -> Self {
        Self { grouping }
    }

    /// @ai:intent Sort by RPS descending, keeping discovery order for ties
    /// @ai:effects pure
    fn rank(results: &ResultSet) -> Vec<NamedResult> {
        let mut ranked: Vec<_> = results
            .iter()
            .map(|(name, metrics)| NamedResult::new(name, metrics))
            .collect();

        ranked.sort_by(|a, b| {
            b.metrics
                .requests_per_second
                .total_cmp(&a.metrics.requests_per_second)
        });
        ranked
    }

    /// @ai:effects pure
    fn summarize_groups(&self, results: &ResultSet) -> Vec<GroupSummary> {
        self.grouping
            .groups()
            .iter()
            .map(|group| GroupSummary {
                label: group.label().to_string(),
                members: group
                    .select(results)
                    .into_iter()
                    .map(|(name, metrics)| NamedResult::new(name, metrics))
                    .collect(),
            })
            .collect()
    }

    /// @ai:intent Evaluate one insight rule, skipping it when either side is empty
    /// @ai:effects pure
    fn evaluate_insight(rule: &InsightRule, results: &ResultSet) -> Option<Insight> {
        let subject = rule.subject.select(results);
        let baseline = rule.baseline.select(results);

        if subject.is_empty() || baseline.is_empty() {
            return None;
        }

        let subject_avg_rps = average(subject.iter().map(|(_, m)| m.requests_per_second));
        let baseline_avg_rps = average(baseline.iter().map(|(_, m)| m.requests_per_second));

        Some(Insight {
            label: rule.label.clone(),
            subject_avg_rps,
            baseline_avg_rps,
            change: Ratio::relative(subject_avg_rps, baseline_avg_rps),
        })
    }
}

impl Default for ComparisonAggregator {
    fn default() -> Self {
        Self::new(Grouping::from_config(&crate::config::AnalyzerConfig::default()))
    }
}

/// @ai:intent Calculate average of an iterator of f64
/// @ai:effects pure
fn average<I: Iterator<Item = f64>>(iter: I) -> f64 {
    let (sum, count) = iter.fold((0.0, 0u32), |(s, c), v| (s + v, c + 1));

    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

impl ComparisonAggregatorTrait for ComparisonAggregator {
    /// @ai:intent Compare all results
    /// @ai:effects pure
    fn compare(&self, results: &ResultSet, generated_at: NaiveDateTime) -> Option<Comparison> {
        let ranked = Self::rank(results);
        let best = ranked.first()?.clone();
        let worst = ranked.last()?.clone();

        let improvement = if ranked.len() == 1 {
            Ratio::Percent(0.0)
        } else {
            Ratio::relative(
                best.metrics.requests_per_second,
                worst.metrics.requests_per_second,
            )
        };

        let groups = self.summarize_groups(results);
        let insights = self
            .grouping
            .insights()
            .iter()
            .filter_map(|rule| Self::evaluate_insight(rule, results))
            .collect();

        Some(Comparison {
            generated_at,
            ranked,
            best,
            worst,
            improvement,
            groups,
            insights,
        })
    }
}
