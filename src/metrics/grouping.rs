//! @ai:module:intent Declarative test groupings for report subsections and insights
//! @ai:module:layer domain
//! @ai:module:public_api TestGroup, InsightRule, Grouping

use crate::config::AnalyzerConfig;
use crate::metrics::types::{MetricRecord, ResultSet};
use std::fmt;

type NamePredicate = Box<dyn Fn(&str) -> bool + Send + Sync>;

/// @ai:intent A labelled predicate over test names
///
/// Groups are independent of each other, so a test may belong to several.
pub struct TestGroup {
    label: String,
    predicate: NamePredicate,
}

impl TestGroup {
    /// @ai:intent Create a group from an arbitrary name predicate
    /// @ai:effects pure
    pub fn new(
        label: impl Into<String>,
        predicate: impl Fn(&str) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            label: label.into(),
            predicate: Box::new(predicate),
        }
    }

    /// @ai:intent Create a group matching names that contain a keyword (case-sensitive)
    /// @ai:effects pure
    pub fn name_contains(label: impl Into<String>, keyword: impl Into<String>) -> Self {
        let keyword = keyword.into();
        Self::new(label, move |name| name.contains(keyword.as_str()))
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn matches(&self, name: &str) -> bool {
        (self.predicate)(name)
    }

    /// @ai:intent Select the matching tests in discovery order
    /// @ai:effects pure
    pub fn select<'a>(&self, results: &'a ResultSet) -> Vec<(&'a str, &'a MetricRecord)> {
        results.iter().filter(|(name, _)| self.matches(name)).collect()
    }
}

impl fmt::Debug for TestGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestGroup")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

/// @ai:intent Compare the average RPS of a subject group against a baseline group
#[derive(Debug)]
pub struct InsightRule {
    pub label: String,
    pub subject: TestGroup,
    pub baseline: TestGroup,
}

impl InsightRule {
    pub fn new(label: impl Into<String>, subject: TestGroup, baseline: TestGroup) -> Self {
        Self {
            label: label.into(),
            subject,
            baseline,
        }
    }
}

/// @ai:intent Ordered report groups plus ordered insight rules
#[derive(Debug, Default)]
pub struct Grouping {
    groups: Vec<TestGroup>,
    insights: Vec<InsightRule>,
}

impl Grouping {
    /// @ai:intent Create an empty grouping
    /// @ai:effects pure
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_group(mut self, group: TestGroup) -> Self {
        self.groups.push(group);
        self
    }

    pub fn with_insight(mut self, insight: InsightRule) -> Self {
        self.insights.push(insight);
        self
    }

    /// @ai:intent Build keyword groups and insights from configuration
    /// @ai:effects pure
    pub fn from_config(config: &AnalyzerConfig) -> Self {
        let groups = config
            .groups
            .iter()
            .map(|g| TestGroup::name_contains(&g.label, &g.keyword))
            .collect();

        let insights = config
            .insights
            .iter()
            .map(|i| {
                InsightRule::new(
                    &i.label,
                    TestGroup::name_contains(&i.subject, &i.subject),
                    TestGroup::name_contains(&i.baseline, &i.baseline),
                )
            })
            .collect();

        Self { groups, insights }
    }

    pub fn groups(&self) -> &[TestGroup] {
        &self.groups
    }

    pub fn insights(&self) -> &[InsightRule] {
        &self.insights
    }
}
