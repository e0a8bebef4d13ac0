//! @ai:module:intent Configuration structs for the performance analyzer
//! @ai:module:layer infrastructure
//! @ai:module:public_api AnalyzerConfig, PathConfig, ReportConfig, GroupConfig, InsightConfig
//! @ai:module:stateless true

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// @ai:intent Main configuration for the analyzer
/// @ai:effects pure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    #[serde(default)]
    pub paths: PathConfig,
    #[serde(default)]
    pub report: ReportConfig,
    #[serde(default = "default_groups")]
    pub groups: Vec<GroupConfig>,
    #[serde(default = "default_insights")]
    pub insights: Vec<InsightConfig>,
}

/// @ai:intent Input directory and output file names
/// @ai:effects pure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathConfig {
    #[serde(default = "default_results_dir")]
    pub results_dir: PathBuf,
    #[serde(default = "default_result_suffix")]
    pub result_suffix: String,
    #[serde(default = "default_report_prefix")]
    pub report_prefix: String,
    #[serde(default = "default_csv_file")]
    pub csv_file: String,
    #[serde(default = "default_json_file")]
    pub json_file: String,
}

/// @ai:intent Headings used by the text report
/// @ai:effects pure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_insights_title")]
    pub insights_title: String,
}

/// @ai:intent A report subsection listing tests whose name contains a keyword
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupConfig {
    pub label: String,
    pub keyword: String,
}

/// @ai:intent Average-RPS comparison between two keyword groups
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightConfig {
    pub label: String,
    pub subject: String,
    pub baseline: String,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            paths: PathConfig::default(),
            report: ReportConfig::default(),
            groups: default_groups(),
            insights: default_insights(),
        }
    }
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            results_dir: default_results_dir(),
            result_suffix: default_result_suffix(),
            report_prefix: default_report_prefix(),
            csv_file: default_csv_file(),
            json_file: default_json_file(),
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            insights_title: default_insights_title(),
        }
    }
}

fn default_results_dir() -> PathBuf {
    PathBuf::from("performance_results")
}

fn default_result_suffix() -> String {
    "_results.txt".to_string()
}

fn default_report_prefix() -> String {
    "comparison_report".to_string()
}

fn default_csv_file() -> String {
    "performance_comparison.csv".to_string()
}

fn default_json_file() -> String {
    "performance_results.json".to_string()
}

fn default_title() -> String {
    "THREAD PERFORMANCE COMPARISON REPORT".to_string()
}

fn default_insights_title() -> String {
    "THREADING MODEL INSIGHTS".to_string()
}

fn default_groups() -> Vec<GroupConfig> {
    vec![
        GroupConfig {
            label: "JAVA IMPLEMENTATIONS".to_string(),
            keyword: "java".to_string(),
        },
        GroupConfig {
            label: "KOTLIN IMPLEMENTATIONS".to_string(),
            keyword: "kotlin".to_string(),
        },
    ]
}

fn default_insights() -> Vec<InsightConfig> {
    vec![
        InsightConfig {
            label: "Virtual threads vs Platform threads".to_string(),
            subject: "virtual".to_string(),
            baseline: "platform".to_string(),
        },
        InsightConfig {
            label: "Kotlin coroutines vs Platform threads".to_string(),
            subject: "coroutine".to_string(),
            baseline: "platform".to_string(),
        },
    ]
}

impl AnalyzerConfig {
    /// @ai:intent Load configuration from a TOML file
    /// @ai:pre path exists and is readable
    /// @ai:effects fs:read
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| crate::Error::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// @ai:intent Load configuration if a path was given, otherwise use defaults
    /// @ai:effects fs:read
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    /// @ai:intent Save configuration to a TOML file
    /// @ai:effects fs:write
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|source| crate::Error::FileWrite {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(())
    }
}
