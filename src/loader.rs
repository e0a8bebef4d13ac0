//! @ai:module:intent Load ApacheBench result files from a directory
//! @ai:module:layer infrastructure
//! @ai:module:public_api ResultLoader, ResultLoaderTrait
//! @ai:module:stateless true

use crate::error::{Error, Result};
use crate::extractor::{ReportExtractor, ReportExtractorTrait};
use crate::metrics::{MetricRecord, ResultSet};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// @ai:intent Trait for loading result sets
pub trait ResultLoaderTrait: Send + Sync {
    /// @ai:intent Load every result file in a directory
    /// @ai:post unreadable files are skipped, the set may be empty
    fn load_all(&self, results_dir: &Path) -> Result<ResultSet>;

    /// @ai:intent Load every result file, failing when none could be parsed
    fn load_required(&self, results_dir: &Path) -> Result<ResultSet> {
        let results = self.load_all(results_dir)?;
        if results.is_empty() {
            return Err(Error::NoResults(results_dir.to_path_buf()));
        }
        Ok(results)
    }
}

/// @ai:intent Scans a directory for `<test-name><suffix>` files and extracts them
pub struct ResultLoader {
    extractor: ReportExtractor,
    suffix: String,
}

impl ResultLoader {
    /// @ai:intent Create a loader for files ending in `suffix` (e.g. `_results.txt`)
    /// @ai:effects pure
    pub fn new(suffix: impl Into<String>) -> Self {
        Self {
            extractor: ReportExtractor::new(),
            suffix: suffix.into(),
        }
    }

    /// @ai:intent Derive the test name from a result file name
    /// @ai:effects pure
    pub fn test_name(&self, file_name: &str) -> Option<String> {
        file_name
            .strip_suffix(self.suffix.as_str())
            .filter(|name| !name.is_empty())
            .map(str::to_string)
    }

    /// @ai:intent Find matching result files in file name order
    /// @ai:effects fs:read
    fn find_result_files(&self, results_dir: &Path) -> Vec<(String, PathBuf)> {
        WalkDir::new(results_dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(e) => Some(e),
                Err(e) => {
                    tracing::warn!("Skipping unreadable directory entry: {}", e);
                    None
                }
            })
            .filter(|e| e.file_type().is_file())
            .filter_map(|e| {
                let Some(file_name) = e.file_name().to_str() else {
                    tracing::warn!("Skipping file with non UTF-8 name: {}", e.path().display());
                    return None;
                };
                let name = self.test_name(file_name)?;
                Some((name, e.into_path()))
            })
            .collect()
    }

    /// @ai:intent Read and extract a single result file
    /// @ai:effects fs:read
    fn parse_result_file(&self, path: &Path) -> Result<MetricRecord> {
        let content = std::fs::read_to_string(path).map_err(|source| Error::FileRead {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(self.extractor.extract(&content))
    }
}

impl Default for ResultLoader {
    fn default() -> Self {
        Self::new("_results.txt")
    }
}

impl ResultLoaderTrait for ResultLoader {
    /// @ai:intent Load every result file in a directory
    /// @ai:effects fs:read
    fn load_all(&self, results_dir: &Path) -> Result<ResultSet> {
        if !results_dir.is_dir() {
            return Err(Error::ResultsDirNotFound(results_dir.to_path_buf()));
        }

        let mut results = ResultSet::new();

        for (name, path) in self.find_result_files(results_dir) {
            match self.parse_result_file(&path) {
                Ok(metrics) => {
                    tracing::info!("Loaded results for: {}", name);
                    results.insert(name, metrics);
                }
                Err(e) => {
                    tracing::warn!("Error parsing {}: {}", path.display(), e);
                }
            }
        }

        Ok(results)
    }
}
