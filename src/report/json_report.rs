//! @ai:module:intent JSON export and re-import of a result set
//! @ai:module:layer infrastructure
//! @ai:module:public_api JsonReporter, JsonReporterTrait
//! @ai:module:stateless true

use crate::error::{Error, Result};
use crate::metrics::ResultSet;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// @ai:intent Trait for JSON report generation
pub trait JsonReporterTrait: Send + Sync {
    /// @ai:intent Generate JSON report from results
    /// @ai:post no file is created when there are no results
    fn generate(&self, results: &ResultSet, output_path: &Path) -> Result<()>;

    /// @ai:intent Read back a previously exported JSON report
    fn load(&self, input_path: &Path) -> Result<ResultSet>;
}

/// @ai:intent Serializes the full result set with two-space indentation
pub struct JsonReporter;

impl JsonReporter {
    /// @ai:intent Create a new JSON reporter
    /// @ai:effects pure
    pub fn new() -> Self {
        Self
    }

    /// @ai:intent Serialize results to a pretty-printed JSON string
    /// @ai:effects pure
    pub fn to_string(results: &ResultSet) -> Result<String> {
        Ok(serde_json::to_string_pretty(results)?)
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonReporterTrait for JsonReporter {
    /// @ai:intent Generate JSON report to file
    /// @ai:effects fs:write
    fn generate(&self, results: &ResultSet, output_path: &Path) -> Result<()> {
        if results.is_empty() {
            return Err(Error::EmptyResultSet);
        }

        let write_err = |source| Error::FileWrite {
            path: output_path.to_path_buf(),
            source,
        };

        let file = std::fs::File::create(output_path).map_err(write_err)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, results)?;
        writer.flush().map_err(write_err)?;
        Ok(())
    }

    /// @ai:effects fs:read
    fn load(&self, input_path: &Path) -> Result<ResultSet> {
        let file = std::fs::File::open(input_path).map_err(|source| Error::FileRead {
            path: input_path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }
}
