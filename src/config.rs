// ⚙️ Ingestion configuration
// How the dataset reader treats delimiters, unknown columns and ragged rows.

use serde::{Deserialize, Serialize};

/// Default dataset location, relative to the working directory
pub const DEFAULT_DATA_PATH: &str = "data/auto.tsv";

/// Column holding "<brand> <model name...>"
pub const NAME_COLUMN: &str = "name";

/// What to do with a column that names no known attribute kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownColumnPolicy {
    /// Abort the load with `UnknownAttributeKind`
    #[default]
    Reject,
    /// Drop the field and keep going
    Skip,
}

/// What to do when a record's cell count differs from the header's
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowLengthPolicy {
    /// Abort the load with `MalformedRecord`
    #[default]
    Strict,
    /// Pair header and cells up to the shorter of the two
    Lenient,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    pub delimiter: u8,
    pub unknown_columns: UnknownColumnPolicy,
    pub row_length: RowLengthPolicy,
}

impl Default for IngestConfig {
    fn default() -> Self {
        IngestConfig {
            delimiter: b'\t',
            unknown_columns: UnknownColumnPolicy::Reject,
            row_length: RowLengthPolicy::Strict,
        }
    }
}

impl IngestConfig {
    /// Builder: set delimiter
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Builder: set unknown column policy
    pub fn with_unknown_columns(mut self, policy: UnknownColumnPolicy) -> Self {
        self.unknown_columns = policy;
        self
    }

    /// Builder: set row length policy
    pub fn with_row_length(mut self, policy: RowLengthPolicy) -> Self {
        self.row_length = policy;
        self
    }
}
