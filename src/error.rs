// Error taxonomy for catalog ingestion
// Any of these aborts the whole load: there is no partial registry.

use crate::attributes::AttributeKind;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    /// Source file missing or unreadable.
    #[error("dataset not available at {path}: {source}")]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A record could not be read from an opened source.
    #[error("failed to read record at line {line}: {source}")]
    SourceRead {
        line: u64,
        #[source]
        source: csv::Error,
    },

    /// Source has no header record.
    #[error("dataset is empty: no header record")]
    EmptySource,

    #[error("header has no 'name' column")]
    MissingNameColumn,

    #[error("malformed record at line {line}: {reason}")]
    MalformedRecord { line: u64, reason: String },

    #[error("unknown attribute column '{column}'")]
    UnknownAttributeKind { column: String },

    /// Factory table does not cover the attribute catalog exactly once.
    #[error("attribute factory table is incomplete for {kind:?}")]
    IncompleteCatalog { kind: AttributeKind },
}

impl CatalogError {
    /// Attach a line number to errors raised without one (builder errors).
    pub(crate) fn at_line(self, line: u64) -> Self {
        match self {
            CatalogError::MalformedRecord { reason, .. } => {
                CatalogError::MalformedRecord { line, reason }
            }
            other => other,
        }
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CatalogError::UnknownAttributeKind {
            column: "origin".to_string(),
        };
        assert_eq!(err.to_string(), "unknown attribute column 'origin'");

        let err = CatalogError::MalformedRecord {
            line: 4,
            reason: "expected 3 cells, found 2".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "malformed record at line 4: expected 3 cells, found 2"
        );
    }

    #[test]
    fn test_at_line_rewrites_malformed_only() {
        let err = CatalogError::MalformedRecord {
            line: 0,
            reason: "blank name".to_string(),
        }
        .at_line(7);
        assert!(matches!(err, CatalogError::MalformedRecord { line: 7, .. }));

        let err = CatalogError::MissingNameColumn.at_line(7);
        assert!(matches!(err, CatalogError::MissingNameColumn));
    }
}
