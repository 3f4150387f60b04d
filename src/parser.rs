// 📄 Dataset Parser - TSV source → Registry
//
// First record is the header (column names). Every following record is zipped
// with the header positionally, its `name` cell split off, and handed to the
// ModelBuilder. Any error aborts the whole load.

use chrono::{DateTime, Utc};
use csv::ReaderBuilder;
use serde::Serialize;
use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::builder::ModelBuilder;
use crate::config::{IngestConfig, RowLengthPolicy, UnknownColumnPolicy, NAME_COLUMN};
use crate::entities::{Registry, RegistryBuilder};
use crate::error::{CatalogError, Result};

// ============================================================================
// LOAD REPORT
// ============================================================================

/// What a load produced, for logs, the CLI and the health endpoint
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoadReport {
    /// Source path, None when reading from an in-memory reader
    pub source: Option<String>,
    pub loaded_at: DateTime<Utc>,
    /// Header, in source order
    pub columns: Vec<String>,
    /// Data records read (header excluded)
    pub rows: usize,
    pub manufacturers: usize,
    pub models: usize,
    /// Header columns dropped under UnknownColumnPolicy::Skip
    pub skipped_columns: Vec<String>,
    /// Registry::fingerprint of the result
    pub fingerprint: String,
}

/// A finished load: the frozen registry plus its report
#[derive(Debug, Clone)]
pub struct Ingestion {
    pub registry: Registry,
    pub report: LoadReport,
}

// ============================================================================
// DATASET READER
// ============================================================================

#[derive(Debug, Clone)]
pub struct DatasetReader {
    config: IngestConfig,
    builder: ModelBuilder,
}

impl DatasetReader {
    pub fn new(config: IngestConfig) -> Result<Self> {
        let builder = ModelBuilder::new(config.unknown_columns)?;
        Ok(DatasetReader { config, builder })
    }

    pub fn config(&self) -> &IngestConfig {
        &self.config
    }

    /// Load `path` into a Registry
    pub fn read(&self, path: &Path) -> Result<Registry> {
        Ok(self.load(path)?.registry)
    }

    /// Load `path`, keeping the load report
    ///
    /// The file handle is dropped on every exit path.
    pub fn load(&self, path: &Path) -> Result<Ingestion> {
        let file = File::open(path).map_err(|source| CatalogError::SourceUnavailable {
            path: path.to_path_buf(),
            source,
        })?;

        let mut ingestion = self.load_from(file)?;
        ingestion.report.source = Some(path.display().to_string());

        info!(
            source = %path.display(),
            rows = ingestion.report.rows,
            manufacturers = ingestion.report.manufacturers,
            models = ingestion.report.models,
            "dataset loaded"
        );

        Ok(ingestion)
    }

    /// Same as `read`, for any byte source
    pub fn read_from<R: Read>(&self, reader: R) -> Result<Registry> {
        Ok(self.load_from(reader)?.registry)
    }

    pub fn load_from<R: Read>(&self, reader: R) -> Result<Ingestion> {
        let mut csv_reader = ReaderBuilder::new()
            .delimiter(self.config.delimiter)
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        let mut records = csv_reader.records();

        // ====================================================================
        // HEADER
        // ====================================================================
        let header_record = match records.next() {
            Some(result) => result.map_err(|source| CatalogError::SourceRead { line: 1, source })?,
            None => return Err(CatalogError::EmptySource),
        };

        let columns: Vec<String> = header_record
            .iter()
            .enumerate()
            .map(|(i, cell)| {
                if i == 0 {
                    cell.trim_start_matches('\u{feff}').to_string()
                } else {
                    cell.to_string()
                }
            })
            .collect();

        let mut seen = HashSet::with_capacity(columns.len());
        if let Some(duplicate) = columns.iter().find(|c| !seen.insert(c.as_str())) {
            return Err(CatalogError::MalformedRecord {
                line: 1,
                reason: format!("duplicate column '{duplicate}'"),
            });
        }

        let name_index = columns
            .iter()
            .position(|c| c == NAME_COLUMN)
            .ok_or(CatalogError::MissingNameColumn)?;

        let skipped_columns: Vec<String> = match self.builder.unknown_columns() {
            UnknownColumnPolicy::Skip => columns
                .iter()
                .enumerate()
                .filter(|(i, c)| *i != name_index && !self.builder.factory().recognizes(c))
                .map(|(_, c)| c.clone())
                .collect(),
            UnknownColumnPolicy::Reject => Vec::new(),
        };
        if !skipped_columns.is_empty() {
            warn!(columns = ?skipped_columns, "unknown columns will be skipped");
        }

        debug!(columns = ?columns, "header read");

        // ====================================================================
        // RECORDS
        // ====================================================================
        let mut registry = RegistryBuilder::new();
        let mut rows = 0usize;

        for result in records {
            let record = result.map_err(|source| CatalogError::SourceRead {
                line: source.position().map_or(0, |p| p.line()),
                source,
            })?;
            let line = record.position().map_or(0, |p| p.line());

            if record.len() != columns.len() {
                match self.config.row_length {
                    RowLengthPolicy::Strict => {
                        return Err(CatalogError::MalformedRecord {
                            line,
                            reason: format!(
                                "expected {} cells, found {}",
                                columns.len(),
                                record.len()
                            ),
                        });
                    }
                    RowLengthPolicy::Lenient => {
                        debug!(line, expected = columns.len(), found = record.len(), "ragged record");
                    }
                }
            }

            let name_field = record.get(name_index).ok_or_else(|| CatalogError::MalformedRecord {
                line,
                reason: "record has no name cell".to_string(),
            })?;

            let fields = columns
                .iter()
                .zip(record.iter())
                .enumerate()
                .filter(|(i, _)| *i != name_index)
                .map(|(_, (column, cell))| (column.as_str(), cell));

            self.builder
                .build(&mut registry, name_field, fields)
                .map_err(|e| e.at_line(line))?;

            rows += 1;
        }

        let registry = registry.build();
        let report = LoadReport {
            source: None,
            loaded_at: Utc::now(),
            columns,
            rows,
            manufacturers: registry.len(),
            models: registry.model_count(),
            skipped_columns,
            fingerprint: registry.fingerprint(),
        };

        Ok(Ingestion { registry, report })
    }
}

// ============================================================================
// TESTS
// ============================================================================
