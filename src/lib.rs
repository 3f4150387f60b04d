// Auto Catalog - Core Library
// Vehicle dataset (TSV) → typed attributes → manufacturer registry.
// Used by the CLI, the TUI browser and the web server.

pub mod attributes;
pub mod builder;
pub mod config;
pub mod entities;
pub mod error;
pub mod factory;
pub mod logging;
pub mod parser;
pub mod view;

// Re-export commonly used types
pub use attributes::{AttributeKind, AttributeValue, Scalar, UnitOfMeasure};
pub use builder::{split_name, ModelBuilder};
pub use config::{IngestConfig, RowLengthPolicy, UnknownColumnPolicy, DEFAULT_DATA_PATH};
pub use entities::{Manufacturer, ManufacturerId, Model, Registry, RegistryBuilder};
pub use error::{CatalogError, Result};
pub use factory::AttributeFactory;
pub use parser::{DatasetReader, Ingestion, LoadReport};
pub use view::{AttributeView, CatalogView, ManufacturerView, ModelView};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Load `path` with the default configuration (strict TSV)
pub fn load_registry(path: &std::path::Path) -> Result<Registry> {
    DatasetReader::new(IngestConfig::default())?.read(path)
}
