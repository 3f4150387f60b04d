// Only compile UI module when TUI feature is enabled
#[cfg(feature = "tui")]
mod ui;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

use auto_catalog::logging::{init_logging, level_from_verbosity};
use auto_catalog::{
    CatalogView, DatasetReader, IngestConfig, Ingestion, ManufacturerView, RowLengthPolicy,
    UnknownColumnPolicy, DEFAULT_DATA_PATH,
};

#[derive(Parser)]
#[command(name = "auto-catalog", version, about = "Vehicle model catalog built from a TSV dataset")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Load the dataset and print a summary
    Import {
        #[command(flatten)]
        source: SourceArgs,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Print one manufacturer's models
    Show {
        /// Brand name, exactly as in the dataset (case sensitive)
        brand: String,

        #[command(flatten)]
        source: SourceArgs,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Browse the catalog interactively
    Browse(SourceArgs),
}

#[derive(Args)]
struct SourceArgs {
    /// Tab-separated dataset with a `name` column
    #[arg(long, env = "AUTO_CATALOG_DATA", default_value = DEFAULT_DATA_PATH)]
    data: PathBuf,

    /// Drop columns that name no known attribute instead of failing
    #[arg(long, env = "AUTO_CATALOG_SKIP_UNKNOWN")]
    skip_unknown: bool,

    /// Accept records whose cell count differs from the header
    #[arg(long, env = "AUTO_CATALOG_LENIENT")]
    lenient: bool,
}

impl SourceArgs {
    fn config(&self) -> IngestConfig {
        let unknown = if self.skip_unknown {
            UnknownColumnPolicy::Skip
        } else {
            UnknownColumnPolicy::Reject
        };
        let row_length = if self.lenient {
            RowLengthPolicy::Lenient
        } else {
            RowLengthPolicy::Strict
        };

        IngestConfig::default()
            .with_unknown_columns(unknown)
            .with_row_length(row_length)
    }

    fn load(&self) -> Result<Ingestion> {
        load(&self.data, self.config())
    }
}

fn load(path: &Path, config: IngestConfig) -> Result<Ingestion> {
    DatasetReader::new(config)?
        .load(path)
        .with_context(|| format!("Failed to load dataset {}", path.display()))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(level_from_verbosity(cli.verbose, cli.quiet))?;

    match cli.command {
        Command::Import { source, json } => run_import(&source, json),
        Command::Show { brand, source, json } => run_show(&brand, &source, json),
        Command::Browse(source) => run_ui_mode(&source),
    }
}

fn run_import(source: &SourceArgs, json: bool) -> Result<()> {
    let ingestion = source.load()?;

    if json {
        let out = serde_json::json!({
            "report": ingestion.report,
            "catalog": CatalogView::from(&ingestion.registry),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    let report = &ingestion.report;
    println!("📂 Dataset: {}", report.source.as_deref().unwrap_or("-"));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("✓ Rows:          {}", report.rows);
    println!("✓ Manufacturers: {}", report.manufacturers);
    println!("✓ Models:        {}", report.models);
    if !report.skipped_columns.is_empty() {
        println!("⚠ Skipped columns: {}", report.skipped_columns.join(", "));
    }
    println!("✓ Fingerprint:   {}", report.fingerprint);
    println!();

    for manufacturer in ingestion.registry.manufacturers() {
        println!("  {:<16} {:>4} models", manufacturer.brand(), manufacturer.model_count());
    }

    Ok(())
}

fn run_show(brand: &str, source: &SourceArgs, json: bool) -> Result<()> {
    let ingestion = source.load()?;

    // A missing brand is a normal outcome, reported without an error chain
    let Some(manufacturer) = ingestion.registry.get(brand) else {
        eprintln!("No such manufacturer: {brand}");
        std::process::exit(1);
    };

    if json {
        let view = ManufacturerView::from(manufacturer);
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    println!("🚗 {} ({} models)", manufacturer.brand(), manufacturer.model_count());
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    for model in manufacturer.models() {
        let rendered: Vec<&str> = model.attributes().iter().map(|a| a.display()).collect();
        println!("  {:<28} {}", model.name(), rendered.join(" | "));
    }

    Ok(())
}

#[cfg(feature = "tui")]
fn run_ui_mode(source: &SourceArgs) -> Result<()> {
    let ingestion = source.load()?;

    let mut app = ui::App::new(ingestion.registry);
    ui::run_ui(&mut app)?;

    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_ui_mode(_source: &SourceArgs) -> Result<()> {
    anyhow::bail!(
        "TUI mode not available: rebuild with `--features tui` or use the web server \
         (`cargo run --bin auto-catalog-server --features server`)"
    )
}
