use std::path::Path;

use anyhow::Context;
use gocmd_config::GocmdConfig;
use gocmd_core::Catalog;
use gocmd_parser::{TracingSink, extract_catalog_with};

use crate::bootstrap::catalog_options;
use crate::cli::root_commands::ScanArgs;
use crate::cli::{FilterArgs, GlobalFlags, OutputFormat};
use crate::output::{self, FunctionRow};

/// Handle `gocmd scan`.
pub fn handle(args: &ScanArgs, config: &GocmdConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let catalog = load_catalog(&args.dir, &args.filters, config)?;
    tracing::debug!(package = %catalog.package, functions = catalog.len(), "scan complete");

    match flags.output_format(config) {
        OutputFormat::Table => {
            let rows: Vec<FunctionRow> = catalog.functions.iter().map(FunctionRow::from).collect();
            output::output(&rows, OutputFormat::Table)
        }
        format => output::output(&catalog, format),
    }
}

/// Extract the catalog of `dir`, logging diagnostics as warnings.
pub fn load_catalog(dir: &Path, filters: &FilterArgs, config: &GocmdConfig) -> anyhow::Result<Catalog> {
    let options = catalog_options(config, filters);
    extract_catalog_with(dir, &options, &mut TracingSink)
        .with_context(|| format!("failed to extract catalog from {}", dir.display()))
}
