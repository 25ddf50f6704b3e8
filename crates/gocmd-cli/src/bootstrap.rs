use anyhow::Context;
use gocmd_config::GocmdConfig;
use gocmd_parser::{CatalogOptions, ExtractOptions, LoadOptions};

use crate::cli::FilterArgs;

pub fn load_config() -> anyhow::Result<GocmdConfig> {
    GocmdConfig::load_with_dotenv().context("failed to load gocmd configuration")
}

/// Configured scan settings with command-line overrides applied.
///
/// `--exclude` patterns are added to the configured ones.
pub fn catalog_options(config: &GocmdConfig, filters: &FilterArgs) -> CatalogOptions {
    let mut exclude = config.scan.exclude.clone();
    exclude.extend(filters.exclude.iter().cloned());
    CatalogOptions {
        load: LoadOptions { exclude },
        extract: ExtractOptions {
            unsafe_pointer: filters.unsafe_pointer.unwrap_or(config.scan.unsafe_pointer),
        },
    }
}
