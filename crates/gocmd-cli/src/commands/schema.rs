use gocmd_core::Catalog;

use crate::cli::{GlobalFlags, OutputFormat};
use crate::output;

/// Handle `gocmd schema`.
///
/// Table output makes no sense for a schema, so it falls back to JSON.
pub fn handle(flags: &GlobalFlags) -> anyhow::Result<()> {
    let schema = schemars::schema_for!(Catalog);
    let format = match flags.format {
        Some(OutputFormat::Raw) => OutputFormat::Raw,
        _ => OutputFormat::Json,
    };
    output::output(&schema, format)
}
