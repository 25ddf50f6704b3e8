use std::path::PathBuf;

use clap::{Args, Subcommand};
use gocmd_core::UnsafePointerPolicy;

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// List the exposed functions of a package directory.
    Scan(ScanArgs),
    /// Show one exposed function.
    Show(ShowArgs),
    /// Print the JSON Schema of the catalog.
    Schema,
    /// Print the effective configuration.
    Config,
}

/// Overrides for the `[scan]` configuration section.
#[derive(Clone, Debug, Default, Args)]
pub struct FilterArgs {
    /// Skip files whose name matches this glob (repeatable)
    #[arg(long = "exclude", value_name = "GLOB")]
    pub exclude: Vec<String>,

    /// What to do with unsafe.Pointer parameters: truncate or skip
    #[arg(long, value_name = "POLICY")]
    pub unsafe_pointer: Option<UnsafePointerPolicy>,
}

#[derive(Clone, Debug, Args)]
pub struct ScanArgs {
    /// Package directory
    #[arg(default_value = ".")]
    pub dir: PathBuf,

    #[command(flatten)]
    pub filters: FilterArgs,
}

#[derive(Clone, Debug, Args)]
pub struct ShowArgs {
    /// Package directory
    pub dir: PathBuf,

    /// Function name
    pub name: String,

    #[command(flatten)]
    pub filters: FilterArgs,
}
