use gocmd_config::GocmdConfig;

use crate::cli::root_commands::ShowArgs;
use crate::cli::{GlobalFlags, OutputFormat};
use crate::commands::scan::load_catalog;
use crate::output::{self, ParameterRow};

/// Handle `gocmd show`.
pub fn handle(args: &ShowArgs, config: &GocmdConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let catalog = load_catalog(&args.dir, &args.filters, config)?;
    let function = catalog.require(&args.name)?;

    match flags.output_format(config) {
        OutputFormat::Table => {
            let rows: Vec<ParameterRow> = function.parameters.iter().map(ParameterRow::from).collect();
            output::output(&rows, OutputFormat::Table)
        }
        format => output::output(function, format),
    }
}
