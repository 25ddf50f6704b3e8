use gocmd_config::GocmdConfig;

use crate::cli::GlobalFlags;
use crate::output;

/// Handle `gocmd config`.
pub fn handle(config: &GocmdConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    output::output(config, flags.output_format(config))
}
