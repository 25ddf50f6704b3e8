use gocmd_config::GocmdConfig;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;

/// Dispatch a parsed command to the corresponding handler module.
pub fn dispatch(command: Commands, config: &GocmdConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Scan(args) => commands::scan::handle(&args, config, flags),
        Commands::Show(args) => commands::show::handle(&args, config, flags),
        Commands::Schema => commands::schema::handle(flags),
        Commands::Config => commands::config::handle(config, flags),
    }
}
