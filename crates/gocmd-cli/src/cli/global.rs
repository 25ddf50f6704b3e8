use clap::ValueEnum;

/// Shared output mode across all commands.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Raw,
}

impl From<gocmd_config::OutputFormat> for OutputFormat {
    fn from(format: gocmd_config::OutputFormat) -> Self {
        match format {
            gocmd_config::OutputFormat::Json => Self::Json,
            gocmd_config::OutputFormat::Table => Self::Table,
            gocmd_config::OutputFormat::Raw => Self::Raw,
        }
    }
}

/// Global flags available before or after subcommands.
#[derive(Clone, Debug)]
pub struct GlobalFlags {
    pub format: Option<OutputFormat>,
    pub quiet: bool,
    pub verbose: bool,
}

impl GlobalFlags {
    /// `--format` if given, else the configured format.
    #[must_use]
    pub fn output_format(&self, config: &gocmd_config::GocmdConfig) -> OutputFormat {
        self.format
            .unwrap_or_else(|| OutputFormat::from(config.output.format))
    }
}
