use clap::{Parser, ValueEnum};
use projstats_report::UnknownIdentifierPolicy;
use std::path::PathBuf;

#[derive(Parser, Clone, Debug)]
#[clap(
    name = "projstats",
    about = "Summarises resource usage across a directory of pipeline run summaries",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Cli {
    /// Directory containing one summary file per pipeline run
    #[clap(value_name = "DIR")]
    pub dir: PathBuf,

    /// Where reports and the log file are written [default: ./StatGraphs/]
    #[clap(long, short)]
    pub output: Option<PathBuf>,

    /// Configuration file to load instead of the user config
    #[clap(long)]
    pub config: Option<PathBuf>,

    /// Only report runs raised under this ticket. Can be given more than once
    #[clap(long = "ticket", short = 't', value_name = "TICKET")]
    pub tickets: Vec<String>,

    /// Process registry YAML to use instead of the built-in one
    #[clap(long)]
    pub registry: Option<PathBuf>,

    /// What to do with processes the registry does not know about
    #[clap(long, value_enum)]
    pub unknown_processes: Option<UnknownProcesses>,

    /// Log debug output
    #[clap(long, short)]
    pub verbose: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnknownProcesses {
    /// Stop without writing any report
    Abort,
    /// Drop the process, log a warning and carry on
    Warn,
}

impl From<UnknownProcesses> for UnknownIdentifierPolicy {
    fn from(value: UnknownProcesses) -> Self {
        match value {
            UnknownProcesses::Abort => UnknownIdentifierPolicy::Abort,
            UnknownProcesses::Warn => UnknownIdentifierPolicy::Warn,
        }
    }
}
