use std::time::Duration;

pub use clap::Parser;
use clap::ValueEnum;
use log::LevelFilter;

/// Report versions of programs installed on this host
#[derive(Debug, Parser)]
#[command(version)]
pub struct Cli {
    /// Programs to query, looked up in PATH
    #[arg(required = true)]
    pub programs: Vec<String>,

    /// Argument(s) making the programs print their version
    #[arg(short = 'a', long = "version-arg", default_value = "--version", allow_hyphen_values = true)]
    pub version_args: Vec<String>,

    /// How long to wait for each program to print its version
    #[arg(short = 't', long = "timeout", default_value_t = 5, value_parser = clap::value_parser!(u16).range(1..))]
    pub timeout_seconds: u16,

    #[arg(long, value_enum, default_value_t = LogLevel::Info, env = "ENVKIT_LOG_LEVEL")]
    pub log_level: LogLevel,

    /// Stop at the first program whose version cannot be retrieved
    #[arg(long)]
    pub fail_fast: bool,
}

impl Cli {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds as u64)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[test]
fn verify_cli() {
    use clap::CommandFactory;
    Cli::command().debug_assert()
}
