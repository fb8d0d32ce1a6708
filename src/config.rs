use crate::denomination::DenominationSet;
use crate::error::TillError;
use crate::logging::{LogFormat, LoggingConfig};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "till")]
#[command(version, about = "Greedy coin-dispensing till simulator", long_about = None)]
pub struct Cli {
    /// Input file; standard input when omitted or `-`
    #[arg(value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Comma-separated denomination values (default 1,2,5,10,20,50,100)
    #[arg(long, value_delimiter = ',', value_name = "VALUES")]
    pub denominations: Vec<u64>,

    /// Write the till's final state as CSV
    #[arg(long, value_name = "FILE")]
    pub report: Option<PathBuf>,

    /// Log filter directive
    #[arg(long, env = "TILL_LOG", default_value = "warn")]
    pub log_level: String,

    /// Log format
    #[arg(long, value_enum, ignore_case = true, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

impl Cli {
    pub fn denomination_set(&self) -> Result<DenominationSet, TillError> {
        if self.denominations.is_empty() {
            return Ok(DenominationSet::standard());
        }
        DenominationSet::new(self.denominations.iter().copied())
    }

    pub fn logging_config(&self) -> LoggingConfig {
        LoggingConfig {
            log_level: self.log_level.clone(),
            log_format: self.log_format,
        }
    }
}
