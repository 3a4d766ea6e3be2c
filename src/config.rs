//! Command line configuration.

use anyhow::{Result, bail};
use clap::Parser;
use log::LevelFilter;
use std::path::PathBuf;
use std::str::FromStr;

/// Command line configuration for refyaml.
#[derive(Debug, Clone, Parser)]
#[command(name = "refyaml", version, about, long_about = None)]
pub struct Config {
    /// Documentation model (JSON)
    pub input: PathBuf,

    /// Output directory, emptied before generation
    #[arg(short, long, default_value = "yaml")]
    pub output: PathBuf,

    /// Language tag written into every item
    #[arg(long, default_value = "typeScript")]
    pub lang: String,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Config {
    /// Parses configuration from command line arguments.
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Validates configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the input model does not exist or the language tag
    /// is empty.
    pub fn validate(&self) -> Result<()> {
        if !self.input.is_file() {
            bail!("Input model does not exist: {}", self.input.display());
        }
        if self.lang.trim().is_empty() {
            bail!("Language tag must not be empty");
        }

        Ok(())
    }

    /// Returns the configured log level, falling back to `info`.
    pub fn level_filter(&self) -> LevelFilter {
        LevelFilter::from_str(&self.log_level).unwrap_or_else(|_| {
            eprintln!("Invalid log level: {}. Using 'info' instead.", self.log_level);
            LevelFilter::Info
        })
    }
}
