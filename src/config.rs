use crate::cli::Cli;
use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

/// Application configuration derived from CLI arguments
#[derive(Debug, Clone)]
pub struct Config {
    pub root: PathBuf,
    pub paths: Vec<String>,
    pub output: PathBuf,
    pub interactive: bool,
    pub verbose: u8,
}

impl Config {
    /// Parse CLI arguments into a Config
    pub fn from_cli() -> Result<Self> {
        Ok(Self::from(Cli::parse()))
    }

    /// Paths that seed the selection. With none given, a non-interactive run
    /// takes the whole root and an interactive one starts empty.
    pub fn seed_paths(&self) -> Vec<String> {
        if self.paths.is_empty() && !self.interactive {
            vec![".".to_string()]
        } else {
            self.paths.clone()
        }
    }

    /// Default tracing filter directive for the requested verbosity.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        Config {
            root: cli.root,
            paths: cli.paths,
            output: cli.output,
            interactive: cli.interactive,
            verbose: cli.verbose,
        }
    }
}
