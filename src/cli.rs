use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "file-combiner")]
#[command(
    about = "Combine selected files beneath a root directory into one text file with a \
             directory tree, a table of contents and delimited file contents."
)]
pub struct Cli {
    /// Root directory; every selected file must live beneath it.
    pub root: PathBuf,

    /// Files, directories or glob patterns to select, relative to ROOT.
    /// Defaults to the whole root when not interactive.
    pub paths: Vec<String>,

    /// Where to write the combined file.
    #[arg(short = 'o', long = "output")]
    pub output: PathBuf,

    /// Open the terminal selector, seeded with PATHS.
    #[arg(short = 'i', long = "interactive")]
    pub interactive: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,
}
