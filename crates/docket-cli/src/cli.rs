use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Top-level CLI parser for the `docket` binary.
#[derive(Debug, Parser)]
#[command(
    name = "docket",
    version,
    about = "Docket - documentation models from declaration symbols"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Quiet mode (errors only on stderr)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Extra config file, layered above `.docket/config.toml`
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

impl Cli {
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            quiet: self.quiet,
            verbose: self.verbose,
            config: self.config.clone(),
        }
    }
}

/// Global flags available before or after subcommands.
#[derive(Clone, Debug)]
pub struct GlobalFlags {
    pub quiet: bool,
    pub verbose: bool,
    pub config: Option<PathBuf>,
}

#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Print the documentation model of a source file as JSON.
    Parse(ParseArgs),
    /// Print the method documentation enclosing a line, or `null`.
    Locate(LocateArgs),
}

/// Arguments for `docket parse`.
#[derive(Clone, Debug, Args)]
pub struct ParseArgs {
    /// Source file to document.
    pub file: PathBuf,
    /// JSON dump of the file's symbols (tree or flat list).
    #[arg(short, long)]
    pub symbols: Option<PathBuf>,
    /// Single-line JSON instead of pretty-printed.
    #[arg(long)]
    pub compact: bool,
}

/// Arguments for `docket locate`.
#[derive(Clone, Debug, Args)]
pub struct LocateArgs {
    /// Source file to document.
    pub file: PathBuf,
    /// Zero-based line of the cursor.
    #[arg(short, long)]
    pub line: u32,
    /// JSON dump of the file's symbols (tree or flat list).
    #[arg(short, long)]
    pub symbols: Option<PathBuf>,
}
