use clap::{ArgAction, Parser, ValueEnum};

use crate::core::assemble::NumberingMode;
use crate::core::format::{NameStyle, SequenceStyle};

/// Shared application context for global flags
#[derive(Clone, Debug)]
pub struct AppContext {
    pub quiet: bool,    // global --quiet
    pub no_color: bool, // global --no-color
    pub verbose: bool,  // global --verbose
}

#[derive(Parser)]
#[command(name = "nanodoc")]
#[command(
    about = "A minimalist document bundler that concatenates text files with headers, line numbers, and a table of contents"
)]
#[command(version, long_about = None)]
pub struct Cli {
    /// Files, directories, or bundle manifests to concatenate
    pub sources: Vec<String>,

    /// Add line numbers (-n per-file, -nn global)
    #[arg(short = 'n', action = ArgAction::Count)]
    pub number: u8,

    /// Prepend a table of contents
    #[arg(long)]
    pub toc: bool,

    /// Suppress per-file headers
    #[arg(long)]
    pub no_header: bool,

    /// Header sequence numbering style
    #[arg(long, value_enum)]
    pub sequence: Option<SequenceStyle>,

    /// Header naming style (default: nice, or the configured value)
    #[arg(long, value_enum)]
    pub style: Option<NameStyle>,

    /// Generate shell completions to stdout and exit
    #[arg(long, value_enum, value_name = "SHELL")]
    pub completions: Option<Shell>,

    /// Enable debug logging to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress warnings and non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

impl Cli {
    /// `-n` counts upgrade the mode: none, per-file, global.
    pub fn numbering_mode(&self) -> NumberingMode {
        match self.number {
            0 => NumberingMode::None,
            1 => NumberingMode::PerFile,
            _ => NumberingMode::Global,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}
