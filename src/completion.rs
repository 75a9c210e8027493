//! Shell completion generation using clap_complete.

use std::io;

use anyhow::Result;
use clap::{Command, CommandFactory};
use clap_complete::{Shell as CompletionShell, generate};

use crate::cli::{Cli, Shell};

impl From<Shell> for CompletionShell {
    fn from(shell: Shell) -> Self {
        match shell {
            Shell::Bash => CompletionShell::Bash,
            Shell::Zsh => CompletionShell::Zsh,
            Shell::Fish => CompletionShell::Fish,
            Shell::PowerShell => CompletionShell::PowerShell,
            Shell::Elvish => CompletionShell::Elvish,
        }
    }
}

/// Write the completion script for `shell` to stdout.
pub fn run(shell: Shell) -> Result<()> {
    let mut cmd: Command = Cli::command();
    generate(CompletionShell::from(shell), &mut cmd, "nanodoc", &mut io::stdout());
    Ok(())
}
