use anyhow::Result;
use clap::Parser;
use nanodoc::cli::{AppContext, Cli};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Debug logging to stderr; RUST_LOG overrides the flag
    let filter = if cli.verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Some(shell) = cli.completions {
        return nanodoc::completion::run(shell);
    }

    if cli.sources.is_empty() {
        anyhow::bail!("no source files given; see --help for usage");
    }

    // Build a context once, pass everywhere
    let ctx = AppContext {
        quiet: cli.quiet,
        no_color: cli.no_color,
        verbose: cli.verbose,
    };

    nanodoc::core::assemble::run(&cli, &ctx)
}
