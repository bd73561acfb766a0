//! typeline binary entry point
//!
//! Parses the CLI and dispatches to the command handlers. Logging goes
//! to stderr, filtered by the `TYPELINE_LOG` environment variable
//! (default `warn`), so it never mixes into an animation on stdout.

mod commands;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use typeline::cli::{Cli, Commands, ConfigAction};

fn init_logging() {
    let filter =
        EnvFilter::try_from_env("TYPELINE_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(not(tarpaulin_include))]
fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse();
    match cli.command {
        Commands::Play {
            file,
            playback,
            plain,
        } => commands::play::handle_play(&file, &playback, plain),
        Commands::Demo { playback, plain } => commands::demo::handle_demo(&playback, plain),
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::handle_show(),
            ConfigAction::Edit => commands::config::handle_edit(),
            ConfigAction::Path => commands::config::handle_path(),
        },
        Commands::Completions { shell } => commands::completions::handle_completions(shell),
    }
}
