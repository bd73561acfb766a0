//! Build tasks for the typeline workspace.
//!
//! Run with `cargo run -p xtask -- <task>`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "xtask", about = "Workspace build tasks")]
struct Xtask {
    #[command(subcommand)]
    task: Task,
}

#[derive(Subcommand)]
enum Task {
    /// Generate man pages for typeline and its subcommands
    Man {
        /// Output directory
        #[arg(long, default_value = "target/man")]
        out_dir: PathBuf,
    },
}

fn main() -> Result<()> {
    match Xtask::parse().task {
        Task::Man { out_dir } => generate_man_pages(&out_dir),
    }
}

/// Render one man page per command: typeline.1, typeline-play.1, ...
fn generate_man_pages(out_dir: &Path) -> Result<()> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create {}", out_dir.display()))?;

    let cmd = typeline::cli::Cli::command();
    write_man_page(out_dir, cmd.clone(), "typeline")?;

    for sub in cmd.get_subcommands() {
        if sub.get_name() == "help" {
            continue;
        }
        // Rename the subcommand so the page title matches its file name.
        let name = format!("typeline-{}", sub.get_name());
        write_man_page(out_dir, sub.clone().name(name.clone()), &name)?;
    }

    println!("Man pages written to {}", out_dir.display());
    Ok(())
}

fn write_man_page(out_dir: &Path, cmd: clap::Command, name: &str) -> Result<()> {
    let man = clap_mangen::Man::new(cmd);
    let mut buffer = Vec::new();
    man.render(&mut buffer)
        .with_context(|| format!("Failed to render man page for {}", name))?;

    let path = out_dir.join(format!("{}.1", name));
    fs::write(&path, buffer).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}
