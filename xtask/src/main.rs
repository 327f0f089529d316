//! Project automation tasks.
//!
//! Run with `cargo run -p xtask -- <task>`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_mangen::Man;

use stories::cli::Cli;

#[derive(Parser)]
#[command(name = "xtask")]
struct Xtask {
    #[command(subcommand)]
    task: Task,
}

#[derive(Subcommand)]
enum Task {
    /// Generate man pages for stories and its subcommands
    Man {
        /// Output directory
        #[arg(long, default_value = "target/man")]
        out: PathBuf,
    },
}

fn main() -> Result<()> {
    match Xtask::parse().task {
        Task::Man { out } => generate_man_pages(&out),
    }
}

fn generate_man_pages(out: &Path) -> Result<()> {
    fs::create_dir_all(out).with_context(|| format!("Failed to create {}", out.display()))?;

    let command = Cli::command();
    write_page(out, "stories", command.clone())?;
    for sub in command.get_subcommands() {
        let name = format!("stories-{}", sub.get_name());
        write_page(out, &name, sub.clone())?;
    }
    println!("Man pages written to {}", out.display());
    Ok(())
}

fn write_page(out: &Path, name: &str, command: clap::Command) -> Result<()> {
    let mut buffer = Vec::new();
    Man::new(command).render(&mut buffer)?;
    let path = out.join(format!("{name}.1"));
    fs::write(&path, buffer).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}
