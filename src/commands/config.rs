//! Config subcommands handler

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};

use stories::Config;

use super::load_config;

fn config_file(path: Option<&Path>) -> Result<PathBuf> {
    match path {
        Some(path) => Ok(path.to_path_buf()),
        None => Ok(Config::config_path()?),
    }
}

/// Show the effective configuration as TOML.
pub fn handle_show(path: Option<&Path>) -> Result<()> {
    let config = load_config(path)?;
    print!("{}", config.to_toml()?);
    Ok(())
}

/// Print where the config file lives.
pub fn handle_path(path: Option<&Path>) -> Result<()> {
    println!("{}", config_file(path)?.display());
    Ok(())
}

/// Write a default config file.
pub fn handle_init(path: Option<&Path>, force: bool) -> Result<()> {
    let target = config_file(path)?;
    if target.exists() && !force {
        bail!(
            "Config file {} already exists (use --force to overwrite)",
            target.display()
        );
    }
    Config::default().save_to(&target)?;
    println!("Wrote default config to {}", target.display());
    Ok(())
}
