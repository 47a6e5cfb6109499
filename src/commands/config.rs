//! Handlers for the `config` and `init` commands.

use anyhow::{Context, Result};
use colored::*;
use std::path::Path;

use clarion_fence_lib::config::{Config, create_default_config};
use clarion_fence_lib::exit_codes::SUCCESS;

/// Print the effective configuration as TOML.
pub fn handle_config(config: &Config) -> Result<i32> {
    let rendered = toml::to_string_pretty(config).context("Failed to render configuration")?;
    print!("{rendered}");
    Ok(SUCCESS)
}

/// Write a default configuration file, refusing to overwrite.
pub fn handle_init(path: &Path) -> Result<i32> {
    create_default_config(path)?;
    println!("{} {}", "Created".green().bold(), path.display());
    Ok(SUCCESS)
}
