//! `cspend config` – show config path and effective values.

use anyhow::{Context, Result};
use cspend_core::config;

pub fn run_config() -> Result<()> {
    let path = config::config_path()?;
    let mut effective = config::load_or_init_at(&path)?;
    effective.retry = Some(effective.retry.unwrap_or_default());
    println!("# {}", path.display());
    print!(
        "{}",
        toml::to_string_pretty(&effective).context("serialize config")?
    );
    Ok(())
}
