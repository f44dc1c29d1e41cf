//! `holo config` – print the effective configuration as TOML.

use anyhow::Result;
use holo_core::config::{self, HoloConfig};
use std::path::Path;

pub fn run_config(cfg: &HoloConfig, explicit: Option<&Path>) -> Result<()> {
    let path = match explicit {
        Some(p) => p.to_path_buf(),
        None => config::config_path()?,
    };
    println!("# {}", path.display());
    print!("{}", toml::to_string_pretty(cfg)?);
    Ok(())
}
