//! CLI for holo.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use holo_core::config::{self, HoloConfig};
use std::path::{Path, PathBuf};

use commands::{run_completions, run_config, run_show, ShowArgs};

/// Top-level CLI for holo.
#[derive(Debug, Parser)]
#[command(name = "holo")]
#[command(about = "holo: show a Star Wars character and the films they appear in", long_about = None)]
pub struct Cli {
    /// Read configuration from this file instead of ~/.config/holo/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Fetch the character and its films, then print the rendered page.
    Show(ShowArgs),

    /// Print the effective configuration.
    Config,

    /// Print shell completions.
    Completions {
        /// Target shell.
        shell: Shell,
    },
}

fn load_config(path: Option<&Path>) -> Result<HoloConfig> {
    match path {
        Some(p) => config::load_from(p),
        None => config::load_or_init(),
    }
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        match cli.command {
            CliCommand::Completions { shell } => run_completions(shell),
            CliCommand::Show(args) => {
                let cfg = load_config(cli.config.as_deref())?;
                tracing::debug!("loaded config: {:?}", cfg);
                run_show(cfg, &args).await?;
            }
            CliCommand::Config => {
                let cfg = load_config(cli.config.as_deref())?;
                run_config(&cfg, cli.config.as_deref())?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
