//! `holo show` – run the character view once and print the page.

use anyhow::{Context, Result};
use clap::Args;
use holo_core::bootstrap;
use holo_core::config::{FilmPolicy, HoloConfig};
use holo_core::pipeline::RunSettings;
use std::io::Write;

#[derive(Debug, Clone, Default, Args)]
pub struct ShowArgs {
    /// Id of the entity to show (default from config, normally 1).
    #[arg(long, value_name = "N")]
    pub id: Option<u32>,

    /// Collection to read the entity from (default "people").
    #[arg(long, value_name = "NAME")]
    pub collection: Option<String>,

    /// Root URL of the API.
    #[arg(long, value_name = "URL")]
    pub api_root: Option<String>,

    /// Keep the titles that loaded when some film requests fail.
    #[arg(long)]
    pub settle_all: bool,

    /// Request timeout in seconds.
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Print the page as JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

impl ShowArgs {
    /// Applies command-line overrides on top of the loaded config.
    pub fn apply(&self, mut cfg: HoloConfig) -> HoloConfig {
        if let Some(id) = self.id {
            cfg.character_id = id;
        }
        if let Some(collection) = &self.collection {
            cfg.selected_collection = collection.clone();
        }
        if let Some(root) = &self.api_root {
            cfg.api_root = root.clone();
        }
        if self.settle_all {
            cfg.film_policy = FilmPolicy::SettleAll;
        }
        if let Some(secs) = self.timeout {
            cfg.request_timeout_secs = Some(secs);
        }
        cfg
    }
}

pub async fn run_show(cfg: HoloConfig, args: &ShowArgs) -> Result<()> {
    let cfg = args.apply(cfg);
    let settings = RunSettings::from_config(&cfg);
    let session = bootstrap::init(&settings).await?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if args.json {
        writeln!(out, "{}", session.page.to_json()?)?;
    } else {
        session.page.write_text(&mut out)?;
    }
    out.flush().context("flush stdout")?;

    for err in &session.report.errors {
        eprintln!("warning: {}", err);
    }
    if session.report.primary_failed() {
        anyhow::bail!(
            "could not load {} #{} from {}",
            settings.collection,
            settings.id,
            settings.api_root
        );
    }
    Ok(())
}
