//! Aggregation pipeline: fetch the primary entity, then all of its films in parallel.
//!
//! Each run owns a fresh [`Character`] record and hands it back in a
//! [`RunReport`]; nothing is shared between runs, so running twice yields
//! the same titles rather than appending to an earlier list. Every failure
//! is logged and recorded in the report; none of them short-circuits the run.

mod error;
mod join;
mod record;

pub use error::{FilmFailure, PipelineError};
pub use join::{join_fail_fast, join_settle_all};
pub use record::{Character, Film, PrimaryEntity};

use std::time::Duration;

use crate::config::{FilmPolicy, HoloConfig};
use crate::fetch::{self, FetchOptions};

/// Inputs of one pipeline run.
#[derive(Debug, Clone)]
pub struct RunSettings {
    pub api_root: String,
    pub collection: String,
    pub id: u32,
    pub policy: FilmPolicy,
    pub placeholder: String,
    pub fetch: FetchOptions,
}

impl RunSettings {
    pub fn from_config(cfg: &HoloConfig) -> Self {
        Self {
            api_root: cfg.api_root.clone(),
            collection: cfg.selected_collection.clone(),
            id: cfg.character_id,
            policy: cfg.film_policy,
            placeholder: cfg.placeholder.clone(),
            fetch: FetchOptions {
                timeout: cfg.request_timeout_secs.map(Duration::from_secs),
                user_agent: cfg.user_agent.clone(),
            },
        }
    }
}

/// Outcome of one run: the record as it stood when the fetch phase settled,
/// plus everything that went wrong along the way.
#[derive(Debug, Default)]
pub struct RunReport {
    pub record: Character,
    pub errors: Vec<PipelineError>,
}

impl RunReport {
    pub fn primary_failed(&self) -> bool {
        self.errors
            .iter()
            .any(|e| matches!(e, PipelineError::Primary(_)))
    }

    pub fn is_complete(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Runs the pipeline once for `settings`.
pub async fn handle_request(settings: &RunSettings) -> RunReport {
    let mut report = RunReport::default();

    tracing::info!(
        collection = %settings.collection,
        id = settings.id,
        "fetching primary entity"
    );
    let primary = match fetch::get_one::<PrimaryEntity>(
        settings.id,
        &settings.collection,
        &settings.api_root,
        &settings.fetch,
    )
    .await
    {
        Ok(env) => env.into_data(),
        Err(e) => {
            tracing::error!("primary entity fetch failed: {}", e);
            report.errors.push(PipelineError::Primary(e));
            return report;
        }
    };

    // Name is set before the films are requested.
    report.record.name = primary.name;
    let references = primary.films;
    tracing::debug!(
        name = %report.record.name,
        films = references.len(),
        "primary entity loaded"
    );

    match settings.policy {
        FilmPolicy::FailFast => {
            match join_fail_fast(&settings.api_root, &references, &settings.fetch).await {
                Ok(films) => report
                    .record
                    .film_titles
                    .extend(films.into_iter().map(|f| f.title)),
                Err(failure) => {
                    tracing::warn!("film aggregation aborted: {}", failure);
                    report.errors.push(PipelineError::FilmsAborted(failure));
                }
            }
        }
        FilmPolicy::SettleAll => {
            for outcome in join_settle_all(&settings.api_root, &references, &settings.fetch).await {
                match outcome {
                    Ok(film) => report.record.film_titles.push(film.title),
                    Err(failure) => {
                        tracing::warn!("film skipped: {}", failure);
                        report.errors.push(PipelineError::FilmSkipped(failure));
                    }
                }
            }
        }
    }

    tracing::info!(
        name = %report.record.name,
        titles = report.record.film_titles.len(),
        references = references.len(),
        errors = report.errors.len(),
        "pipeline settled"
    );
    report
}
