use thiserror::Error;

use crate::fetch::FetchError;

/// One film reference that could not be loaded.
#[derive(Debug, Error)]
#[error("film {reference}: {source}")]
pub struct FilmFailure {
    /// Reference as it appeared in the primary payload.
    pub reference: String,
    #[source]
    pub source: FetchError,
}

/// Errors recorded during a pipeline run. None of them stop the render step.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Primary entity could not be fetched or decoded; nothing else ran.
    #[error("primary entity: {0}")]
    Primary(#[source] FetchError),
    /// Fail-fast join: this failure discarded every film title.
    #[error("film aggregation aborted: {0}")]
    FilmsAborted(#[source] FilmFailure),
    /// Settle-all join: this film was left out, the others were kept.
    #[error("film skipped: {0}")]
    FilmSkipped(#[source] FilmFailure),
}
