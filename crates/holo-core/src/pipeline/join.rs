//! Parallel film fetches.
//!
//! Every reference is spawned into one `JoinSet` before anything is awaited.
//! Results are slotted back by index so titles keep payload order no matter
//! which transfer finishes first. A task that panics or is cancelled counts
//! as a failed film, never as a missing one.

use std::collections::HashMap;
use std::future::Future;

use tokio::task::{AbortHandle, Id, JoinSet};

use crate::fetch::{self, FetchError, FetchOptions};

use super::error::FilmFailure;
use super::record::Film;

type FilmResult = Result<Film, FilmFailure>;

async fn fetch_film(api_root: &str, reference: &str, opts: &FetchOptions) -> FilmResult {
    let fail = |source| FilmFailure {
        reference: reference.to_string(),
        source,
    };
    let url = fetch::resolve_reference(api_root, reference).map_err(fail)?;
    let env = fetch::fetch_data::<Film>(url.as_str(), opts)
        .await
        .map_err(fail)?;
    Ok(env.into_data())
}

/// In-flight film tasks, with the reference index each task id belongs to.
struct FilmTasks {
    join_set: JoinSet<FilmResult>,
    index_of: HashMap<Id, usize>,
    references: Vec<String>,
}

impl FilmTasks {
    fn new(references: &[String]) -> Self {
        Self {
            join_set: JoinSet::new(),
            index_of: HashMap::with_capacity(references.len()),
            references: references.to_vec(),
        }
    }

    fn spawn<F>(&mut self, index: usize, task: F) -> AbortHandle
    where
        F: Future<Output = FilmResult> + Send + 'static,
    {
        let handle = self.join_set.spawn(task);
        self.index_of.insert(handle.id(), index);
        handle
    }

    fn failure(&self, index: usize, source: FetchError) -> FilmFailure {
        FilmFailure {
            reference: self.references[index].clone(),
            source,
        }
    }

    /// Waits for the next finished task. Join errors come back as that film's failure.
    async fn next(&mut self) -> Option<(usize, FilmResult)> {
        loop {
            let joined = self.join_set.join_next_with_id().await?;
            let id = match &joined {
                Ok((id, _)) => *id,
                Err(e) => e.id(),
            };
            let Some(index) = self.index_of.remove(&id) else {
                tracing::error!("film task {} is not tracked", id);
                continue;
            };
            let result = joined.map(|(_, result)| result).unwrap_or_else(|e| {
                let reference = self.references[index].clone();
                Err(self.failure(index, FetchError::Join { url: reference, source: e }))
            });
            return Some((index, result));
        }
    }

    /// Result for every slot, in reference order. A slot nobody filled is `Lost`.
    fn settle(&self, slots: Vec<Option<FilmResult>>) -> Vec<FilmResult> {
        slots
            .into_iter()
            .enumerate()
            .map(|(index, slot)| {
                slot.unwrap_or_else(|| {
                    let url = self.references[index].clone();
                    Err(self.failure(index, FetchError::Lost { url }))
                })
            })
            .collect()
    }
}

fn spawn_all(api_root: &str, references: &[String], opts: &FetchOptions) -> FilmTasks {
    let mut tasks = FilmTasks::new(references);
    for (index, reference) in references.iter().enumerate() {
        let api_root = api_root.to_string();
        let reference = reference.clone();
        let opts = opts.clone();
        tasks.spawn(index, async move { fetch_film(&api_root, &reference, &opts).await });
    }
    tasks
}

async fn collect_fail_fast(mut tasks: FilmTasks) -> Result<Vec<Film>, FilmFailure> {
    let mut slots: Vec<Option<FilmResult>> = (0..tasks.references.len()).map(|_| None).collect();

    while let Some((index, result)) = tasks.next().await {
        // Returning drops the set, which aborts the tasks still waiting.
        slots[index] = Some(Ok(result?));
    }

    tasks.settle(slots).into_iter().collect()
}

async fn collect_settle_all(mut tasks: FilmTasks) -> Vec<FilmResult> {
    let mut slots: Vec<Option<FilmResult>> = (0..tasks.references.len()).map(|_| None).collect();

    while let Some((index, result)) = tasks.next().await {
        slots[index] = Some(result);
    }

    tasks.settle(slots)
}

/// Fetches all films; the first failure aborts the wait and discards every result.
///
/// Tasks still waiting are aborted when the set drops. Transfers already on the
/// blocking pool run to completion and their results are never read.
pub async fn join_fail_fast(
    api_root: &str,
    references: &[String],
    opts: &FetchOptions,
) -> Result<Vec<Film>, FilmFailure> {
    collect_fail_fast(spawn_all(api_root, references, opts)).await
}

/// Fetches all films and waits for every one; outcomes come back in reference order.
pub async fn join_settle_all(
    api_root: &str,
    references: &[String],
    opts: &FetchOptions,
) -> Vec<FilmResult> {
    collect_settle_all(spawn_all(api_root, references, opts)).await
}
