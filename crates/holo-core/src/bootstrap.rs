//! Startup: resolve the output nodes, run the pipeline once, render once.

use crate::pipeline::{self, RunReport, RunSettings};
use crate::render::{self, Page, PageError};

/// Page after the single render, with the report of the run that filled it.
#[derive(Debug)]
pub struct Session {
    pub page: Page,
    pub report: RunReport,
}

/// Runs the character view against the default page.
pub async fn init(settings: &RunSettings) -> Result<Session, PageError> {
    init_with_page(Page::default(), settings).await
}

/// Runs the character view against `page`, which must contain the
/// `#character` and `#character-details` nodes.
///
/// Node lookup happens before any request is made; a missing node fails
/// without touching the network.
pub async fn init_with_page(mut page: Page, settings: &RunSettings) -> Result<Session, PageError> {
    let report = {
        let (name_node, details_node) = page.character_nodes_mut()?;
        tracing::info!("initializing character view");
        let report = pipeline::handle_request(settings).await;
        render::update(&report.record, name_node, details_node, &settings.placeholder);
        report
    };
    Ok(Session { page, report })
}
