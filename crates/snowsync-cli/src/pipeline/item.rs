//! The per-resort stage chain: fetch → extract → parse → replace.
//!
//! Each stage's error is wrapped into [`StageError`] and short-circuits the
//! chain for this resort only; siblings in the same batch are unaffected.

use snowsync_core::ResortTarget;
use snowsync_db::DbError;
use snowsync_model::{ModelClient, ParseError};
use snowsync_scraper::{extract_report, ExtractError, FetchError, RenderClient};

/// A failure at one stage of a single resort's pipeline.
#[derive(Debug)]
pub(crate) enum StageError {
    Fetch(FetchError),
    Extract(ExtractError),
    Parse(ParseError),
    Store(DbError),
}

impl StageError {
    /// Short stage label for summaries and structured logs.
    pub(crate) fn kind(&self) -> &'static str {
        match self {
            StageError::Fetch(_) => "fetch",
            StageError::Extract(_) => "extract",
            StageError::Parse(_) => "parse",
            StageError::Store(_) => "store",
        }
    }

    /// Returns `true` when the store itself is unreachable, as opposed to a
    /// failure confined to one row or one page.
    pub(crate) fn is_store_outage(&self) -> bool {
        matches!(self, StageError::Store(e) if e.is_unreachable())
    }
}

impl std::fmt::Display for StageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StageError::Fetch(e) => write!(f, "{e}"),
            StageError::Extract(e) => write!(f, "{e}"),
            StageError::Parse(e) => write!(f, "{e}"),
            StageError::Store(e) => write!(f, "{e}"),
        }
    }
}

/// Runs the full stage chain for one resort and stores the result.
///
/// The fetched page lives only until extraction and the report text only
/// until the model call returns; neither is retained afterwards.
pub(crate) async fn process_target(
    pool: &sqlx::PgPool,
    render: &RenderClient,
    model: &ModelClient,
    target: &ResortTarget,
) -> Result<(), StageError> {
    let page = render
        .fetch_page(&target.url)
        .await
        .map_err(StageError::Fetch)?;

    let report = extract_report(&page).map_err(StageError::Extract)?;
    drop(page);

    let record = model
        .parse_report(&target.name, &report.text)
        .await
        .map_err(StageError::Parse)?;

    snowsync_db::replace_report(pool, &record)
        .await
        .map_err(StageError::Store)?;

    tracing::info!(resort = %target.name, "stored refreshed report");
    Ok(())
}
