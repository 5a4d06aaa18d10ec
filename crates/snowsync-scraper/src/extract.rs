//! Report-container isolation.
//!
//! Reduces a rendered resort page to the minimal text block holding the
//! operational report, discarding navigation and boilerplate. The container
//! is located by structural markers (class-name prefixes that survive
//! CSS-module hash churn) rather than full-text search.

use scraper::{Html, Selector};

use crate::error::ExtractError;
use crate::types::{RawPage, ReportText};

/// Candidate selectors for the report container, tried in order.
///
/// The site emits CSS-module class names like `skireport_reportContent__Gmrl5`
/// whose hash suffix changes between deploys; matching on the stable prefix
/// keeps extraction working across releases.
const REPORT_SELECTORS: &[&str] = &[
    "div[class*='skireport_reportContent']",
    "div[class*='reportContent']",
];

/// Isolates the snow-report text from a fetched page.
///
/// All markup is stripped and whitespace collapsed to single spaces; numeric
/// tokens and their labels are preserved verbatim since the model-backed
/// extraction step depends on exact wording.
///
/// # Errors
///
/// - [`ExtractError::ReportContainerMissing`] — no candidate selector matched
///   (site structure changed, or the page is an error/placeholder).
/// - [`ExtractError::EmptyReport`] — the container matched but held no text.
pub fn extract_report(page: &RawPage) -> Result<ReportText, ExtractError> {
    let document = Html::parse_document(&page.html);

    for raw_selector in REPORT_SELECTORS {
        let selector = Selector::parse(raw_selector).expect("valid report selector");
        if let Some(container) = document.select(&selector).next() {
            let text = collapse_whitespace(container.text());
            if text.is_empty() {
                return Err(ExtractError::EmptyReport);
            }
            tracing::debug!(
                url = %page.url,
                selector = raw_selector,
                chars = text.len(),
                "isolated report container"
            );
            return Ok(ReportText { text });
        }
    }

    Err(ExtractError::ReportContainerMissing)
}

/// Joins text fragments with single spaces, collapsing all runs of whitespace.
fn collapse_whitespace<'a>(fragments: impl Iterator<Item = &'a str>) -> String {
    fragments
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
#[path = "extract_test.rs"]
mod tests;
