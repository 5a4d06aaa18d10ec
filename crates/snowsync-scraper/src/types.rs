use chrono::{DateTime, Utc};

/// A fetched, fully-rendered page. Lives only until extraction.
#[derive(Debug, Clone)]
pub struct RawPage {
    pub url: String,
    pub html: String,
    pub fetched_at: DateTime<Utc>,
}

/// The minimal report text handed to the model backend.
///
/// Markup-free, whitespace-collapsed; numeric tokens and their labels are
/// preserved verbatim because the extraction step depends on exact wording.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportText {
    pub text: String,
}
