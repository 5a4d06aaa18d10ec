use thiserror::Error;

/// Failures while obtaining the rendered page for one target URL.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("rate limited by render service (retry after {retry_after_secs}s)")]
    RateLimited { retry_after_secs: u64 },

    #[error("unexpected HTTP status {status} from render service for {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("page {url} returned upstream status {status}")]
    UpstreamStatus { status: u16, url: String },

    #[error("render failed for {url}: {reason}")]
    RenderFailed { url: String, reason: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Failures while isolating the report text from a fetched page.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("report container not found in page markup")]
    ReportContainerMissing,

    #[error("report container matched but held no text")]
    EmptyReport,
}
