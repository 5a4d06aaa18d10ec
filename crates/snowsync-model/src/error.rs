use thiserror::Error;

/// Failures while turning report text into a validated record.
///
/// The model backend is the highest-latency, highest-failure-probability step
/// of the pipeline; every variant here is confined to the current item.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("model API returned status {status}: {body}")]
    Api { status: u16, body: String },

    #[error("model response contained no completion content")]
    MissingContent,

    #[error("model output is not the expected JSON shape: {source}")]
    MalformedJson {
        #[source]
        source: serde_json::Error,
    },

    #[error("model output violates the report schema: {reason}")]
    Schema { reason: String },
}
