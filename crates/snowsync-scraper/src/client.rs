use std::time::Duration;

use chrono::Utc;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::FetchError;
use crate::rate_limit::retry_with_backoff;
use crate::types::RawPage;

/// HTTP client for the headless-render service.
///
/// Resort report sections are populated client-side, so pages are fetched
/// through a rendering service that executes scripts and returns the final
/// markup. Rate limiting (429) and network failures are retried with
/// exponential backoff; render failures and upstream page errors are typed,
/// non-retriable errors.
pub struct RenderClient {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
    /// Maximum number of retry attempts after the first failure.
    max_retries: u32,
    /// Base delay in seconds for exponential backoff: `backoff_base_secs * 2^attempt`.
    backoff_base_secs: u64,
}

#[derive(Serialize)]
struct RenderRequest<'a> {
    url: &'a str,
}

/// Response envelope from the render service.
///
/// `status_code` is the HTTP status the browser observed for the target page
/// itself; `error` carries the service's reason when `success` is false
/// (render timeout, navigation failure, blocked page).
#[derive(Deserialize)]
struct RenderResponse {
    success: bool,
    html: Option<String>,
    error: Option<String>,
    status_code: Option<u16>,
}

/// Builds the render endpoint from the configured service URL.
///
/// Accepts the service root with or without a trailing slash; the scrape
/// route is always `<root>/render`.
pub(crate) fn render_endpoint(render_url: &str) -> String {
    format!("{}/render", render_url.trim_end_matches('/'))
}

impl RenderClient {
    /// Creates a `RenderClient` with configured timeout, `User-Agent`, and retry policy.
    ///
    /// `max_retries` is the number of additional attempts after the first failure for
    /// retriable errors (429, network errors). Set to `0` to disable retries.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(
        render_url: &str,
        api_key: Option<&str>,
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_secs: u64,
    ) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            endpoint: render_endpoint(render_url),
            api_key: api_key.map(str::to_owned),
            max_retries,
            backoff_base_secs,
        })
    }

    /// Fetches the fully-rendered markup for one page, with automatic retry
    /// on transient errors.
    ///
    /// # Errors
    ///
    /// - [`FetchError::RateLimited`] — HTTP 429 from the service after all retries.
    /// - [`FetchError::UnexpectedStatus`] — any other non-2xx service status (not retried).
    /// - [`FetchError::UpstreamStatus`] — the page itself returned a non-success
    ///   status (maintenance page, 404) as observed by the browser (not retried).
    /// - [`FetchError::RenderFailed`] — the service could not produce final content
    ///   (render timeout, navigation failure) or returned no markup (not retried).
    /// - [`FetchError::Http`] — network or TLS failure after all retries exhausted.
    /// - [`FetchError::Deserialize`] — response body is not the expected JSON shape.
    pub async fn fetch_page(&self, url: &str) -> Result<RawPage, FetchError> {
        let max_retries = self.max_retries;
        let backoff_base_secs = self.backoff_base_secs;

        retry_with_backoff(max_retries, backoff_base_secs, || {
            let url = url.to_owned();
            async move {
                let mut request = self
                    .client
                    .post(&self.endpoint)
                    .json(&RenderRequest { url: &url });
                if let Some(key) = &self.api_key {
                    request = request.bearer_auth(key);
                }

                let response = request.send().await?;
                let status = response.status();

                if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                    let retry_after_secs = response
                        .headers()
                        .get(reqwest::header::RETRY_AFTER)
                        .and_then(|v| v.to_str().ok())
                        .and_then(|s| s.parse::<u64>().ok())
                        .unwrap_or(60);

                    return Err(FetchError::RateLimited { retry_after_secs });
                }

                if !status.is_success() {
                    return Err(FetchError::UnexpectedStatus {
                        status: status.as_u16(),
                        url,
                    });
                }

                let body = response.text().await?;
                let rendered =
                    serde_json::from_str::<RenderResponse>(&body).map_err(|e| {
                        FetchError::Deserialize {
                            context: format!("render response for {url}"),
                            source: e,
                        }
                    })?;

                if let Some(code) = rendered.status_code {
                    if !(200..300).contains(&code) {
                        return Err(FetchError::UpstreamStatus { status: code, url });
                    }
                }

                if !rendered.success {
                    return Err(FetchError::RenderFailed {
                        reason: rendered
                            .error
                            .unwrap_or_else(|| "render service reported failure".to_owned()),
                        url,
                    });
                }

                let html = match rendered.html {
                    Some(html) if !html.trim().is_empty() => html,
                    _ => {
                        return Err(FetchError::RenderFailed {
                            reason: "render service returned no markup".to_owned(),
                            url,
                        })
                    }
                };

                tracing::debug!(url = %url, bytes = html.len(), "fetched rendered page");

                Ok(RawPage {
                    url,
                    html,
                    fetched_at: Utc::now(),
                })
            }
        })
        .await
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
