use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use snowsync_core::ResortRecord;

use crate::error::ParseError;
use crate::prompt::{build_user_prompt, SYSTEM_PROMPT};
use crate::response::validate_report;

/// Characters of an error body kept in [`ParseError::Api`] messages.
const MAX_ERROR_BODY_CHARS: usize = 200;

/// Client for an OpenAI-compatible chat completions backend.
///
/// Sends one request per report: the fixed schema instruction plus the
/// report text, with `response_format: json_object` and temperature 0 so
/// identical input text yields as deterministic a record as the backend
/// allows. The response is fully re-validated before a record is produced.
pub struct ModelClient {
    client: Client,
    url: String,
    api_key: String,
    model_id: String,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    response_format: ResponseFormat<'a>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ResponseFormat<'a> {
    #[serde(rename = "type")]
    kind: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

impl ModelClient {
    /// Creates a `ModelClient` for the given backend and model identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        base_url: &str,
        api_key: &str,
        model_id: &str,
        timeout_secs: u64,
    ) -> Result<Self, ParseError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            client,
            url: format!("{}/chat/completions", base_url.trim_end_matches('/')),
            api_key: api_key.to_owned(),
            model_id: model_id.to_owned(),
        })
    }

    /// Turns isolated report text into a validated [`ResortRecord`].
    ///
    /// `resort_name` is the configured target name and becomes the record
    /// key regardless of what the model reports.
    ///
    /// # Errors
    ///
    /// - [`ParseError::Http`] — network failure or request timeout.
    /// - [`ParseError::Api`] — non-2xx status from the backend.
    /// - [`ParseError::MissingContent`] — response held no completion content.
    /// - [`ParseError::MalformedJson`] / [`ParseError::Schema`] — content
    ///   failed validation; no partial record is produced.
    pub async fn parse_report(
        &self,
        resort_name: &str,
        report_text: &str,
    ) -> Result<ResortRecord, ParseError> {
        let user_prompt = build_user_prompt(report_text);
        let request = ChatRequest {
            model: &self.model_id,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: &user_prompt,
                },
            ],
            temperature: 0.0,
            response_format: ResponseFormat {
                kind: "json_object",
            },
        };

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ParseError::Api {
                status: status.as_u16(),
                body: truncate(&body, MAX_ERROR_BODY_CHARS),
            });
        }

        let completion: ChatResponse = response.json().await?;
        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|c| !c.trim().is_empty())
            .ok_or(ParseError::MissingContent)?;

        tracing::debug!(resort = %resort_name, chars = content.len(), "model returned completion");

        validate_report(resort_name, &content)
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_owned()
    } else {
        let prefix: String = s.chars().take(max_chars).collect();
        format!("{prefix}…")
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
