//! HTTP Content Generator
//!
//! Content generator backed by an HTTP endpoint. The request body is
//! `{"topic": "...", "tone": "..."}`; the response is either the slide array
//! as JSON, or text holding that array (optionally inside a code fence).
//!
//! The client sets no request deadline of its own. How long a generation may
//! take is decided by the manager's `generation_timeout`; unset means no limit.

use anyhow::Context;
use async_trait::async_trait;

use carousel_core::{decode_payload, ContentGenerator, GenerationError, GenerationRequest};

/// Endpoint used when none is configured
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000/carousel";

/// Content generator talking to an HTTP endpoint
#[derive(Clone)]
pub struct HttpGenerator {
    /// Full URL requests are POSTed to
    endpoint: String,
    /// HTTP client
    http_client: reqwest::Client,
}

impl HttpGenerator {
    /// Create a generator for `endpoint`
    pub fn new(endpoint: impl Into<String>) -> anyhow::Result<Self> {
        let http_client = reqwest::Client::builder()
            .build()
            .context("Failed to create HTTP client")?;
        Ok(Self::with_client(endpoint, http_client))
    }

    /// Create a generator using a preconfigured client
    pub fn with_client(endpoint: impl Into<String>, http_client: reqwest::Client) -> Self {
        Self {
            endpoint: endpoint.into(),
            http_client,
        }
    }

    /// Endpoint requests go to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ContentGenerator for HttpGenerator {
    fn name(&self) -> &str {
        "HTTP"
    }

    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<serde_json::Value, GenerationError> {
        let body = serde_json::json!({
            "topic": request.topic(),
            "tone": request.tone(),
        });

        tracing::debug!(endpoint = %self.endpoint, "Requesting slides");

        let response = self
            .http_client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| GenerationError::Transport(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| GenerationError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(GenerationError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        decode_response(&text)
    }
}

/// Decode a response body into the raw slide payload
///
/// A body that is a JSON string is decoded once more; some services return
/// the model's text reply verbatim.
fn decode_response(text: &str) -> Result<serde_json::Value, GenerationError> {
    match decode_payload(text)? {
        serde_json::Value::String(inner) => decode_payload(&inner),
        value => Ok(value),
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_decode_plain_json() {
        let value = decode_response(r#"[{"title":"A","content":"a"}]"#).unwrap();
        assert_eq!(value, json!([{"title": "A", "content": "a"}]));
    }

    #[test]
    fn test_decode_fenced_text() {
        let value = decode_response("```json\n[{\"title\":\"A\"}]\n```").unwrap();
        assert_eq!(value, json!([{"title": "A"}]));
    }

    #[test]
    fn test_decode_json_string_wrapper() {
        let body = serde_json::to_string("```json\n[{\"title\":\"A\"}]\n```").unwrap();
        let value = decode_response(&body).unwrap();
        assert_eq!(value, json!([{"title": "A"}]));
    }

    #[test]
    fn test_decode_garbage_is_format_error() {
        assert!(matches!(
            decode_response("Sorry, I can't help with that."),
            Err(GenerationError::Format(_))
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_endpoint_is_not_cut_off_by_client() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        // Accept and never answer.
        let server = tokio::spawn(async move {
            let (_stream, _) = listener.accept().await.unwrap();
            std::future::pending::<()>().await;
        });

        let client = reqwest::Client::builder().no_proxy().build().unwrap();
        let generator = HttpGenerator::with_client(format!("http://{addr}/carousel"), client);
        let request = GenerationRequest::new("habits", carousel_core::Tone::Expert).unwrap();

        // Ten minutes of (paused) time pass without the client giving up.
        let outcome =
            tokio::time::timeout(Duration::from_secs(600), generator.generate(&request)).await;
        assert!(outcome.is_err(), "client returned early: {outcome:?}");

        server.abort();
    }

    #[test]
    fn test_new_keeps_endpoint() {
        let generator = HttpGenerator::new(DEFAULT_ENDPOINT).unwrap();
        assert_eq!(generator.endpoint(), DEFAULT_ENDPOINT);
        assert_eq!(generator.name(), "HTTP");
    }
}
