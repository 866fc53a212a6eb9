//! Google Gemini client for text generation.
//!
//! Calls the Generative Language REST API (`models/{model}:generateContent`)
//! and returns the concatenated text parts of the first candidate.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use super::TextGenerator;
use crate::config::GeminiConfig;

/// Gemini text-generation client.
#[derive(Clone)]
pub struct GeminiClient {
    api_key: String,
    model: String,
    base_url: String,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

impl GeminiClient {
    /// Create a new client with the given key, model, base URL and timeout.
    pub fn new(api_key: &str, model: &str, base_url: &str, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();

        Self {
            api_key: api_key.to_string(),
            model: model.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Create a client from configuration.
    pub fn from_config(config: &GeminiConfig) -> Self {
        Self::new(
            &config.api_key,
            &config.model,
            &config.base_url,
            Duration::from_secs(config.timeout_secs),
        )
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    fn provider(&self) -> &str {
        "gemini"
    }

    fn model_name(&self) -> &str {
        &self.model
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        let request = GenerateRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        debug!(model = %self.model, prompt_len = prompt.len(), "Calling Gemini API");
        let response = self
            .client
            .post(format!("{}/models/{}:generateContent", self.base_url, self.model))
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .context("Failed to call Gemini API")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Gemini API error (HTTP {}): {}", status, body);
        }

        let body: GenerateResponse = response
            .json()
            .await
            .context("Failed to parse Gemini API response")?;

        if let Some(reason) = body.prompt_feedback.and_then(|f| f.block_reason) {
            anyhow::bail!("Gemini blocked the prompt: {}", reason);
        }

        let candidate = body
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| anyhow::anyhow!("No candidates in Gemini API response"))?;

        let text: String = candidate
            .content
            .map(|c| c.parts)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|p| p.text)
            .collect();

        // Truncated or recited candidates come back without any text part.
        if text.is_empty() {
            anyhow::bail!(
                "Gemini returned no text (finish reason: {})",
                candidate.finish_reason.as_deref().unwrap_or("unknown")
            );
        }

        debug!(response_len = text.len(), "Gemini generation complete");
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::test_support::spawn_server;
    use axum::{extract::Path, http::HeaderMap, http::StatusCode, routing::post, Json, Router};
    use serde_json::{json, Value};

    async fn fake_generate(
        Path(call): Path<String>,
        headers: HeaderMap,
        Json(body): Json<Value>,
    ) -> (StatusCode, Json<Value>) {
        if headers.get("x-goog-api-key").and_then(|v| v.to_str().ok()) != Some("test-key") {
            return (StatusCode::FORBIDDEN, Json(json!({"error": {"message": "API key not valid"}})));
        }
        if call != "gemini-1.5-flash:generateContent" {
            return (StatusCode::NOT_FOUND, Json(json!({})));
        }
        let prompt = body["contents"][0]["parts"][0]["text"].as_str().unwrap_or_default();
        if prompt.contains("blocked") {
            return (StatusCode::OK, Json(json!({"promptFeedback": {"blockReason": "SAFETY"}})));
        }
        if prompt.contains("truncated") {
            return (
                StatusCode::OK,
                Json(json!({"candidates": [{"content": {"role": "model"}, "finishReason": "MAX_TOKENS"}]})),
            );
        }
        (
            StatusCode::OK,
            Json(json!({
                "candidates": [{
                    "content": {"role": "model", "parts": [{"text": "VERDICT: TRUE\n"}, {"text": "CONFIDENCE: 90%"}]}
                }]
            })),
        )
    }

    async fn client(key: &str) -> GeminiClient {
        let base = spawn_server(Router::new().route("/models/{call}", post(fake_generate))).await;
        GeminiClient::new(key, "gemini-1.5-flash", &base, Duration::from_secs(5))
    }

    #[tokio::test]
    async fn test_generate_joins_parts() {
        let client = client("test-key").await;
        let text = client.generate("Is the sky blue?").await.unwrap();
        assert_eq!(text, "VERDICT: TRUE\nCONFIDENCE: 90%");
    }

    #[tokio::test]
    async fn test_generate_rejected_key() {
        let client = client("wrong").await;
        let err = client.generate("Is the sky blue?").await.unwrap_err();
        assert!(err.to_string().contains("403"));
    }

    #[tokio::test]
    async fn test_generate_blocked_prompt() {
        let client = client("test-key").await;
        let err = client.generate("this is blocked").await.unwrap_err();
        assert!(err.to_string().contains("SAFETY"));
    }

    #[tokio::test]
    async fn test_generate_without_text_parts() {
        let client = client("test-key").await;
        let err = client.generate("this reply is truncated").await.unwrap_err();
        assert!(err.to_string().contains("no text"));
        assert!(err.to_string().contains("MAX_TOKENS"));
    }

    #[tokio::test]
    async fn test_generate_unreachable() {
        let client = GeminiClient::new("k", "m", "http://127.0.0.1:9", Duration::from_secs(2));
        assert!(client.generate("x").await.is_err());
    }
}
