//! Hugging Face Inference API client for zero-shot classification.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use super::{Classification, ZeroShotClassifier};
use crate::config::HuggingFaceConfig;

/// Zero-shot classification client for a hosted NLI model.
#[derive(Clone)]
pub struct HuggingFaceClient {
    api_token: String,
    model_url: String,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct ClassifyRequest<'a> {
    inputs: &'a str,
    parameters: ClassifyParameters<'a>,
}

#[derive(Serialize)]
struct ClassifyParameters<'a> {
    candidate_labels: &'a [&'a str],
}

impl HuggingFaceClient {
    pub fn new(api_token: &str, model_url: &str, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();

        Self {
            api_token: api_token.to_string(),
            model_url: model_url.to_string(),
            client,
        }
    }

    pub fn from_config(config: &HuggingFaceConfig) -> Self {
        Self::new(
            &config.api_token,
            &config.model_url,
            Duration::from_secs(config.timeout_secs),
        )
    }
}

#[async_trait]
impl ZeroShotClassifier for HuggingFaceClient {
    fn provider(&self) -> &str {
        "huggingface"
    }

    async fn classify(&self, input: &str, candidate_labels: &[&str]) -> Result<Classification> {
        let request = ClassifyRequest {
            inputs: input,
            parameters: ClassifyParameters { candidate_labels },
        };

        debug!(url = %self.model_url, labels = candidate_labels.len(), "Calling Hugging Face API");
        let response = self
            .client
            .post(&self.model_url)
            .bearer_auth(&self.api_token)
            .json(&request)
            .send()
            .await
            .context("Failed to call Hugging Face API")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Hugging Face API error (HTTP {}): {}", status, body);
        }

        let body: Value = response
            .json()
            .await
            .context("Failed to parse Hugging Face API response")?;

        // The API reports model loading and quota problems as {"error": ...}.
        if let Some(error) = body.get("error") {
            anyhow::bail!("Hugging Face API error: {}", error);
        }
        if !body.is_object() || body.get("scores").is_none() {
            anyhow::bail!("Unexpected Hugging Face response shape: {}", body);
        }

        let classification: Classification = serde_json::from_value(body)
            .context("Hugging Face response is missing labels or scores")?;

        debug!(labels = ?classification.labels, scores = ?classification.scores, "Classification received");
        Ok(classification)
    }
}
