//! Remote model providers.
//!
//! The analysis service talks to providers only through these traits, so a
//! deployment can swap vendors and tests can plug in deterministic fakes.

pub mod gemini;
pub mod huggingface;

use anyhow::{bail, Result};
use async_trait::async_trait;
use serde::Deserialize;

pub use gemini::GeminiClient;
pub use huggingface::HuggingFaceClient;

/// A model that turns a prompt into free text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Provider name used in logs.
    fn provider(&self) -> &str;

    /// Model identifier.
    fn model_name(&self) -> &str;

    /// Run a single, non-streaming generation.
    async fn generate(&self, prompt: &str) -> Result<String>;
}

/// A model that scores an input against a set of candidate labels.
#[async_trait]
pub trait ZeroShotClassifier: Send + Sync {
    /// Provider name used in logs.
    fn provider(&self) -> &str;

    async fn classify(&self, input: &str, candidate_labels: &[&str]) -> Result<Classification>;
}

/// Parallel label/score sequences returned by a zero-shot classifier.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Classification {
    pub labels: Vec<String>,
    pub scores: Vec<f64>,
}

impl Classification {
    /// Highest scoring label. Ties go to the label that comes first.
    pub fn top(&self) -> Result<(&str, f64)> {
        if self.labels.len() != self.scores.len() {
            bail!(
                "labels and scores differ in length ({} vs {})",
                self.labels.len(),
                self.scores.len()
            );
        }
        if let Some(bad) = self.scores.iter().find(|s| !s.is_finite()) {
            bail!("non-finite score in classification: {}", bad);
        }

        let mut best: Option<(usize, f64)> = None;
        for (idx, &score) in self.scores.iter().enumerate() {
            match best {
                Some((_, top)) if score <= top => {}
                _ => best = Some((idx, score)),
            }
        }

        match best {
            Some((idx, score)) => Ok((self.labels[idx].as_str(), score)),
            None => bail!("classification contains no labels"),
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    /// Serve `router` on an ephemeral local port and return its base URL.
    pub async fn spawn_server(router: axum::Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }
}
