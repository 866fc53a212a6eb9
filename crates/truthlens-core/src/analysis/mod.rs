//! Claim analysis with provider fallback.
//!
//! A claim goes to the text-generation provider first. If that call or the
//! parsing of its output fails, the zero-shot classifier is tried. If that
//! fails too, a fixed "unable to verify" response is returned. Provider
//! errors are logged and never reach the caller.

pub mod model;
pub mod prompt;

use std::sync::Arc;
use tracing::{debug, error, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::config::AppConfig;
use crate::error::{TruthLensError, TruthLensResult};
use crate::provider::{GeminiClient, HuggingFaceClient, TextGenerator, ZeroShotClassifier};
use crate::verdict::{Verdict, VerdictParser};
use model::{AnalysisRequest, AnalysisResponse, Source};

pub const PRIMARY_SOURCE_TITLE: &str = "Gemini AI Fact Check";
pub const SECONDARY_SOURCE_TITLE: &str = "HuggingFace AI";

/// Labels offered to the zero-shot classifier.
pub const CANDIDATE_LABELS: [&str; 4] = [
    "fake news",
    "real news",
    "misleading information",
    "factual statement",
];

/// Fact-check orchestrator. Holds no per-request state.
#[derive(Clone)]
pub struct AnalysisService {
    generator: Arc<dyn TextGenerator>,
    classifier: Arc<dyn ZeroShotClassifier>,
    parser: Arc<dyn VerdictParser>,
}

impl AnalysisService {
    pub fn new(
        generator: Arc<dyn TextGenerator>,
        classifier: Arc<dyn ZeroShotClassifier>,
        parser: Arc<dyn VerdictParser>,
    ) -> Self {
        Self {
            generator,
            classifier,
            parser,
        }
    }

    /// Wire the Gemini and Hugging Face clients from configuration.
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            Arc::new(GeminiClient::from_config(&config.gemini)),
            Arc::new(HuggingFaceClient::from_config(&config.huggingface)),
            config.verdict_format.parser(),
        )
    }

    /// Analyze a claim.
    ///
    /// Fails only with [`TruthLensError::InvalidInput`]; every provider failure
    /// degrades to a more conservative response instead.
    pub async fn analyze(&self, request: &AnalysisRequest) -> TruthLensResult<AnalysisResponse> {
        let (input, origin) = request
            .effective_input()
            .ok_or(TruthLensError::InvalidInput)?;

        let span = info_span!("analyze", request_id = %Uuid::new_v4(), origin = origin.as_str());
        async move {
            debug!(input_len = input.len(), "Starting analysis");

            match self.check_with_generator(input).await {
                Ok(response) => return Ok(response),
                Err(e) => warn!(
                    provider = self.generator.provider(),
                    error = %e,
                    "Primary provider failed, trying classifier"
                ),
            }

            match self.check_with_classifier(input).await {
                Ok(response) => return Ok(response),
                Err(e) => warn!(
                    provider = self.classifier.provider(),
                    error = %e,
                    "Secondary provider failed"
                ),
            }

            error!("No provider could verify the claim, returning unverifiable result");
            Ok(AnalysisResponse::unverifiable())
        }
        .instrument(span)
        .await
    }

    async fn check_with_generator(&self, input: &str) -> TruthLensResult<AnalysisResponse> {
        let prompt = prompt::build_fact_check_prompt(input, self.parser.format_instructions());
        let raw = self
            .generator
            .generate(&prompt)
            .await
            .map_err(|e| TruthLensError::primary(&e))?;
        if raw.trim().is_empty() {
            return Err(TruthLensError::PrimaryProvider("empty model output".to_string()));
        }

        let parsed = self
            .parser
            .parse(&raw)
            .map_err(|e| TruthLensError::PrimaryProvider(e.to_string()))?;

        if parsed.verdict == Verdict::Unknown {
            // Reported as real: only an explicit FALSE marks a claim fake.
            warn!(parser = self.parser.name(), "Model output carried no verdict");
        }

        let is_fake = parsed.is_fake();
        info!(
            provider = self.generator.provider(),
            model = self.generator.model_name(),
            verdict = parsed.verdict.as_str(),
            confidence = parsed.confidence,
            "Claim analyzed"
        );

        Ok(AnalysisResponse {
            status: AnalysisResponse::status_for(is_fake).to_string(),
            confidence: parsed.confidence_ratio(),
            summary: parsed.explanation,
            sources: vec![Source::provider(PRIMARY_SOURCE_TITLE)],
            is_fake,
        })
    }

    async fn check_with_classifier(&self, input: &str) -> TruthLensResult<AnalysisResponse> {
        let classification = self
            .classifier
            .classify(input, &CANDIDATE_LABELS)
            .await
            .map_err(|e| TruthLensError::secondary(&e))?;

        let (label, score) = classification
            .top()
            .map_err(|e| TruthLensError::secondary(&e))?;

        let lowered = label.to_lowercase();
        let is_fake = lowered.contains("fake") || lowered.contains("misleading");
        info!(
            provider = self.classifier.provider(),
            label,
            score,
            "Claim classified"
        );

        Ok(AnalysisResponse {
            status: AnalysisResponse::status_for(is_fake).to_string(),
            confidence: score,
            summary: format!(
                "AI classification: {} (confidence: {:.1}%)",
                label,
                score * 100.0
            ),
            sources: vec![Source::provider(SECONDARY_SOURCE_TITLE)],
            is_fake,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::Classification;
    use crate::verdict::{JsonParser, LabeledLineParser};
    use anyhow::Result;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    struct FakeGenerator {
        reply: Result<String, String>,
        calls: AtomicUsize,
        last_prompt: Mutex<String>,
    }

    impl FakeGenerator {
        fn replying(text: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Ok(text.to_string()),
                calls: AtomicUsize::new(0),
                last_prompt: Mutex::new(String::new()),
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                reply: Err("connection refused".to_string()),
                calls: AtomicUsize::new(0),
                last_prompt: Mutex::new(String::new()),
            })
        }
    }

    #[async_trait]
    impl TextGenerator for FakeGenerator {
        fn provider(&self) -> &str {
            "fake-generator"
        }

        fn model_name(&self) -> &str {
            "fake-model"
        }

        async fn generate(&self, prompt: &str) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_prompt.lock().unwrap() = prompt.to_string();
            self.reply.clone().map_err(|e| anyhow::anyhow!(e))
        }
    }

    struct FakeClassifier {
        reply: Option<Classification>,
        calls: AtomicUsize,
    }

    impl FakeClassifier {
        fn replying(labels: &[&str], scores: &[f64]) -> Arc<Self> {
            Arc::new(Self {
                reply: Some(Classification {
                    labels: labels.iter().map(|l| l.to_string()).collect(),
                    scores: scores.to_vec(),
                }),
                calls: AtomicUsize::new(0),
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                reply: None,
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl ZeroShotClassifier for FakeClassifier {
        fn provider(&self) -> &str {
            "fake-classifier"
        }

        async fn classify(&self, _input: &str, candidate_labels: &[&str]) -> Result<Classification> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            assert_eq!(candidate_labels, CANDIDATE_LABELS);
            self.reply
                .clone()
                .ok_or_else(|| anyhow::anyhow!("service unavailable"))
        }
    }

    fn service(generator: Arc<FakeGenerator>, classifier: Arc<FakeClassifier>) -> AnalysisService {
        AnalysisService::new(generator, classifier, Arc::new(LabeledLineParser))
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[tokio::test]
    async fn test_missing_input_is_rejected() {
        let generator = FakeGenerator::replying("VERDICT: TRUE");
        let svc = service(generator.clone(), FakeClassifier::failing());
        let request = AnalysisRequest {
            text: Some(String::new()),
            url: None,
            image: Some("data:image/png;base64,AAAA".into()),
        };
        let err = svc.analyze(&request).await.unwrap_err();
        assert!(matches!(err, TruthLensError::InvalidInput));
        assert!(err.is_client_error());
        assert_eq!(generator.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_false_verdict_is_fake() {
        let classifier = FakeClassifier::failing();
        let svc = service(
            FakeGenerator::replying("VERDICT: FALSE\nCONFIDENCE: 85%\nEXPLANATION: Never happened."),
            classifier.clone(),
        );
        let response = svc.analyze(&AnalysisRequest::from_text("Moon landing faked")).await.unwrap();
        assert!(response.is_fake);
        assert!(approx(response.confidence, 0.85));
        assert_eq!(response.status, "❌ Fake");
        assert_eq!(response.summary, "Never happened.");
        assert_eq!(response.sources, vec![Source::provider("Gemini AI Fact Check")]);
        assert_eq!(classifier.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_true_verdict_is_real() {
        let svc = service(
            FakeGenerator::replying("VERDICT: TRUE\nCONFIDENCE: 92%\nEXPLANATION: Confirmed."),
            FakeClassifier::failing(),
        );
        let response = svc.analyze(&AnalysisRequest::from_text("Water boils at 100C")).await.unwrap();
        assert!(!response.is_fake);
        assert!(approx(response.confidence, 0.92));
        assert_eq!(response.status, "✅ Real");
    }

    #[tokio::test]
    async fn test_missing_confidence_marker() {
        let svc = service(
            FakeGenerator::replying("VERDICT: TRUE\nEXPLANATION: Confirmed."),
            FakeClassifier::failing(),
        );
        let response = svc.analyze(&AnalysisRequest::from_text("claim")).await.unwrap();
        assert!(approx(response.confidence, 0.50));
    }

    #[tokio::test]
    async fn test_unknown_verdict_is_not_fake() {
        let svc = service(
            FakeGenerator::replying("I am not sure about this one."),
            FakeClassifier::failing(),
        );
        let response = svc.analyze(&AnalysisRequest::from_text("claim")).await.unwrap();
        assert!(!response.is_fake);
        assert_eq!(response.summary, "I am not sure about this one.");
        assert!(approx(response.confidence, 0.50));
    }

    #[tokio::test]
    async fn test_prompt_embeds_url_input() {
        let generator = FakeGenerator::replying("VERDICT: TRUE\nCONFIDENCE: 60");
        let svc = service(generator.clone(), FakeClassifier::failing());
        svc.analyze(&AnalysisRequest::from_url("https://news.test/a"))
            .await
            .unwrap();
        let prompt = generator.last_prompt.lock().unwrap().clone();
        assert!(prompt.contains("\"https://news.test/a\""));
        assert!(prompt.contains("VERDICT: [TRUE/FALSE]"));
    }

    #[tokio::test]
    async fn test_falls_back_to_classifier() {
        let classifier = FakeClassifier::replying(&["fake news", "real news"], &[0.3, 0.7]);
        let svc = service(FakeGenerator::failing(), classifier.clone());
        let response = svc.analyze(&AnalysisRequest::from_text("claim")).await.unwrap();
        assert!(!response.is_fake);
        assert!(approx(response.confidence, 0.7));
        assert_eq!(response.status, "✅ Real");
        assert_eq!(response.summary, "AI classification: real news (confidence: 70.0%)");
        assert_eq!(response.sources, vec![Source::provider("HuggingFace AI")]);
        assert_eq!(classifier.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_misleading_label_is_fake() {
        let svc = service(
            FakeGenerator::failing(),
            FakeClassifier::replying(
                &["Misleading Information", "factual statement"],
                &[0.55, 0.45],
            ),
        );
        let response = svc.analyze(&AnalysisRequest::from_text("claim")).await.unwrap();
        assert!(response.is_fake);
        assert_eq!(response.status, "❌ Fake");
    }

    #[tokio::test]
    async fn test_unparseable_output_falls_back() {
        let classifier = FakeClassifier::replying(&["fake news"], &[0.9]);
        let svc = AnalysisService::new(
            FakeGenerator::replying("VERDICT: TRUE"),
            classifier.clone(),
            Arc::new(JsonParser),
        );
        let response = svc.analyze(&AnalysisRequest::from_text("claim")).await.unwrap();
        assert!(response.is_fake);
        assert_eq!(classifier.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_empty_generator_reply_falls_back() {
        let classifier = FakeClassifier::replying(&["fake news", "real news"], &[0.9, 0.1]);
        let svc = service(FakeGenerator::replying("  \n"), classifier.clone());
        let response = svc.analyze(&AnalysisRequest::from_text("claim")).await.unwrap();
        assert!(response.is_fake);
        assert!(approx(response.confidence, 0.9));
        assert_eq!(response.sources, vec![Source::provider("HuggingFace AI")]);
        assert_eq!(classifier.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_malformed_classification_falls_through() {
        let svc = service(
            FakeGenerator::failing(),
            FakeClassifier::replying(&["fake news", "real news"], &[0.9]),
        );
        let response = svc.analyze(&AnalysisRequest::from_text("claim")).await.unwrap();
        assert_eq!(response, AnalysisResponse::unverifiable());
    }

    #[tokio::test]
    async fn test_both_providers_fail() {
        let svc = service(FakeGenerator::failing(), FakeClassifier::failing());
        let response = svc.analyze(&AnalysisRequest::from_text("claim")).await.unwrap();
        assert_eq!(response.status, "⚠️ Unable to Verify");
        assert!(approx(response.confidence, 0.1));
        assert!(response.is_fake);
        assert!(response.sources.is_empty());
    }

    #[tokio::test]
    async fn test_repeated_requests_are_identical() {
        let svc = service(
            FakeGenerator::replying("VERDICT: FALSE\nCONFIDENCE: 77%\nEXPLANATION: No."),
            FakeClassifier::failing(),
        );
        let request = AnalysisRequest::from_text("same claim");
        let first = svc.analyze(&request).await.unwrap();
        let second = svc.analyze(&request).await.unwrap();
        assert_eq!(first, second);
    }
}
