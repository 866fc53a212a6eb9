//! Analysis request and response shapes.

use serde::{Deserialize, Serialize};

pub const STATUS_FAKE: &str = "❌ Fake";
pub const STATUS_REAL: &str = "✅ Real";
pub const STATUS_UNVERIFIED: &str = "⚠️ Unable to Verify";

pub const UNVERIFIED_CONFIDENCE: f64 = 0.1;
pub const UNVERIFIED_SUMMARY: &str =
    "Could not verify this claim due to API limitations. Please check reliable news sources manually.";

/// Claim submitted for analysis. `image` is accepted but not analyzed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

/// Which request field supplied the analyzed input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputOrigin {
    Text,
    Url,
}

impl InputOrigin {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Url => "url",
        }
    }
}

impl AnalysisRequest {
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn from_url(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Self::default()
        }
    }

    /// `text` when non-empty, otherwise `url` when non-empty.
    pub fn effective_input(&self) -> Option<(&str, InputOrigin)> {
        fn non_empty(field: &Option<String>) -> Option<&str> {
            field.as_deref().filter(|s| !s.is_empty())
        }
        non_empty(&self.text)
            .map(|text| (text, InputOrigin::Text))
            .or_else(|| non_empty(&self.url).map(|url| (url, InputOrigin::Url)))
    }
}

/// Provenance entry attached to a response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub title: String,
    pub url: String,
}

impl Source {
    /// A source that names a provider and has no link.
    pub fn provider(title: &str) -> Self {
        Self {
            title: title.to_string(),
            url: String::new(),
        }
    }
}

/// Verdict returned to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub status: String,
    /// Ratio in `[0, 1]`.
    pub confidence: f64,
    pub summary: String,
    pub sources: Vec<Source>,
    pub is_fake: bool,
}

impl AnalysisResponse {
    /// Result used when no provider could verify the claim. Unverifiable
    /// claims are reported as suspect.
    pub fn unverifiable() -> Self {
        Self {
            status: STATUS_UNVERIFIED.to_string(),
            confidence: UNVERIFIED_CONFIDENCE,
            summary: UNVERIFIED_SUMMARY.to_string(),
            sources: Vec::new(),
            is_fake: true,
        }
    }

    pub fn status_for(is_fake: bool) -> &'static str {
        if is_fake {
            STATUS_FAKE
        } else {
            STATUS_REAL
        }
    }
}
