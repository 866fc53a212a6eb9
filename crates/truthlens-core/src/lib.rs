//! TruthLens Core Library
//!
//! Fact-check orchestration: prompt a text-generation model, parse its verdict,
//! and fall back to a zero-shot classifier when the model is unavailable.

pub mod analysis;
pub mod config;
pub mod error;
pub mod provider;
pub mod summarize;
pub mod verdict;

pub use analysis::AnalysisService;
pub use analysis::model::{AnalysisRequest, AnalysisResponse, Source};
pub use config::AppConfig;
pub use error::{TruthLensError, TruthLensResult};
pub use summarize::{ArticleSummarizer, Summarizer};
