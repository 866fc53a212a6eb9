//! Claim analysis route handler.

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use tracing::debug;
use truthlens_core::{AnalysisRequest, AnalysisResponse};

use crate::state::AppState;

/// Error body, `{"detail": "..."}`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub detail: String,
}

/// POST /api/analyze/ - Analyze a claim, headline or article URL.
pub async fn analyze(
    State(state): State<AppState>,
    Json(req): Json<AnalysisRequest>,
) -> Result<Json<AnalysisResponse>, (StatusCode, Json<ErrorDetail>)> {
    let response = state.service.analyze(&req).await.map_err(|e| {
        let status = if e.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };
        debug!(error = %e, %status, "Rejected analysis request");
        (status, Json(ErrorDetail { detail: e.to_string() }))
    })?;

    Ok(Json(response))
}
