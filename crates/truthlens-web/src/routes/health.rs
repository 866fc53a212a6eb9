//! Service info route.

use axum::Json;
use serde_json::{json, Value};

/// GET / - Report that the API is up.
pub async fn index() -> Json<Value> {
    Json(json!({ "message": "Fake News Detection API is running" }))
}
