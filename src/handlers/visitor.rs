// src/handlers/visitor.rs

use std::sync::Arc;

use axum::{Json, extract::State, response::IntoResponse};
use serde_json::json;

use crate::services::visitor::VisitorCounter;

/// Records a page visit and returns the running total.
pub async fn record_visit(State(visitors): State<Arc<VisitorCounter>>) -> impl IntoResponse {
    let count = visitors.increment_and_get().await;
    Json(json!({ "count": count }))
}
