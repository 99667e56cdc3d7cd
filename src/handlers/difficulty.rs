// src/handlers/difficulty.rs

use std::sync::Arc;

use axum::{Json, extract::State, response::IntoResponse};

use crate::{
    error::AppError,
    extract::ValidJson,
    models::difficulty::{SuggestDifficultyRequest, SuggestDifficultyResponse},
    services::advisor::DifficultyAdvisor,
};

/// Asks the advisor for a difficulty suggestion outside of a quiz session.
pub async fn suggest_difficulty(
    State(advisor): State<Arc<dyn DifficultyAdvisor>>,
    ValidJson(req): ValidJson<SuggestDifficultyRequest>,
) -> Result<impl IntoResponse, AppError> {
    let label = advisor.suggest(&req.user_id, req.score).await?;

    Ok(Json(SuggestDifficultyResponse {
        suggested_difficulty_adjustment: label,
    }))
}
