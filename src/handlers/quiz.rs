// src/handlers/quiz.rs

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use uuid::Uuid;

use crate::{
    error::AppError,
    extract::ValidJson,
    models::{
        session::{SelectAnswerRequest, SelectSubjectRequest},
        subject::catalogue,
        view::{SessionResponse, render},
    },
    quiz::{controller::QuizController, machine::Intent, store::SessionStore},
};

async fn find_session(store: &SessionStore, id: &Uuid) -> Result<Arc<QuizController>, AppError> {
    store
        .get(id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Quiz session '{}' not found", id)))
}

/// Runs `intent` against the session and renders the new state.
async fn apply(
    store: &SessionStore,
    id: Uuid,
    intent: Intent,
) -> Result<Json<SessionResponse>, AppError> {
    let controller = find_session(store, &id).await?;
    let state = controller.dispatch(intent).await?;

    Ok(Json(SessionResponse {
        session_id: id,
        created_at: None,
        view: render(&state),
    }))
}

/// Lists the subjects a quiz can be taken in.
pub async fn list_subjects() -> impl IntoResponse {
    Json(catalogue())
}

/// Opens a new quiz session waiting for a subject.
pub async fn create_session(
    State(store): State<Arc<SessionStore>>,
) -> Result<impl IntoResponse, AppError> {
    let (session_id, controller, created_at) = store.create().await;
    let state = controller.snapshot().await;

    Ok((
        StatusCode::CREATED,
        Json(SessionResponse {
            session_id,
            created_at: Some(created_at),
            view: render(&state),
        }),
    ))
}

/// Returns the current view of a session.
///
/// Poll this after completing a quiz to pick up the difficulty suggestion.
pub async fn get_session(
    State(store): State<Arc<SessionStore>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let controller = find_session(&store, &id).await?;
    let state = controller.snapshot().await;

    Ok(Json(SessionResponse {
        session_id: id,
        created_at: None,
        view: render(&state),
    }))
}

pub async fn close_session(
    State(store): State<Arc<SessionStore>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    if !store.remove(&id).await {
        return Err(AppError::NotFound(format!("Quiz session '{}' not found", id)));
    }
    Ok(StatusCode::NO_CONTENT)
}

pub async fn select_subject(
    State(store): State<Arc<SessionStore>>,
    Path(id): Path<Uuid>,
    ValidJson(req): ValidJson<SelectSubjectRequest>,
) -> Result<impl IntoResponse, AppError> {
    apply(&store, id, Intent::SelectSubject(req.subject)).await
}

pub async fn select_answer(
    State(store): State<Arc<SessionStore>>,
    Path(id): Path<Uuid>,
    ValidJson(req): ValidJson<SelectAnswerRequest>,
) -> Result<impl IntoResponse, AppError> {
    apply(
        &store,
        id,
        Intent::SelectAnswer {
            question_id: req.question_id,
            option_id: req.option_id,
        },
    )
    .await
}

/// Moves to the next question, or submits the quiz on the last one.
pub async fn advance(
    State(store): State<Arc<SessionStore>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    apply(&store, id, Intent::Advance).await
}

/// Starts the same subject over with a fresh session.
pub async fn restart(
    State(store): State<Arc<SessionStore>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    apply(&store, id, Intent::Restart).await
}

pub async fn change_subject(
    State(store): State<Arc<SessionStore>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    apply(&store, id, Intent::ChangeSubject).await
}
