// src/routes.rs

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handlers::{difficulty, quiz, visitor},
    state::AppState,
};

/// Assembles the main application router.
///
/// * Merges the quiz, advisor and visitor sub-routers.
/// * Applies global middleware (Trace, CORS).
/// * Injects global state.
pub fn create_router(state: AppState) -> Router {
    let origins = [
        HeaderValue::from_static("http://localhost:3000"),
        HeaderValue::from_static("http://127.0.0.1:3000"),
    ];

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]);

    let session_routes = Router::new()
        .route("/", post(quiz::create_session))
        .route("/{id}", get(quiz::get_session).delete(quiz::close_session))
        .route("/{id}/subject", post(quiz::select_subject))
        .route("/{id}/answer", post(quiz::select_answer))
        .route("/{id}/advance", post(quiz::advance))
        .route("/{id}/restart", post(quiz::restart))
        .route("/{id}/change-subject", post(quiz::change_subject));

    Router::new()
        .route("/api/subjects", get(quiz::list_subjects))
        .nest("/api/sessions", session_routes)
        .route("/api/difficulty", post(difficulty::suggest_difficulty))
        .route("/api/visitors", post(visitor::record_visit))
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
