use std::sync::Arc;

use axum::extract::FromRef;

use crate::{
    config::Config,
    quiz::{controller::QuizSettings, store::SessionStore},
    services::{advisor::DifficultyAdvisor, question_bank::QuestionBank, visitor::VisitorCounter},
};

#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<SessionStore>,
    pub advisor: Arc<dyn DifficultyAdvisor>,
    pub visitors: Arc<VisitorCounter>,
}

impl AppState {
    /// Wires the shared services around one question bank and advisor.
    pub fn new(config: Config, bank: QuestionBank, advisor: Arc<dyn DifficultyAdvisor>) -> Self {
        let sessions = SessionStore::new(
            Arc::new(bank),
            Arc::clone(&advisor),
            QuizSettings::from(&config),
        );
        let visitors = VisitorCounter::new(config.visitor_count_path.clone());

        Self {
            sessions: Arc::new(sessions),
            advisor,
            visitors: Arc::new(visitors),
        }
    }
}

impl FromRef<AppState> for Arc<SessionStore> {
    fn from_ref(state: &AppState) -> Self {
        state.sessions.clone()
    }
}

impl FromRef<AppState> for Arc<dyn DifficultyAdvisor> {
    fn from_ref(state: &AppState) -> Self {
        state.advisor.clone()
    }
}

impl FromRef<AppState> for Arc<VisitorCounter> {
    fn from_ref(state: &AppState) -> Self {
        state.visitors.clone()
    }
}
