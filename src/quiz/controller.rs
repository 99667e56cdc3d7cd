// src/quiz/controller.rs

use std::sync::{Arc, Weak};
use std::time::Duration;

use tokio::{sync::Mutex, task::JoinHandle};

use crate::{
    config::Config,
    models::difficulty::DifficultyAdjustment,
    quiz::machine::{Effect, Generation, Intent, QuizState, TransitionError, transition},
    services::{advisor::DifficultyAdvisor, question_bank::QuestionBank},
};

/// Knobs shared by every session.
#[derive(Debug, Clone)]
pub struct QuizSettings {
    pub questions_per_quiz: usize,
    pub user_id: String,
    pub advisor_timeout: Duration,
}

impl From<&Config> for QuizSettings {
    fn from(config: &Config) -> Self {
        Self {
            questions_per_quiz: config.questions_per_quiz,
            user_id: config.quiz_user_id.clone(),
            advisor_timeout: config.advisor_timeout,
        }
    }
}

/// Drives one quiz session: applies intents to the state machine and runs the
/// effects it asks for.
pub struct QuizController {
    state: Mutex<QuizState>,
    bank: Arc<QuestionBank>,
    advisor: Arc<dyn DifficultyAdvisor>,
    settings: QuizSettings,
    pending_suggestion: Mutex<Option<JoinHandle<()>>>,
}

impl QuizController {
    pub fn new(
        bank: Arc<QuestionBank>,
        advisor: Arc<dyn DifficultyAdvisor>,
        settings: QuizSettings,
    ) -> Arc<Self> {
        Arc::new(Self {
            state: Mutex::new(QuizState::new()),
            bank,
            advisor,
            settings,
            pending_suggestion: Mutex::new(None),
        })
    }

    pub async fn snapshot(&self) -> QuizState {
        self.state.lock().await.clone()
    }

    /// Applies a user intent and returns the resulting state.
    ///
    /// Question loading completes before this returns. The advisor call is
    /// started in the background and lands in the state later.
    pub async fn dispatch(self: &Arc<Self>, intent: Intent) -> Result<QuizState, TransitionError> {
        let mut state = self.state.lock().await;

        let intent_name = intent.name();
        let step = transition(&state, intent)?;
        *state = step.state;
        tracing::debug!(
            intent = intent_name,
            phase = state.phase().name(),
            generation = state.generation(),
            "Quiz intent applied"
        );

        let mut effect = step.effect;
        while let Some(next) = effect.take() {
            match next {
                Effect::LoadQuestions {
                    generation,
                    subject,
                } => {
                    let questions = self.bank.quiz_for(subject, self.settings.questions_per_quiz);
                    if questions.is_empty() {
                        tracing::warn!("No questions found for {}", subject);
                    } else {
                        tracing::info!("Prepared {} quiz with {} questions", subject, questions.len());
                    }

                    let step = transition(
                        &state,
                        Intent::QuestionsLoaded {
                            generation,
                            questions,
                        },
                    )?;
                    *state = step.state;
                    effect = step.effect;
                }
                Effect::RequestSuggestion { generation, score } => {
                    tracing::info!(score, "Quiz completed");
                    self.request_suggestion(generation, score).await;
                }
            }
        }

        Ok(state.clone())
    }

    /// Waits for an outstanding advisor call, if any, to land.
    pub async fn settle(&self) {
        let handle = self.pending_suggestion.lock().await.take();
        if let Some(handle) = handle {
            if let Err(e) = handle.await {
                tracing::error!("Difficulty suggestion task failed: {:?}", e);
            }
        }
    }

    async fn request_suggestion(self: &Arc<Self>, generation: Generation, score: f64) {
        let controller: Weak<Self> = Arc::downgrade(self);
        let advisor = Arc::clone(&self.advisor);
        let user_id = self.settings.user_id.clone();
        let limit = self.settings.advisor_timeout;

        let handle = tokio::spawn(async move {
            let outcome = match tokio::time::timeout(limit, advisor.suggest(&user_id, score)).await {
                Ok(Ok(label)) => Some(label),
                Ok(Err(e)) => {
                    tracing::warn!("Error personalizing difficulty: {}", e);
                    None
                }
                Err(_) => {
                    tracing::warn!("Difficulty suggestion timed out after {:?}", limit);
                    None
                }
            };

            match controller.upgrade() {
                Some(controller) => controller.resolve_suggestion(generation, outcome).await,
                None => tracing::debug!("Session closed before its difficulty suggestion arrived"),
            }
        });

        *self.pending_suggestion.lock().await = Some(handle);
    }

    async fn resolve_suggestion(&self, generation: Generation, outcome: Option<DifficultyAdjustment>) {
        let mut state = self.state.lock().await;

        if state.generation() != generation {
            tracing::debug!(
                generation,
                current = state.generation(),
                "Discarding stale difficulty suggestion"
            );
            return;
        }

        match transition(&state, Intent::SuggestionResolved { generation, outcome }) {
            Ok(step) => *state = step.state,
            Err(e) => tracing::warn!("Could not apply difficulty suggestion: {}", e),
        }
    }
}
