// src/quiz/store.rs

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::{
    quiz::controller::{QuizController, QuizSettings},
    services::{advisor::DifficultyAdvisor, question_bank::QuestionBank},
};

struct Entry {
    controller: Arc<QuizController>,
    last_active: DateTime<Utc>,
}

/// Live quiz sessions, one controller per browser session.
pub struct SessionStore {
    sessions: Mutex<HashMap<Uuid, Entry>>,
    bank: Arc<QuestionBank>,
    advisor: Arc<dyn DifficultyAdvisor>,
    settings: QuizSettings,
}

impl SessionStore {
    pub fn new(
        bank: Arc<QuestionBank>,
        advisor: Arc<dyn DifficultyAdvisor>,
        settings: QuizSettings,
    ) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            bank,
            advisor,
            settings,
        }
    }

    /// Opens a new session in the `NoSubject` phase.
    pub async fn create(&self) -> (Uuid, Arc<QuizController>, DateTime<Utc>) {
        let id = Uuid::new_v4();
        let now = Utc::now();
        let controller = QuizController::new(
            Arc::clone(&self.bank),
            Arc::clone(&self.advisor),
            self.settings.clone(),
        );

        self.sessions.lock().await.insert(
            id,
            Entry {
                controller: Arc::clone(&controller),
                last_active: now,
            },
        );
        tracing::debug!(%id, "Quiz session opened");

        (id, controller, now)
    }

    /// Looks a session up and marks it active.
    pub async fn get(&self, id: &Uuid) -> Option<Arc<QuizController>> {
        let mut sessions = self.sessions.lock().await;
        let entry = sessions.get_mut(id)?;
        entry.last_active = Utc::now();
        Some(Arc::clone(&entry.controller))
    }

    pub async fn remove(&self, id: &Uuid) -> bool {
        let removed = self.sessions.lock().await.remove(id).is_some();
        if removed {
            tracing::debug!(%id, "Quiz session closed");
        }
        removed
    }

    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Drops sessions idle for longer than `max_idle`. Returns how many were dropped.
    pub async fn purge_idle(&self, max_idle: Duration) -> usize {
        let max_idle = TimeDelta::from_std(max_idle).unwrap_or(TimeDelta::MAX);
        let now = Utc::now();

        let mut sessions = self.sessions.lock().await;
        let before = sessions.len();
        sessions.retain(|_, entry| now - entry.last_active <= max_idle);
        let purged = before - sessions.len();

        if purged > 0 {
            tracing::info!("Purged {} idle quiz sessions", purged);
        }
        purged
    }
}
