// tests/common/mod.rs

#![allow(dead_code)]

use std::time::Duration;

use async_trait::async_trait;
use quizwhiz::{
    models::{
        difficulty::DifficultyAdjustment,
        question::{AnswerOption, QuizQuestion},
        subject::Subject,
    },
    services::advisor::{AdvisorError, DifficultyAdvisor},
};
use tokio::sync::Notify;

/// Builds a question with options "a", "b", "c".
pub fn question(id: &str, subject: Subject, correct: &str) -> QuizQuestion {
    QuizQuestion {
        id: id.to_string(),
        subject,
        text: format!("Question {}", id),
        image_url: None,
        hint: None,
        options: ["a", "b", "c"]
            .into_iter()
            .map(|opt| AnswerOption::new(opt, format!("Option {}", opt.to_uppercase())))
            .collect(),
        correct_answer_id: correct.to_string(),
    }
}

/// `count` Math questions whose correct answer is always "a".
pub fn math_questions(count: usize) -> Vec<QuizQuestion> {
    (1..=count)
        .map(|i| question(&format!("q{}", i), Subject::Math, "a"))
        .collect()
}

/// Always answers with the same label.
pub struct FixedAdvisor(pub DifficultyAdjustment);

#[async_trait]
impl DifficultyAdvisor for FixedAdvisor {
    async fn suggest(&self, _user_id: &str, _score: f64) -> Result<DifficultyAdjustment, AdvisorError> {
        Ok(self.0)
    }
}

/// Always fails, as an unreachable language-model service would.
pub struct FailingAdvisor;

#[async_trait]
impl DifficultyAdvisor for FailingAdvisor {
    async fn suggest(&self, _user_id: &str, _score: f64) -> Result<DifficultyAdjustment, AdvisorError> {
        Err(AdvisorError::Transport("connection refused".to_string()))
    }
}

/// Holds every answer until `release` is notified.
pub struct GatedAdvisor {
    pub release: Notify,
    pub label: DifficultyAdjustment,
}

impl GatedAdvisor {
    pub fn new(label: DifficultyAdjustment) -> Self {
        Self {
            release: Notify::new(),
            label,
        }
    }
}

#[async_trait]
impl DifficultyAdvisor for GatedAdvisor {
    async fn suggest(&self, _user_id: &str, _score: f64) -> Result<DifficultyAdjustment, AdvisorError> {
        self.release.notified().await;
        Ok(self.label)
    }
}

/// Never answers within any reasonable timeout.
pub struct SlowAdvisor;

#[async_trait]
impl DifficultyAdvisor for SlowAdvisor {
    async fn suggest(&self, _user_id: &str, _score: f64) -> Result<DifficultyAdjustment, AdvisorError> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Ok(DifficultyAdjustment::Maintain)
    }
}
