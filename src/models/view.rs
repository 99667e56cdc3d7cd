// src/models/view.rs

//! What the client renders. Built from a `QuizState` snapshot and nothing else.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::{
    models::{
        difficulty::DifficultyAdjustment,
        question::PublicQuestion,
        subject::{Subject, SubjectInfo, catalogue},
    },
    quiz::machine::{Phase, QuizSession, QuizState, SuggestionStatus},
};

pub const NOT_ANSWERED: &str = "Not answered";
pub const SUGGESTION_UNAVAILABLE: &str = "Could not get difficulty suggestion at this time.";

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum QuizView {
    NoSubject {
        subjects: Vec<SubjectInfo>,
    },
    Loading {
        subject: Subject,
    },
    Empty {
        subject: Subject,
        message: String,
    },
    InProgress {
        subject: Subject,
        question: PublicQuestion,
        selected_option_id: Option<String>,
        progress: Progress,
        is_last: bool,
    },
    Completed(ResultsView),
}

#[derive(Debug, Clone, Serialize)]
pub struct Progress {
    /// 1-based position of the current question.
    pub current: usize,
    pub total: usize,
    pub percent: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBand {
    High,
    Medium,
    Low,
}

impl ScoreBand {
    pub fn for_score(score: f64) -> Self {
        if score >= 70.0 {
            ScoreBand::High
        } else if score >= 40.0 {
            ScoreBand::Medium
        } else {
            ScoreBand::Low
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SuggestionPanel {
    Pending,
    Ready {
        label: DifficultyAdjustment,
        message: String,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct ReviewItem {
    pub number: usize,
    pub question_id: String,
    pub question_text: String,
    pub your_answer: String,
    pub correct_answer: String,
    pub is_correct: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResultsView {
    pub subject: Subject,
    /// Raw percentage.
    pub score: f64,
    /// Percentage rounded for display.
    pub score_display: u32,
    pub correct_count: usize,
    pub total_questions: usize,
    pub score_band: ScoreBand,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<SuggestionPanel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
    pub review: Vec<ReviewItem>,
}

/// Envelope returned by every session endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct SessionResponse {
    pub session_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    pub view: QuizView,
}

pub fn render(state: &QuizState) -> QuizView {
    match state.phase() {
        Phase::NoSubject => QuizView::NoSubject {
            subjects: catalogue(),
        },
        Phase::Loading { subject } => QuizView::Loading { subject: *subject },
        Phase::Empty { subject } => empty(*subject),
        Phase::InProgress(session) => render_in_progress(session),
        Phase::Completed(session) => QuizView::Completed(render_results(session)),
    }
}

fn empty(subject: Subject) -> QuizView {
    QuizView::Empty {
        subject,
        message: format!("Sorry, we couldn't find any questions for {}.", subject),
    }
}

fn render_in_progress(session: &QuizSession) -> QuizView {
    let Some(question) = session.current_question() else {
        return empty(session.subject());
    };

    let total = session.questions().len();
    let current = session.current_index() + 1;

    QuizView::InProgress {
        subject: session.subject(),
        question: PublicQuestion::from(question),
        selected_option_id: session.answer_for(&question.id).map(str::to_string),
        progress: Progress {
            current,
            total,
            percent: current as f64 / total as f64 * 100.0,
        },
        is_last: session.is_last_question(),
    }
}

fn render_results(session: &QuizSession) -> ResultsView {
    let score = session.score().unwrap_or_default();

    let review = session
        .questions()
        .iter()
        .enumerate()
        .map(|(idx, q)| {
            let chosen = session.answer_for(&q.id);
            ReviewItem {
                number: idx + 1,
                question_id: q.id.clone(),
                question_text: q.text.clone(),
                your_answer: chosen
                    .and_then(|id| q.option(id))
                    .map(|opt| opt.text.clone())
                    .unwrap_or_else(|| NOT_ANSWERED.to_string()),
                correct_answer: q
                    .correct_option()
                    .map(|opt| opt.text.clone())
                    .unwrap_or_default(),
                is_correct: q.is_correct(chosen),
            }
        })
        .collect();

    let (suggestion, notice) = match session.suggestion() {
        SuggestionStatus::Pending => (Some(SuggestionPanel::Pending), None),
        SuggestionStatus::Ready(label) => (
            Some(SuggestionPanel::Ready {
                label,
                message: format!(
                    "For your next quiz, we suggest to {} the difficulty.",
                    label.as_str().to_lowercase()
                ),
            }),
            None,
        ),
        SuggestionStatus::Unavailable => (None, Some(SUGGESTION_UNAVAILABLE.to_string())),
        SuggestionStatus::NotRequested => (None, None),
    };

    ResultsView {
        subject: session.subject(),
        score,
        score_display: score.round() as u32,
        correct_count: session.correct_count(),
        total_questions: session.questions().len(),
        score_band: ScoreBand::for_score(score),
        suggestion,
        notice,
        review,
    }
}
