// src/quiz/machine.rs

//! The quiz state machine.
//!
//! Every transition is a pure function of the current [`QuizState`] and an
//! [`Intent`]. Work that has to happen outside the machine (fetching
//! questions, asking the advisor) is returned as an [`Effect`] tagged with the
//! generation that requested it; results fed back with an older generation are
//! ignored.

use std::collections::HashMap;
use std::fmt;

use crate::models::{
    difficulty::DifficultyAdjustment, question::QuizQuestion, subject::Subject,
};

/// Identifies one session lifetime. Bumped whenever a session is started or discarded.
pub type Generation = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestionStatus {
    NotRequested,
    Pending,
    Ready(DifficultyAdjustment),
    /// The advisor failed or answered off-schema. Final for this session.
    Unavailable,
}

/// One quiz over a fixed list of questions.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizSession {
    subject: Subject,
    questions: Vec<QuizQuestion>,
    answers: HashMap<String, String>,
    current_index: usize,
    score: Option<f64>,
    suggestion: SuggestionStatus,
}

impl QuizSession {
    pub fn new(subject: Subject, questions: Vec<QuizQuestion>) -> Self {
        Self {
            subject,
            questions,
            answers: HashMap::new(),
            current_index: 0,
            score: None,
            suggestion: SuggestionStatus::NotRequested,
        }
    }

    pub fn subject(&self) -> Subject {
        self.subject
    }

    pub fn questions(&self) -> &[QuizQuestion] {
        &self.questions
    }

    pub fn answers(&self) -> &HashMap<String, String> {
        &self.answers
    }

    pub fn answer_for(&self, question_id: &str) -> Option<&str> {
        self.answers.get(question_id).map(String::as_str)
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_question(&self) -> Option<&QuizQuestion> {
        self.questions.get(self.current_index)
    }

    pub fn is_last_question(&self) -> bool {
        self.current_index + 1 >= self.questions.len()
    }

    pub fn is_completed(&self) -> bool {
        self.score.is_some()
    }

    /// Raw percentage, set once the quiz is finalized.
    pub fn score(&self) -> Option<f64> {
        self.score
    }

    pub fn suggestion(&self) -> SuggestionStatus {
        self.suggestion
    }

    pub fn difficulty_suggestion(&self) -> Option<DifficultyAdjustment> {
        match self.suggestion {
            SuggestionStatus::Ready(label) => Some(label),
            _ => None,
        }
    }

    pub fn correct_count(&self) -> usize {
        self.questions
            .iter()
            .filter(|q| q.is_correct(self.answer_for(&q.id)))
            .count()
    }

    fn record_answer(&mut self, question_id: String, option_id: String) -> Result<(), TransitionError> {
        let question = self
            .questions
            .iter()
            .find(|q| q.id == question_id)
            .ok_or_else(|| TransitionError::UnknownQuestion(question_id.clone()))?;

        if question.option(&option_id).is_none() {
            return Err(TransitionError::UnknownOption {
                question_id,
                option_id,
            });
        }

        self.answers.insert(question_id, option_id);
        Ok(())
    }

    fn finalize(&mut self) -> f64 {
        let score = score_of(&self.questions, &self.answers);
        self.score = Some(score);
        self.suggestion = SuggestionStatus::Pending;
        score
    }
}

/// Percentage of `questions` whose recorded answer is the correct one.
///
/// Unanswered questions count as wrong. An empty list scores 0.
pub fn score_of(questions: &[QuizQuestion], answers: &HashMap<String, String>) -> f64 {
    if questions.is_empty() {
        return 0.0;
    }

    let correct = questions
        .iter()
        .filter(|q| q.is_correct(answers.get(&q.id).map(String::as_str)))
        .count();

    (correct as f64 / questions.len() as f64) * 100.0
}

#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    NoSubject,
    Loading { subject: Subject },
    /// The subject has no questions. Only `ChangeSubject` leaves this phase.
    Empty { subject: Subject },
    InProgress(QuizSession),
    Completed(QuizSession),
}

impl Phase {
    pub fn name(&self) -> &'static str {
        match self {
            Phase::NoSubject => "no_subject",
            Phase::Loading { .. } => "loading",
            Phase::Empty { .. } => "empty",
            Phase::InProgress(_) => "in_progress",
            Phase::Completed(_) => "completed",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuizState {
    generation: Generation,
    phase: Phase,
}

impl Default for QuizState {
    fn default() -> Self {
        Self::new()
    }
}

impl QuizState {
    pub fn new() -> Self {
        Self {
            generation: 0,
            phase: Phase::NoSubject,
        }
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn subject(&self) -> Option<Subject> {
        match &self.phase {
            Phase::NoSubject => None,
            Phase::Loading { subject } | Phase::Empty { subject } => Some(*subject),
            Phase::InProgress(session) | Phase::Completed(session) => Some(session.subject),
        }
    }

    pub fn session(&self) -> Option<&QuizSession> {
        match &self.phase {
            Phase::InProgress(session) | Phase::Completed(session) => Some(session),
            _ => None,
        }
    }

    fn start_loading(&self, subject: Subject) -> Step {
        let generation = self.generation.wrapping_add(1);
        Step {
            state: QuizState {
                generation,
                phase: Phase::Loading { subject },
            },
            effect: Some(Effect::LoadQuestions {
                generation,
                subject,
            }),
        }
    }
}

/// A user intent, or the result of an effect coming back into the machine.
#[derive(Debug, Clone)]
pub enum Intent {
    SelectSubject(Subject),
    QuestionsLoaded {
        generation: Generation,
        questions: Vec<QuizQuestion>,
    },
    SelectAnswer {
        question_id: String,
        option_id: String,
    },
    Advance,
    Restart,
    ChangeSubject,
    /// `None` when the advisor failed.
    SuggestionResolved {
        generation: Generation,
        outcome: Option<DifficultyAdjustment>,
    },
}

impl Intent {
    pub fn name(&self) -> &'static str {
        match self {
            Intent::SelectSubject(_) => "select_subject",
            Intent::QuestionsLoaded { .. } => "questions_loaded",
            Intent::SelectAnswer { .. } => "select_answer",
            Intent::Advance => "advance",
            Intent::Restart => "restart",
            Intent::ChangeSubject => "change_subject",
            Intent::SuggestionResolved { .. } => "suggestion_resolved",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Effect {
    LoadQuestions {
        generation: Generation,
        subject: Subject,
    },
    RequestSuggestion {
        generation: Generation,
        score: f64,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub state: QuizState,
    pub effect: Option<Effect>,
}

impl Step {
    fn to(generation: Generation, phase: Phase) -> Self {
        Self {
            state: QuizState { generation, phase },
            effect: None,
        }
    }

    fn unchanged(state: &QuizState) -> Self {
        Self {
            state: state.clone(),
            effect: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionError {
    NotAllowed {
        intent: &'static str,
        phase: &'static str,
    },
    UnknownQuestion(String),
    UnknownOption {
        question_id: String,
        option_id: String,
    },
}

impl fmt::Display for TransitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransitionError::NotAllowed { intent, phase } => {
                write!(f, "'{}' is not allowed while the quiz is {}", intent, phase)
            }
            TransitionError::UnknownQuestion(id) => {
                write!(f, "Question '{}' is not part of this quiz", id)
            }
            TransitionError::UnknownOption {
                question_id,
                option_id,
            } => write!(
                f,
                "Option '{}' does not belong to question '{}'",
                option_id, question_id
            ),
        }
    }
}

impl std::error::Error for TransitionError {}

fn not_allowed(intent: &Intent, phase: &Phase) -> TransitionError {
    TransitionError::NotAllowed {
        intent: intent.name(),
        phase: phase.name(),
    }
}

/// Applies `intent` to `state`.
///
/// Results that arrive for a generation other than the current one are
/// discarded and leave the state untouched.
pub fn transition(state: &QuizState, intent: Intent) -> Result<Step, TransitionError> {
    match (&state.phase, intent) {
        (Phase::NoSubject | Phase::Completed(_), Intent::SelectSubject(subject)) => {
            Ok(state.start_loading(subject))
        }

        (
            Phase::Loading { subject },
            Intent::QuestionsLoaded {
                generation,
                questions,
            },
        ) if generation == state.generation => {
            let phase = if questions.is_empty() {
                Phase::Empty { subject: *subject }
            } else {
                Phase::InProgress(QuizSession::new(*subject, questions))
            };
            Ok(Step::to(state.generation, phase))
        }
        (_, Intent::QuestionsLoaded { .. }) => Ok(Step::unchanged(state)),

        (
            Phase::InProgress(session),
            Intent::SelectAnswer {
                question_id,
                option_id,
            },
        ) => {
            let mut session = session.clone();
            session.record_answer(question_id, option_id)?;
            Ok(Step::to(state.generation, Phase::InProgress(session)))
        }
        (Phase::Completed(_), Intent::SelectAnswer { .. }) => Ok(Step::unchanged(state)),

        (Phase::InProgress(session), Intent::Advance) => {
            let mut session = session.clone();
            if !session.is_last_question() {
                session.current_index += 1;
                return Ok(Step::to(state.generation, Phase::InProgress(session)));
            }

            let score = session.finalize();
            Ok(Step {
                state: QuizState {
                    generation: state.generation,
                    phase: Phase::Completed(session),
                },
                effect: Some(Effect::RequestSuggestion {
                    generation: state.generation,
                    score,
                }),
            })
        }

        (Phase::Completed(session), Intent::Restart) => Ok(state.start_loading(session.subject)),

        (_, Intent::ChangeSubject) => Ok(Step::to(
            state.generation.wrapping_add(1),
            Phase::NoSubject,
        )),

        (
            Phase::Completed(session),
            Intent::SuggestionResolved {
                generation,
                outcome,
            },
        ) if generation == state.generation
            && session.suggestion == SuggestionStatus::Pending =>
        {
            let mut session = session.clone();
            session.suggestion = match outcome {
                Some(label) => SuggestionStatus::Ready(label),
                None => SuggestionStatus::Unavailable,
            };
            Ok(Step::to(state.generation, Phase::Completed(session)))
        }
        (_, Intent::SuggestionResolved { .. }) => Ok(Step::unchanged(state)),

        (phase, intent) => Err(not_allowed(&intent, phase)),
    }
}
