// src/models/question.rs

use serde::{Deserialize, Serialize};

use super::subject::Subject;

/// One selectable answer of a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOption {
    pub id: String,
    pub text: String,
}

impl AnswerOption {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }
}

/// A multiple-choice question as authored in the question bank.
///
/// `correct_answer_id` must name exactly one of `options`; the bank never
/// mutates questions after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub id: String,
    pub subject: Subject,
    pub text: String,

    /// Optional illustration shown above the options.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    /// Short description of the illustration, used as its alt text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,

    pub options: Vec<AnswerOption>,
    pub correct_answer_id: String,
}

impl QuizQuestion {
    pub fn option(&self, option_id: &str) -> Option<&AnswerOption> {
        self.options.iter().find(|opt| opt.id == option_id)
    }

    pub fn correct_option(&self) -> Option<&AnswerOption> {
        self.option(&self.correct_answer_id)
    }

    pub fn is_correct(&self, option_id: Option<&str>) -> bool {
        option_id == Some(self.correct_answer_id.as_str())
    }

    /// True when exactly one option carries the correct answer id.
    pub fn has_single_correct_option(&self) -> bool {
        self.options
            .iter()
            .filter(|opt| opt.id == self.correct_answer_id)
            .count()
            == 1
    }
}

/// DTO for sending an option to the client, labelled A, B, C...
#[derive(Debug, Clone, Serialize)]
pub struct PublicOption {
    pub id: String,
    pub label: String,
    pub text: String,
}

/// DTO for sending a question to the client (excludes the correct answer).
#[derive(Debug, Clone, Serialize)]
pub struct PublicQuestion {
    pub id: String,
    pub subject: Subject,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    pub options: Vec<PublicOption>,
}

impl From<&QuizQuestion> for PublicQuestion {
    fn from(q: &QuizQuestion) -> Self {
        let options = q
            .options
            .iter()
            .zip('A'..='Z')
            .map(|(opt, letter)| PublicOption {
                id: opt.id.clone(),
                label: letter.to_string(),
                text: opt.text.clone(),
            })
            .collect();

        Self {
            id: q.id.clone(),
            subject: q.subject,
            text: q.text.clone(),
            image_url: q.image_url.clone(),
            hint: q.hint.clone(),
            options,
        }
    }
}
