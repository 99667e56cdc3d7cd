// src/models/session.rs

use serde::Deserialize;
use validator::Validate;

use super::subject::Subject;

/// DTO for picking a subject.
#[derive(Debug, Deserialize, Validate)]
pub struct SelectSubjectRequest {
    pub subject: Subject,
}

/// DTO for answering a question of the running quiz.
#[derive(Debug, Deserialize, Validate)]
pub struct SelectAnswerRequest {
    #[validate(length(min = 1, max = 64))]
    pub question_id: String,
    #[validate(length(min = 1, max = 64))]
    pub option_id: String,
}
