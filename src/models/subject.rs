// src/models/subject.rs

use std::fmt;

use serde::{Deserialize, Serialize};

/// A quiz category. The set is closed: every subject the bank can serve is listed here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Subject {
    Math,
    English,
}

impl Subject {
    pub const ALL: [Subject; 2] = [Subject::Math, Subject::English];

    pub fn as_str(&self) -> &'static str {
        match self {
            Subject::Math => "Math",
            Subject::English => "English",
        }
    }

    /// Short blurb shown on the subject picker.
    pub fn description(&self) -> &'static str {
        match self {
            Subject::Math => "Test your numerical and problem-solving skills.",
            Subject::English => "Challenge your grammar, vocabulary, and comprehension.",
        }
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Entry of the subject picker.
#[derive(Debug, Clone, Serialize)]
pub struct SubjectInfo {
    pub name: Subject,
    pub description: &'static str,
}

impl From<Subject> for SubjectInfo {
    fn from(subject: Subject) -> Self {
        Self {
            name: subject,
            description: subject.description(),
        }
    }
}

pub fn catalogue() -> Vec<SubjectInfo> {
    Subject::ALL.into_iter().map(SubjectInfo::from).collect()
}
