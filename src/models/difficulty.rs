// src/models/difficulty.rs

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// The three labels a difficulty suggestion may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DifficultyAdjustment {
    Increase,
    Decrease,
    Maintain,
}

static LABEL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(INCREASE|DECREASE|MAINTAIN)\b").expect("label pattern is valid")
});

impl DifficultyAdjustment {
    pub fn as_str(&self) -> &'static str {
        match self {
            DifficultyAdjustment::Increase => "INCREASE",
            DifficultyAdjustment::Decrease => "DECREASE",
            DifficultyAdjustment::Maintain => "MAINTAIN",
        }
    }

    /// Extracts the label from free-form model output.
    ///
    /// Matching is case-insensitive on whole words, so `"Increase."` or
    /// `"**MAINTAIN**"` are accepted. Returns `None` when no label appears or
    /// when the text names more than one distinct label.
    pub fn from_model_output(raw: &str) -> Option<Self> {
        let mut found: Option<Self> = None;

        for caps in LABEL_PATTERN.captures_iter(raw) {
            let label = match caps[1].to_ascii_uppercase().as_str() {
                "INCREASE" => DifficultyAdjustment::Increase,
                "DECREASE" => DifficultyAdjustment::Decrease,
                _ => DifficultyAdjustment::Maintain,
            };
            match found {
                Some(prev) if prev != label => return None,
                _ => found = Some(label),
            }
        }

        found
    }
}

impl fmt::Display for DifficultyAdjustment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// DTO for asking the advisor directly.
#[derive(Debug, Deserialize, Validate)]
pub struct SuggestDifficultyRequest {
    #[validate(length(min = 1, max = 64, message = "user_id must be between 1 and 64 characters."))]
    pub user_id: String,
    #[validate(range(min = 0.0, max = 100.0, message = "score must be between 0 and 100."))]
    pub score: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SuggestDifficultyResponse {
    pub suggested_difficulty_adjustment: DifficultyAdjustment,
}
