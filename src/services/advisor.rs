// src/services/advisor.rs

use std::fmt;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::{config::Config, models::difficulty::DifficultyAdjustment};

/// Produces a difficulty suggestion for the next quiz from a score (0-100).
#[async_trait]
pub trait DifficultyAdvisor: Send + Sync {
    async fn suggest(
        &self,
        user_id: &str,
        score: f64,
    ) -> Result<DifficultyAdjustment, AdvisorError>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum AdvisorError {
    /// The request never produced an HTTP response.
    Transport(String),
    Timeout,
    /// The service answered with a non-success status.
    Status { status: u16, body: String },
    /// The body was not a chat completion with text content.
    MalformedResponse(String),
    /// The model answered, but not with exactly one of the three labels.
    OffSchema(String),
}

impl fmt::Display for AdvisorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdvisorError::Transport(msg) => write!(f, "advisor request failed: {}", msg),
            AdvisorError::Timeout => write!(f, "advisor request timed out"),
            AdvisorError::Status { status, body } => {
                write!(f, "advisor service returned {}: {}", status, body)
            }
            AdvisorError::MalformedResponse(msg) => {
                write!(f, "advisor response malformed: {}", msg)
            }
            AdvisorError::OffSchema(raw) => {
                write!(f, "advisor output is not a known label: {:?}", raw)
            }
        }
    }
}

impl std::error::Error for AdvisorError {}

impl From<reqwest::Error> for AdvisorError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AdvisorError::Timeout
        } else if err.is_decode() {
            AdvisorError::MalformedResponse(err.to_string())
        } else {
            AdvisorError::Transport(err.to_string())
        }
    }
}

/// Renders the prompt sent to the language model.
///
/// The score policy lives only in this text; the model's answer is checked
/// against the label set afterwards.
pub fn render_prompt(user_id: &str, score: f64) -> String {
    format!(
        "Based on the user's score on the previous quiz, suggest whether to INCREASE, DECREASE, or MAINTAIN the difficulty level for the next quiz.

User ID: {user_id}
Previous Score: {score}

Consider these factors:
* Scores above 80 should generally result in an INCREASE.
* Scores between 50 and 80 should generally result in MAINTAIN.
* Scores below 50 should generally result in a DECREASE.

Your response must be one of: INCREASE, DECREASE, MAINTAIN.  Respond ONLY with that single word."
    )
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    content: Option<String>,
}

/// Advisor backed by an OpenAI-compatible chat completions endpoint.
///
/// One request per call. No retries and no caching; the client-level timeout
/// bounds how long a quiz waits for its suggestion.
#[derive(Clone)]
pub struct LlmAdvisor {
    client: Client,
    endpoint: Url,
    api_key: Option<String>,
    model: String,
}

impl LlmAdvisor {
    pub fn new(client: Client, endpoint: Url, api_key: Option<String>, model: String) -> Self {
        Self {
            client,
            endpoint,
            api_key,
            model,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, AdvisorError> {
        let client = Client::builder().timeout(config.advisor_timeout).build()?;

        Ok(Self::new(
            client,
            config.llm_api_url.clone(),
            config.llm_api_key.clone(),
            config.llm_model.clone(),
        ))
    }

    /// Sends the prompt and returns the raw text of the first choice.
    async fn complete(&self, prompt: &str) -> Result<String, AdvisorError> {
        let payload = ChatRequest {
            model: &self.model,
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: 0.0,
        };

        let mut request = self.client.post(self.endpoint.clone()).json(&payload);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let res = request.send().await?;

        if !res.status().is_success() {
            let status = res.status().as_u16();
            let body = res.text().await.unwrap_or_default();
            return Err(AdvisorError::Status { status, body });
        }

        let body: ChatResponse = res.json().await?;

        body.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| AdvisorError::MalformedResponse("no message content".to_string()))
    }
}

#[async_trait]
impl DifficultyAdvisor for LlmAdvisor {
    async fn suggest(
        &self,
        user_id: &str,
        score: f64,
    ) -> Result<DifficultyAdjustment, AdvisorError> {
        let prompt = render_prompt(user_id, score);

        tracing::debug!(user_id, score, "Requesting difficulty suggestion");
        let raw = self.complete(&prompt).await?;

        let label = DifficultyAdjustment::from_model_output(&raw)
            .ok_or_else(|| AdvisorError::OffSchema(raw.trim().to_string()))?;

        tracing::info!(user_id, score, suggestion = %label, "Difficulty suggestion received");
        Ok(label)
    }
}

#[cfg(test)]
mod tests {
    use super::render_prompt;

    #[test]
    fn prompt_embeds_user_and_score() {
        let prompt = render_prompt("user_mock_001", 50.0);
        assert!(prompt.contains("User ID: user_mock_001\n"));
        assert!(prompt.contains("Previous Score: 50\n"));
        assert!(prompt.ends_with("Respond ONLY with that single word."));
    }

    #[test]
    fn prompt_keeps_fractional_scores() {
        let prompt = render_prompt("u", 100.0 / 3.0);
        assert!(prompt.contains("Previous Score: 33.33"));
    }
}
