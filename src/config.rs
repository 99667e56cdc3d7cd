// src/config.rs

use std::env;
use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use dotenvy::dotenv;
use url::Url;

/// Number of questions in one quiz.
pub const QUESTIONS_PER_QUIZ: usize = 10;

/// Placeholder user id sent to the advisor for every quiz.
pub const DEFAULT_QUIZ_USER_ID: &str = "user_mock_001";

pub const DEFAULT_LLM_API_URL: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_LLM_MODEL: &str = "gpt-4o-mini";

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub rust_log: String,
    pub llm_api_url: Url,
    pub llm_api_key: Option<String>,
    pub llm_model: String,
    pub advisor_timeout: Duration,
    pub quiz_user_id: String,
    pub questions_per_quiz: usize,
    pub visitor_count_path: PathBuf,
    pub session_idle_timeout: Duration,
}

/// A variable was present but could not be parsed.
#[derive(Debug)]
pub struct ConfigError {
    pub key: &'static str,
    pub reason: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid {}: {}", self.key, self.reason)
    }
}

impl std::error::Error for ConfigError {}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            rust_log: "info".to_string(),
            llm_api_url: Url::parse(DEFAULT_LLM_API_URL).expect("default LLM url is valid"),
            llm_api_key: None,
            llm_model: DEFAULT_LLM_MODEL.to_string(),
            advisor_timeout: Duration::from_secs(15),
            quiz_user_id: DEFAULT_QUIZ_USER_ID.to_string(),
            questions_per_quiz: QUESTIONS_PER_QUIZ,
            visitor_count_path: PathBuf::from("visitor-count.json"),
            session_idle_timeout: Duration::from_secs(30 * 60),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();

        let defaults = Self::default();

        let bind_addr = parse_var("BIND_ADDR")?.unwrap_or(defaults.bind_addr);

        let rust_log = env::var("RUST_LOG").unwrap_or(defaults.rust_log);

        let llm_api_url = parse_var("LLM_API_URL")?.unwrap_or(defaults.llm_api_url);

        let llm_api_key = env::var("LLM_API_KEY").ok().filter(|key| !key.trim().is_empty());

        let llm_model = env::var("LLM_MODEL").unwrap_or(defaults.llm_model);

        let advisor_timeout = parse_var::<u64>("ADVISOR_TIMEOUT_SECS")?
            .map(Duration::from_secs)
            .unwrap_or(defaults.advisor_timeout);

        let quiz_user_id = env::var("QUIZ_USER_ID").unwrap_or(defaults.quiz_user_id);

        let questions_per_quiz =
            parse_var("QUESTIONS_PER_QUIZ")?.unwrap_or(defaults.questions_per_quiz);

        let visitor_count_path = env::var("VISITOR_COUNT_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.visitor_count_path);

        let session_idle_timeout = parse_var::<u64>("SESSION_IDLE_SECS")?
            .map(Duration::from_secs)
            .unwrap_or(defaults.session_idle_timeout);

        let config = Self {
            bind_addr,
            rust_log,
            llm_api_url,
            llm_api_key,
            llm_model,
            advisor_timeout,
            quiz_user_id,
            questions_per_quiz,
            visitor_count_path,
            session_idle_timeout,
        };
        config.validate()?;

        Ok(config)
    }

    /// Rejects counts and durations that would make the service unusable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.questions_per_quiz == 0 {
            return Err(ConfigError {
                key: "QUESTIONS_PER_QUIZ",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.advisor_timeout.is_zero() {
            return Err(ConfigError {
                key: "ADVISOR_TIMEOUT_SECS",
                reason: "must be at least 1 second".to_string(),
            });
        }
        if self.session_idle_timeout.is_zero() {
            return Err(ConfigError {
                key: "SESSION_IDLE_SECS",
                reason: "must be at least 1 second".to_string(),
            });
        }
        Ok(())
    }
}

/// Reads and parses `key`; an unset variable is `Ok(None)`.
fn parse_var<T>(key: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw.trim().parse::<T>().map(Some).map_err(|e| ConfigError {
            key,
            reason: e.to_string(),
        }),
        Err(_) => Ok(None),
    }
}
