// src/main.rs

use std::sync::Arc;
use std::time::Duration;

use dotenvy::dotenv;
use quizwhiz::config::Config;
use quizwhiz::routes;
use quizwhiz::services::{advisor::LlmAdvisor, question_bank::QuestionBank};
use quizwhiz::state::AppState;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file (if present)
    dotenv().ok();

    // Load configuration from environment
    let config = Config::from_env()?;

    let file_appender = tracing_appender::rolling::daily("logs", "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let env_filter = EnvFilter::new(&config.rust_log);
    let stdout_layer = fmt::layer().with_writer(std::io::stdout).with_target(false);
    let file_layer = fmt::layer().with_writer(non_blocking).with_ansi(false);

    // Initialize Tracing (Logging)
    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    if config.llm_api_key.is_none() {
        tracing::warn!("LLM_API_KEY is not set, difficulty suggestions will likely be unavailable");
    }

    let advisor = LlmAdvisor::from_config(&config)?;
    let bank = QuestionBank::builtin();

    let state = AppState::new(config.clone(), bank, Arc::new(advisor));

    // Sweep abandoned sessions
    let sessions = state.sessions.clone();
    let idle = config.session_idle_timeout;
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(idle.clamp(Duration::from_secs(1), Duration::from_secs(60)));
        loop {
            ticker.tick().await;
            sessions.purge_idle(idle).await;
        }
    });

    // Create the Axum application router
    let app = routes::create_router(state);

    // Bind to the listening address
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Listening on {}", config.bind_addr);

    // Start the server
    axum::serve(listener, app).await?;

    Ok(())
}
