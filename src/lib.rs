pub mod config;
pub mod db;
pub mod errors;
pub mod extractor;
pub mod handlers;
pub mod models;
pub mod services;
pub mod state;

use std::sync::Arc;

use axum::routing::{delete, get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::config::AppConfig;
use crate::errors::AppError;
use crate::services::ai::groq::GroqProvider;
use crate::services::ai::ollama::OllamaProvider;
use crate::services::ai::{LlmExtractor, LlmProvider};
use crate::services::parsing::AppointmentParser;
use crate::state::AppState;

/// Picks the smart extractor named by `LLM_PROVIDER`; `none` keeps the
/// service on the rule-based extractor alone.
pub fn build_parser(config: &AppConfig) -> Result<AppointmentParser, AppError> {
    let llm: Box<dyn LlmProvider> = match config.llm_provider.as_str() {
        "none" | "" => {
            tracing::info!("no LLM provider configured, using rule-based extractor only");
            return Ok(AppointmentParser::rules_only());
        }
        "groq" => {
            if config.groq_api_key.is_empty() {
                return Err(AppError::Config(
                    "GROQ_API_KEY must be set when LLM_PROVIDER=groq".to_string(),
                ));
            }
            tracing::info!("using Groq LLM provider (model: {})", config.groq_model);
            Box::new(GroqProvider::new(
                config.groq_url.clone(),
                config.groq_api_key.clone(),
                config.groq_model.clone(),
                config.llm_timeout(),
            )
            .map_err(|e| AppError::Config(e.to_string()))?)
        }
        "ollama" => {
            tracing::info!("using Ollama LLM provider (url: {})", config.ollama_url);
            Box::new(OllamaProvider::new(
                config.ollama_url.clone(),
                config.ollama_model.clone(),
                config.llm_timeout(),
            )
            .map_err(|e| AppError::Config(e.to_string()))?)
        }
        other => {
            return Err(AppError::Config(format!("unknown LLM_PROVIDER: {other}")));
        }
    };

    Ok(AppointmentParser::with_smart(Box::new(LlmExtractor::new(llm))))
}

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/api/parse", post(handlers::parse::parse_text))
        .route(
            "/api/appointments",
            get(handlers::appointments::list_appointments)
                .post(handlers::appointments::create_appointment),
        )
        .route(
            "/api/appointments/:id",
            delete(handlers::appointments::delete_appointment),
        )
        .route("/api/clients", get(handlers::clients::list_clients))
        .route("/calendar/:id", get(handlers::calendar::download_ics))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
