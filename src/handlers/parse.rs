use std::sync::Arc;

use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::{ParseSource, ParsedAppointment};
use crate::state::AppState;

use super::check_auth;

#[derive(Deserialize)]
pub struct ParseRequest {
    pub text: String,
}

#[derive(Serialize)]
pub struct ParseResponse {
    pub appointment: Option<ParsedAppointment>,
    pub source: Option<ParseSource>,
}

// POST /api/parse
pub async fn parse_text(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(payload): Json<ParseRequest>,
) -> Result<Json<ParseResponse>, AppError> {
    check_auth(&headers, &state.config.api_token)?;

    let outcome = state.parser.parse(&payload.text).await;
    Ok(Json(match outcome {
        Some(o) => ParseResponse {
            appointment: Some(o.appointment),
            source: Some(o.source),
        },
        None => ParseResponse {
            appointment: None,
            source: None,
        },
    }))
}
