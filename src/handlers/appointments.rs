use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;

use crate::errors::AppError;
use crate::models::Appointment;
use crate::services::appointments;
use crate::state::AppState;

use super::check_auth;
use super::parse::ParseRequest;

// POST /api/appointments
pub async fn create_appointment(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(payload): Json<ParseRequest>,
) -> Result<(StatusCode, Json<Appointment>), AppError> {
    check_auth(&headers, &state.config.api_token)?;

    let outcome = state
        .parser
        .parse(&payload.text)
        .await
        .ok_or_else(|| AppError::BadRequest("text is empty".to_string()))?;

    let appointment = {
        let db = state.db()?;
        appointments::create_appointment(&db, outcome)?
    };

    Ok((StatusCode::CREATED, Json(appointment)))
}

// GET /api/appointments
pub async fn list_appointments(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Vec<Appointment>>, AppError> {
    check_auth(&headers, &state.config.api_token)?;

    let db = state.db()?;
    Ok(Json(appointments::list_appointments(&db)?))
}

// DELETE /api/appointments/:id
pub async fn delete_appointment(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    check_auth(&headers, &state.config.api_token)?;

    let db = state.db()?;
    if appointments::delete_appointment(&db, &id)? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("appointment {id}")))
    }
}
