use std::sync::Arc;

use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;

use crate::db::queries;
use crate::errors::AppError;
use crate::models::Client;
use crate::state::AppState;

use super::check_auth;

// GET /api/clients
pub async fn list_clients(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Vec<Client>>, AppError> {
    check_auth(&headers, &state.config.api_token)?;

    let db = state.db()?;
    Ok(Json(queries::load_clients(&db)?))
}
