use axum::{extract::State, routing::post, Json, Router};
use shared::models::auth::requests::LoginRequest;
use tracing::{debug, error};

use crate::{error::ApiError, extract::JsonBody, state::AppState};

pub fn routes() -> Router<AppState> {
    Router::new().route("/login", post(login))
}

/// Responds `200` with the token string, or `200` with `null` when the
/// credentials do not match.
async fn login(
    State(state): State<AppState>,
    JsonBody(login_data): JsonBody<LoginRequest>,
) -> Result<Json<Option<String>>, ApiError> {
    let token = state
        .auth_service
        .login(&login_data.username, &login_data.password)
        .map_err(|e| {
            error!("Failed to issue token for {}: {}", login_data.username, e);
            ApiError::from(e)
        })?;

    if token.is_some() {
        debug!("User logged in: {}", login_data.username);
    }
    Ok(Json(token))
}
