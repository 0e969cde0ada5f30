use axum::{routing::get, Json, Router};
use shared::services::prime_service;
use tracing::debug;

use crate::{error::ApiError, extract::PathParam, state::AppState};

pub fn routes() -> Router<AppState> {
    Router::new().route("/prime/{num}", get(is_prime))
}

async fn is_prime(PathParam(num): PathParam<String>) -> Result<Json<bool>, ApiError> {
    let prime = prime_service::is_prime(&num)?;
    debug!("Primality of {}: {}", num, prime);
    Ok(Json(prime))
}
