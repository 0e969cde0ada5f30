use axum::{extract::State, routing::get, Json, Router};
use tracing::debug;

use crate::{
    middleware::auth::{Authorized, GetTime},
    state::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new().route("/time", get(current_time))
}

async fn current_time(
    State(state): State<AppState>,
    authorized: Authorized<GetTime>,
) -> Json<i64> {
    debug!("Serving time to {}", authorized.user.user);
    Json(state.time_service.unix_timestamp())
}
