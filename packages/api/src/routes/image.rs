use axum::{
    extract::{multipart::MultipartRejection, DefaultBodyLimit, Multipart, State},
    http::header::CONTENT_TYPE,
    response::IntoResponse,
    routing::post,
    Router,
};
use shared::services::image_service::JPEG_MEDIA_TYPE;
use tracing::{debug, error};

use crate::{error::ApiError, state::AppState};

const FILE_FIELD: &str = "file";

pub fn routes(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .route("/invert", post(invert))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
}

async fn invert(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let mut multipart = multipart?;
    let (content_type, data) = loop {
        let Some(field) = multipart.next_field().await? else {
            return Err(ApiError::BadRequest(format!(
                "Missing multipart field '{}'",
                FILE_FIELD
            )));
        };
        if field.name() == Some(FILE_FIELD) {
            let content_type = field.content_type().map(str::to_owned);
            break (content_type, field.bytes().await?);
        }
    };
    debug!(
        "Received {} bytes with content type {:?}",
        data.len(),
        content_type
    );

    // Decoding and encoding are CPU bound.
    let image_service = state.image_service.clone();
    let inverted = tokio::task::spawn_blocking(move || {
        image_service.invert_jpeg(content_type.as_deref(), &data)
    })
    .await
    .map_err(|e| {
        error!("Image task failed: {}", e);
        ApiError::Internal(e.to_string())
    })??;

    Ok(([(CONTENT_TYPE, JPEG_MEDIA_TYPE)], inverted))
}
