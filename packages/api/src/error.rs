use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use shared::services::errors::{
    auth_service_errors::AuthServiceError, image_service_errors::ImageServiceError,
    prime_service_errors::PrimeServiceError,
};
use tracing::{error, warn};

#[derive(Debug)]
pub enum ApiError {
    AuthService(AuthServiceError),
    ImageService(ImageServiceError),
    PrimeService(PrimeServiceError),
    Multipart(MultipartError),
    /// An axum extractor refused the request before the handler ran.
    Rejected { status: StatusCode, detail: String },
    /// No token was presented.
    Unauthenticated,
    /// A token was presented but could not be verified.
    MalformedToken,
    /// The token verified but does not grant the required capability.
    InsufficientPrivilege,
    BadRequest(String),
    Internal(String),
}

/// Error response body for API endpoints
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}

impl From<AuthServiceError> for ApiError {
    fn from(error: AuthServiceError) -> Self {
        match error {
            AuthServiceError::InvalidToken => ApiError::MalformedToken,
            other => ApiError::AuthService(other),
        }
    }
}

impl From<ImageServiceError> for ApiError {
    fn from(error: ImageServiceError) -> Self {
        ApiError::ImageService(error)
    }
}

impl From<PrimeServiceError> for ApiError {
    fn from(error: PrimeServiceError) -> Self {
        ApiError::PrimeService(error)
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::Rejected {
            status: rejection.status(),
            detail: rejection.body_text(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Rejected {
            status: rejection.status(),
            detail: rejection.body_text(),
        }
    }
}

impl From<MultipartRejection> for ApiError {
    fn from(rejection: MultipartRejection) -> Self {
        ApiError::Rejected {
            status: rejection.status(),
            detail: rejection.body_text(),
        }
    }
}

impl From<MultipartError> for ApiError {
    fn from(error: MultipartError) -> Self {
        ApiError::Multipart(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            ApiError::Unauthenticated => {
                (StatusCode::UNAUTHORIZED, "Not authenticated".to_string())
            }
            ApiError::MalformedToken | ApiError::AuthService(AuthServiceError::InvalidToken) => {
                (StatusCode::BAD_REQUEST, "Invalid token".to_string())
            }
            ApiError::InsufficientPrivilege => {
                (StatusCode::FORBIDDEN, "Insufficient privileges".to_string())
            }
            ApiError::AuthService(AuthServiceError::JwtError(msg)) => {
                error!("Token handling failed: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }

            ApiError::ImageService(err @ ImageServiceError::UnsupportedMediaType) => {
                (StatusCode::UNSUPPORTED_MEDIA_TYPE, err.to_string())
            }
            ApiError::ImageService(
                err @ (ImageServiceError::Undecodable | ImageServiceError::TooLarge { .. }),
            ) => (StatusCode::UNPROCESSABLE_ENTITY, err.to_string()),
            ApiError::ImageService(err @ ImageServiceError::EncodeError(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }

            ApiError::PrimeService(err @ PrimeServiceError::NotAnInteger(_)) => {
                (StatusCode::BAD_REQUEST, err.to_string())
            }
            ApiError::PrimeService(err @ PrimeServiceError::OutOfRange { .. }) => {
                (StatusCode::UNPROCESSABLE_ENTITY, err.to_string())
            }

            ApiError::Rejected { status, detail } => {
                warn!("Rejected request: {}", detail);
                (status, detail)
            }
            ApiError::Multipart(err) => {
                warn!("Rejected multipart upload: {}", err.body_text());
                (err.status(), err.body_text())
            }
            ApiError::BadRequest(detail) => (StatusCode::BAD_REQUEST, detail),
            ApiError::Internal(msg) => {
                error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorResponse { detail })).into_response()
    }
}
