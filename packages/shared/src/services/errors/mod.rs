pub mod auth_service_errors;
pub mod image_service_errors;
pub mod prime_service_errors;
