pub mod auth_service;
pub mod errors;
pub mod image_service;
pub mod prime_service;
pub mod time_service;
