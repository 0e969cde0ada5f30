use std::sync::Arc;

use shared::config::{Config, TokenSource};
use shared::services::auth_service::AuthService;
use shared::services::image_service::ImageService;
use shared::services::time_service::TimeService;

#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService>,
    pub time_service: Arc<TimeService>,
    pub image_service: Arc<ImageService>,
    pub token_source: TokenSource,
    pub max_upload_bytes: usize,
}

impl AppState {
    pub fn from_config(config: &Config) -> Self {
        AppState {
            auth_service: Arc::new(AuthService::from_config(config)),
            time_service: Arc::new(TimeService::with_system_clock()),
            image_service: Arc::new(ImageService::default()),
            token_source: config.token_source,
            max_upload_bytes: config.max_upload_bytes,
        }
    }
}
