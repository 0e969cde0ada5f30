use lambda_http::{run, Error};
use std::env::{self, set_var};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use api::state::AppState;
use shared::config::Config;

// Set by the Lambda runtime; absent when running as a plain server.
const LAMBDA_RUNTIME_VAR: &str = "AWS_LAMBDA_RUNTIME_API";

#[tokio::main]
async fn main() -> Result<(), Error> {
    let on_lambda = env::var(LAMBDA_RUNTIME_VAR).is_ok();

    if on_lambda {
        set_var("AWS_LAMBDA_HTTP_IGNORE_STAGE_IN_PATH", "true");
        // required to enable CloudWatch error logging by the runtime
        lambda_http::tracing::init_default_subscriber();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .init();
    }

    let config = Config::from_env().map_err(|e| {
        error!("Failed to load configuration: {}", e);
        e
    })?;
    info!("Loaded configuration: {:?}", config);

    let app = api::create_app(AppState::from_config(&config));

    if on_lambda {
        return run(app).await;
    }

    let listener = tokio::net::TcpListener::bind(&config.bind_address)
        .await
        .map_err(|e| {
            error!("Failed to bind server to {}: {}", config.bind_address, e);
            e
        })?;
    info!("Listening on http://{}", config.bind_address);

    axum::serve(listener, app).await?;
    Ok(())
}
