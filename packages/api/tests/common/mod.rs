#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Request, Response},
    Router,
};
use serde::de::DeserializeOwned;
use shared::config::{Config, TokenSource};
use shared::models::auth::claims::TokenClaims;
use shared::services::auth_service::AuthService;
use std::collections::HashMap;
use tower::ServiceExt;

pub const USERNAME: &str = "EXAMPLE_USER";
pub const PASSWORD: &str = "correct horse battery staple";
pub const SECRET: &str = "integration-test-secret";

pub fn test_config(token_source: TokenSource) -> Config {
    let vars: HashMap<&str, String> = HashMap::from([
        ("AUTH_USERNAME", USERNAME.to_string()),
        ("AUTH_PASSWORD", PASSWORD.to_string()),
        ("JWT_SECRET", SECRET.to_string()),
        (
            "TOKEN_SOURCE",
            match token_source {
                TokenSource::Bearer => "bearer".to_string(),
                TokenSource::Header => "header".to_string(),
            },
        ),
    ]);

    Config::from_lookup(|name| vars.get(name).cloned()).expect("test config is complete")
}

pub fn create_test_app(token_source: TokenSource) -> Router {
    api::create_app(api::state::AppState::from_config(&test_config(token_source)))
}

/// Signs arbitrary claims with the test secret.
pub fn sign(claims: &TokenClaims) -> String {
    AuthService::from_config(&test_config(TokenSource::Bearer))
        .encode_token(claims)
        .unwrap()
}

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

pub async fn body_json<T: DeserializeOwned>(response: Response<Body>) -> T {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

pub fn login_request(username: &str, password: &str) -> Request<Body> {
    let body = serde_json::json!({ "username": username, "password": password });
    Request::builder()
        .method("POST")
        .uri("/login")
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap()
}

pub fn time_request(header: Option<(&str, &str)>) -> Request<Body> {
    let mut builder = Request::builder().uri("/time");
    if let Some((name, value)) = header {
        builder = builder.header(name, value);
    }
    builder.body(Body::empty()).unwrap()
}

pub fn multipart_request(
    field_name: &str,
    content_type: Option<&str>,
    data: &[u8],
) -> Request<Body> {
    let boundary = "primetime-test-boundary";
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"upload.jpg\"\r\n",
            field_name
        )
        .as_bytes(),
    );
    if let Some(content_type) = content_type {
        body.extend_from_slice(format!("Content-Type: {}\r\n", content_type).as_bytes());
    }
    body.extend_from_slice(b"\r\n");
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{}--\r\n", boundary).as_bytes());

    Request::builder()
        .method("POST")
        .uri("/invert")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={}", boundary),
        )
        .body(Body::from(body))
        .unwrap()
}
