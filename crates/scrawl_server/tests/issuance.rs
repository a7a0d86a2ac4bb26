use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use scrawl_server::{
    auth,
    collab::{DocumentStore, EmbeddedDocument},
    config::{Config, DeploymentMode},
    handlers::{PadState, pad_routes},
    pad_id,
};
use std::sync::Arc;
use tower::util::ServiceExt;

const KEY: &[u8] = &[7; 32];

fn config(mode: DeploymentMode) -> Config {
    Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        mode,
        signing_key: KEY.to_vec(),
        cookie_secure: None,
        cookie_http_only: None,
    }
}

fn app(config: Config) -> Router {
    let documents: Arc<dyn DocumentStore> = Arc::new(EmbeddedDocument);
    pad_routes(PadState {
        config: Arc::new(config),
        documents,
    })
}

async fn get(app: Router, uri: &str) -> axum::response::Response {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

/// Split a `Set-Cookie` value into the `auth` token and the attribute tail.
fn split_cookie(value: &str) -> (&str, &str) {
    let (pair, attrs) = value.split_once("; ").expect("cookie should have attributes");
    let token = pair.strip_prefix("auth=").expect("cookie should be named auth");
    (token, attrs)
}

#[tokio::test]
async fn root_redirects_with_fresh_pad_id() {
    let response = get(app(config(DeploymentMode::Production)), "/").await;
    assert_eq!(response.status(), StatusCode::MOVED_PERMANENTLY);

    let location = response.headers()[header::LOCATION].to_str().unwrap();
    let id = location
        .strip_prefix("/e?id=")
        .expect("location should point at /e with an id");
    assert_eq!(id.len(), pad_id::PAD_ID_LEN);
    assert!(
        id.chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    );
}

#[tokio::test]
async fn editor_path_without_id_redirects_too() {
    let response = get(app(config(DeploymentMode::Production)), "/e").await;
    assert_eq!(response.status(), StatusCode::MOVED_PERMANENTLY);
    let location = response.headers()[header::LOCATION].to_str().unwrap();
    assert!(location.starts_with("/e?id="));
}

#[tokio::test]
async fn production_cookie_is_wire_exact() {
    let response = get(app(config(DeploymentMode::Production)), "/e?id=abc123").await;
    assert_eq!(response.status(), StatusCode::OK);

    let cookie = response.headers()[header::SET_COOKIE].to_str().unwrap();
    let (token, attrs) = split_cookie(cookie);
    assert_eq!(
        attrs,
        "path=/; Max-Age=3600; Secure; HttpOnly; SameSite=Strict"
    );
    assert!(auth::authorize("abc123", token, KEY));
}

#[tokio::test]
async fn development_cookie_is_wire_exact() {
    let response = get(app(config(DeploymentMode::Development)), "/e?id=abc123").await;
    assert_eq!(response.status(), StatusCode::OK);

    let cookie = response.headers()[header::SET_COOKIE].to_str().unwrap();
    let (token, attrs) = split_cookie(cookie);
    assert_eq!(attrs, "path=/; Max-Age=3600; SameSite=Strict");
    assert!(auth::authorize("abc123", token, KEY));
}

#[tokio::test]
async fn development_http_only_override_is_independent() {
    let mut cfg = config(DeploymentMode::Development);
    cfg.cookie_http_only = Some(true);

    let response = get(app(cfg), "/e?id=abc123").await;
    let cookie = response.headers()[header::SET_COOKIE].to_str().unwrap();
    let (_, attrs) = split_cookie(cookie);
    assert_eq!(attrs, "path=/; Max-Age=3600; HttpOnly; SameSite=Strict");
}

#[tokio::test]
async fn empty_id_is_rejected_without_credential() {
    let response = get(app(config(DeploymentMode::Production)), "/e?id=").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(response.headers().get(header::SET_COOKIE).is_none());
}

#[tokio::test]
async fn editor_document_is_served_alongside_the_cookie() {
    let response = get(app(config(DeploymentMode::Production)), "/e?id=abc123").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        response.headers()[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/html")
    );

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(body.contains("<textarea"));
}
