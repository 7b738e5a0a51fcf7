// rest_api/tests/common/mod.rs
#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, Response, StatusCode, header},
};
use tower::ServiceExt;

use lib::config::RestApiConfig;
use lib::seed::seed_sample_data;
use lib::storage_engine::SledStorage;
use rest_api::{AppState, create_app};

pub const COOKIE_NAME: &str = "hospital_session";

pub async fn test_app() -> (Router, Arc<SledStorage>) {
    let store = Arc::new(SledStorage::temporary().unwrap());
    seed_sample_data(store.as_ref()).await.unwrap();
    let app = create_app(AppState::new(store.clone(), RestApiConfig::default()));
    (app, store)
}

pub fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

pub fn post_form(uri: &str, form: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(form.to_string())).unwrap()
}

pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub fn location(response: &Response<Body>) -> Option<&str> {
    response.headers().get(header::LOCATION).and_then(|v| v.to_str().ok())
}

pub const NOTICE_COOKIE: &str = "hospital_notice";

/// Full `Set-Cookie` header the response sent for `name`.
pub fn set_cookie(response: &Response<Body>, name: &str) -> Option<String> {
    let prefix = format!("{}=", name);
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with(&prefix))
        .map(|v| v.to_string())
}

/// The `name=value` part of the cookie the response set for `name`.
pub fn cookie_pair(response: &Response<Body>, name: &str) -> Option<String> {
    set_cookie(response, name).and_then(|v| v.split(';').next().map(|pair| pair.to_string()))
}

/// The `name=value` part of the response's session cookie, if one was set.
pub fn session_cookie(response: &Response<Body>) -> Option<String> {
    cookie_pair(response, COOKIE_NAME)
}

pub async fn register(app: &Router, username: &str, password: &str) -> Response<Body> {
    let form = format!("username={u}&email={u}%40example.com&password={p}", u = username, p = password);
    send(app, post_form("/register", &form, None)).await
}

/// Registers and logs in `username`, returning the cookie to send back.
pub async fn signed_in(app: &Router, username: &str) -> String {
    let registered = register(app, username, "pw12345").await;
    assert_eq!(registered.status(), StatusCode::SEE_OTHER);

    let form = format!("username={}&password=pw12345", username);
    let response = send(app, post_form("/login", &form, None)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    session_cookie(&response).unwrap()
}

pub fn booking_form(doctor_id: u64, date: &str) -> String {
    format!(
        "doctor_id={}&child_name=Mia&child_age=4&appointment_date={}&symptoms=cough",
        doctor_id,
        date.replace(':', "%3A")
    )
}
