//! Common test utilities for the web flow tests.
//!
//! Every test drives the full router in process over the in-memory
//! repository, so the suite needs no running database. Flash cookies
//! are carried between requests by hand, the way a browser would.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, Response, header};
use axum_extra::extract::cookie::Key;
use http_body_util::BodyExt;
use tower::ServiceExt;

use todo_app::api::{AppState, create_router};
use todo_app::infrastructure::{InMemoryTodoRepository, MongoTodoRepository, TodoStore};

/// URI pointing at a closed port, with driver timeouts tightened so
/// every probe fails fast instead of hanging the suite.
const UNREACHABLE_URI: &str =
    "mongodb://127.0.0.1:9/?serverSelectionTimeoutMS=100&connectTimeoutMS=100";

/// Builds the application router over a fresh in-memory repository.
///
/// The signing key lives in the router state, so requests that share a
/// flash cookie must go through the same `Router` value.
pub fn app() -> Router {
    let state = AppState::new(
        Arc::new(InMemoryTodoRepository::new()),
        "in-memory".to_string(),
        Key::generate(),
    );

    create_router(state)
}

/// Builds the router over a Mongo repository whose store cannot reach
/// a server, for the degraded-surface tests.
pub async fn unreachable_app() -> Router {
    let store = TodoStore::connect(UNREACHABLE_URI, "todo_db").await;
    let state = AppState::new(
        Arc::new(MongoTodoRepository::new(store)),
        "todo_db".to_string(),
        Key::generate(),
    );

    create_router(state)
}

/// Sends one request through a clone of the router.
pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone()
        .oneshot(request)
        .await
        .expect("router is infallible")
}

pub fn get(path: &str) -> Request<Body> {
    Request::builder()
        .uri(path)
        .body(Body::empty())
        .expect("request builds")
}

pub fn get_with_cookie(path: &str, cookie: &str) -> Request<Body> {
    Request::builder()
        .uri(path)
        .header(header::COOKIE, cookie)
        .body(Body::empty())
        .expect("request builds")
}

/// POST without a body, for the toggle and delete forms.
pub fn post(path: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(path)
        .body(Body::empty())
        .expect("request builds")
}

/// POST with an urlencoded form body.
pub fn post_form(path: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(path)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_owned()))
        .expect("request builds")
}

/// POST with an urlencoded form body and a spoofed forwarding header.
pub fn post_form_forwarded(path: &str, body: &str, forwarded_for: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(path)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .header("x-forwarded-for", forwarded_for)
        .body(Body::from(body.to_owned()))
        .expect("request builds")
}

/// Extracts the `name=value` pair of the cookie set by `response`.
///
/// Mutations always set the flash cookie; the render that consumes it
/// sets the removal in the same slot.
pub fn flash_cookie(response: &Response<Body>) -> String {
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("response sets a cookie")
        .to_str()
        .expect("cookie is ascii");

    set_cookie
        .split(';')
        .next()
        .expect("set-cookie has a value")
        .to_string()
}

pub async fn body_string(response: Response<Body>) -> String {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body collects")
        .to_bytes();

    String::from_utf8(bytes.to_vec()).expect("body is utf-8")
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body collects")
        .to_bytes();

    serde_json::from_slice(&bytes).expect("body is json")
}
