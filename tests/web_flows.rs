//! End-to-end web flow tests.
//!
//! These drive the full router in process: submit forms, follow the
//! post-mutation redirects with the flash cookie in hand, and read
//! both the HTML page and the JSON mirror, the way a browser and an
//! API consumer would.

mod common;

use axum::Router;
use axum::http::{StatusCode, header};
use rstest::rstest;

use common::{
    app, body_json, body_string, flash_cookie, get, get_with_cookie, post, post_form,
    post_form_forwarded, send, unreachable_app,
};

/// Creates a todo through the form endpoint and returns its id.
async fn create_todo(app: &Router, name: &str) -> String {
    let response = send(
        app,
        post_form(
            "/submittodoitem",
            &format!("item_name={name}&item_description=errand"),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let listing = body_json(send(app, get("/api")).await).await;
    listing["todos"][0]["id"]
        .as_str()
        .expect("todo has an id")
        .to_string()
}

// =============================================================================
// Health and Listing Surface
// =============================================================================

/// The health report answers on the bare root with a fresh store probe.
#[rstest]
#[tokio::test]
async fn health_reports_connected_store() {
    let app = app();

    let response = send(&app, get("/")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let report = body_json(response).await;
    assert_eq!(report["status"], "ok");
    assert_eq!(report["database"], "connected");
    assert!(report["version"].is_string());
}

/// A fresh store renders the empty state instead of an empty table.
#[rstest]
#[tokio::test]
async fn listing_page_renders_empty_state() {
    let app = app();

    let response = send(&app, get("/todos")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_string(response).await;
    assert!(html.contains("No todos yet"));
}

/// Later submissions appear before earlier ones on both surfaces.
#[rstest]
#[tokio::test]
async fn submitted_todos_list_newest_first() {
    let app = app();
    for name in ["first", "second", "third"] {
        create_todo(&app, name).await;
    }

    let listing = body_json(send(&app, get("/api")).await).await;
    let names: Vec<&str> = listing["todos"]
        .as_array()
        .expect("todos is an array")
        .iter()
        .map(|todo| todo["name"].as_str().expect("name is a string"))
        .collect();
    assert_eq!(names, ["third", "second", "first"]);

    let html = body_string(send(&app, get("/todos")).await).await;
    for name in ["first", "second", "third"] {
        assert!(html.contains(name));
    }
}

// =============================================================================
// Create Flow
// =============================================================================

/// A valid submission redirects to the listing and flashes success.
#[rstest]
#[tokio::test]
async fn submit_redirects_with_success_flash() {
    let app = app();

    let response = send(
        &app,
        post_form("/submittodoitem", "item_name=groceries&item_description=milk"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "/todos"
    );

    let cookie = flash_cookie(&response);
    let html = body_string(send(&app, get_with_cookie("/todos", &cookie)).await).await;
    assert!(html.contains("Todo item added successfully!"));
}

/// A blank field rejects the submission and stores nothing.
#[rstest]
#[case("item_name=&item_description=milk")]
#[case("item_name=groceries&item_description=")]
#[case("item_description=milk")]
#[tokio::test]
async fn blank_submission_is_rejected_with_flash(#[case] body: &str) {
    let app = app();

    let response = send(&app, post_form("/submittodoitem", body)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let cookie = flash_cookie(&response);
    let html = body_string(send(&app, get_with_cookie("/todos", &cookie)).await).await;
    assert!(html.contains("Both item name and description are required!"));

    let listing = body_json(send(&app, get("/api")).await).await;
    assert_eq!(listing["metadata"]["total_todos"], 0);
}

/// The flash banner shows on the render that consumes it and never again.
#[rstest]
#[tokio::test]
async fn flash_banner_shows_exactly_once() {
    let app = app();

    let response = send(
        &app,
        post_form("/submittodoitem", "item_name=groceries&item_description=milk"),
    )
    .await;
    let cookie = flash_cookie(&response);

    let first_render = send(&app, get_with_cookie("/todos", &cookie)).await;
    let removal = flash_cookie(&first_render);
    let html = body_string(first_render).await;
    assert!(html.contains("Todo item added successfully!"));

    let second_render = body_string(send(&app, get_with_cookie("/todos", &removal)).await).await;
    assert!(!second_render.contains("Todo item added successfully!"));
}

// =============================================================================
// Unreachable Store
// =============================================================================

/// The health report stays 200 and flags the dead store.
#[rstest]
#[tokio::test]
async fn health_reports_disconnected_store() {
    let app = unreachable_app().await;

    let response = send(&app, get("/")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let report = body_json(response).await;
    assert_eq!(report["status"], "ok");
    assert_eq!(report["database"], "disconnected");
}

/// The JSON mirror refuses with an error body rather than serving an
/// empty listing that looks like real data.
#[rstest]
#[tokio::test]
async fn api_rejects_requests_while_store_unreachable() {
    let app = unreachable_app().await;

    let response = send(&app, get("/api")).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = body_json(response).await;
    assert_eq!(body["error"], "Database unavailable");
}

// =============================================================================
// Toggle Flow
// =============================================================================

/// Two toggles restore the original state, announcing each transition.
#[rstest]
#[tokio::test]
async fn toggle_twice_restores_and_announces_each_state() {
    let app = app();
    let id = create_todo(&app, "groceries").await;

    let response = send(&app, post(&format!("/todos/{id}/toggle"))).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let cookie = flash_cookie(&response);
    let html = body_string(send(&app, get_with_cookie("/todos", &cookie)).await).await;
    assert!(html.contains("Todo marked as completed!"));

    let listing = body_json(send(&app, get("/api")).await).await;
    assert_eq!(listing["todos"][0]["completed"], true);

    let response = send(&app, post(&format!("/todos/{id}/toggle"))).await;
    let cookie = flash_cookie(&response);
    let html = body_string(send(&app, get_with_cookie("/todos", &cookie)).await).await;
    assert!(html.contains("Todo marked as incomplete!"));

    let listing = body_json(send(&app, get("/api")).await).await;
    assert_eq!(listing["todos"][0]["completed"], false);
}

/// Toggling an id that never existed reports the failure as a flash.
#[rstest]
#[tokio::test]
async fn toggle_of_unknown_id_reports_failure() {
    let app = app();

    let response = send(&app, post("/todos/0123456789abcdef01234567/toggle")).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let cookie = flash_cookie(&response);
    let html = body_string(send(&app, get_with_cookie("/todos", &cookie)).await).await;
    assert!(html.contains("Failed to update todo. It may have been deleted."));
}

// =============================================================================
// Delete Flow
// =============================================================================

/// Deletion succeeds once; the second attempt reports the todo missing.
#[rstest]
#[tokio::test]
async fn delete_removes_todo_and_second_attempt_reports_missing() {
    let app = app();
    let id = create_todo(&app, "groceries").await;

    let response = send(&app, post(&format!("/todos/{id}/delete"))).await;
    let cookie = flash_cookie(&response);
    let html = body_string(send(&app, get_with_cookie("/todos", &cookie)).await).await;
    assert!(html.contains("Todo item deleted successfully!"));

    let listing = body_json(send(&app, get("/api")).await).await;
    assert_eq!(listing["metadata"]["total_todos"], 0);

    let response = send(&app, post(&format!("/todos/{id}/delete"))).await;
    let cookie = flash_cookie(&response);
    let html = body_string(send(&app, get_with_cookie("/todos", &cookie)).await).await;
    assert!(html.contains("Failed to delete todo. It may have already been removed."));
}

// =============================================================================
// Client Address Recording
// =============================================================================

/// The first hop of x-forwarded-for is recorded as the origin.
#[rstest]
#[tokio::test]
async fn forwarded_header_is_recorded_as_origin() {
    let app = app();

    send(
        &app,
        post_form_forwarded(
            "/submittodoitem",
            "item_name=groceries&item_description=milk",
            "203.0.113.7, 10.0.0.1",
        ),
    )
    .await;

    let listing = body_json(send(&app, get("/api")).await).await;
    assert_eq!(listing["todos"][0]["ip_address"], "203.0.113.7");
}

/// Without a forwarding header or a peer address the origin is unknown.
#[rstest]
#[tokio::test]
async fn unforwarded_submission_records_unknown_origin() {
    let app = app();
    create_todo(&app, "groceries").await;

    let listing = body_json(send(&app, get("/api")).await).await;
    assert_eq!(listing["todos"][0]["ip_address"], "unknown");
}

// =============================================================================
// JSON Mirror
// =============================================================================

/// Metadata counts the listing and names the storage backend.
#[rstest]
#[tokio::test]
async fn api_metadata_mirrors_listing() {
    let app = app();
    let id = create_todo(&app, "groceries").await;

    let listing = body_json(send(&app, get("/api")).await).await;
    assert_eq!(listing["metadata"]["total_todos"], 1);
    assert_eq!(listing["metadata"]["database"], "in-memory");
    assert!(listing["metadata"]["version"].is_string());
    assert!(listing["metadata"]["last_updated"].is_string());
    assert!(listing["todos"][0].get("updated_at").is_none());

    send(&app, post(&format!("/todos/{id}/toggle"))).await;

    let listing = body_json(send(&app, get("/api")).await).await;
    assert!(listing["todos"][0]["updated_at"].is_string());
}
