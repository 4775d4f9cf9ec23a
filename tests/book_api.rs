//! Integration tests for the book HTTP API.

use std::path::PathBuf;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use bookshelf::catalog::BookStore;
use bookshelf::http_server::{HttpServer, HttpServerConfig};

// ============================================================================
// Test Utilities
// ============================================================================

fn api_only_config() -> HttpServerConfig {
    HttpServerConfig {
        static_dir: PathBuf::from("/nonexistent/bookshelf/static"),
        ..Default::default()
    }
}

fn test_app() -> Router {
    HttpServer::new(api_only_config(), BookStore::new()).router()
}

fn seeded_app() -> Router {
    HttpServer::new(api_only_config(), BookStore::with_sample_books()).router()
}

fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn empty_request(method: Method, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };
    (status, json)
}

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
async fn test_healthz() {
    let app = test_app();
    let (status, body) = send(&app, empty_request(Method::GET, "/healthz")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok"}));
}

// ============================================================================
// List
// ============================================================================

#[tokio::test]
async fn test_list_empty() {
    let app = test_app();
    let (status, body) = send(&app, empty_request(Method::GET, "/api/books")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_list_seeded_catalog() {
    let app = seeded_app();
    let (status, body) = send(&app, empty_request(Method::GET, "/api/books")).await;

    assert_eq!(status, StatusCode::OK);
    let books = body.as_array().unwrap();
    assert_eq!(books.len(), 3);
    assert_eq!(books[0]["title"], "To Kill a Mockingbird");
    assert_eq!(books[1]["author"], "George Orwell");
    assert_eq!(books[2]["year"], 1925);
    assert_eq!(books[2]["isbn"], "978-0743273565");
}

// ============================================================================
// Full Lifecycle
// ============================================================================

#[tokio::test]
async fn test_dune_lifecycle() {
    let app = test_app();

    let (status, created) = send(
        &app,
        json_request(
            Method::POST,
            "/api/books",
            json!({"title": "Dune", "author": "Herbert"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["title"], "Dune");
    assert_eq!(created["author"], "Herbert");
    assert_eq!(created["year"], Value::Null);
    assert_eq!(created["isbn"], "");

    let id = created["id"].as_str().unwrap().to_string();
    assert!(!id.is_empty());
    let uri = format!("/api/books/{}", id);

    let (status, fetched) = send(&app, empty_request(Method::GET, &uri)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let (status, updated) = send(
        &app,
        json_request(
            Method::PUT,
            &uri,
            json!({"title": "Dune", "author": "Herbert", "year": "1965"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["id"], id.as_str());
    assert_eq!(updated["year"], 1965);

    let (status, deleted) = send(&app, empty_request(Method::DELETE, &uri)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted["message"], "Book deleted successfully");
    assert_eq!(deleted["book"], updated);

    let (status, body) = send(&app, empty_request(Method::GET, &uri)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"message": "Book not found"}));
}

// ============================================================================
// Not Found
// ============================================================================

#[tokio::test]
async fn test_get_unknown_book() {
    let app = seeded_app();
    let (status, body) = send(&app, empty_request(Method::GET, "/api/books/doesnotexist")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"message": "Book not found"}));
}

#[tokio::test]
async fn test_update_unknown_book() {
    let app = test_app();
    let (status, body) = send(
        &app,
        json_request(
            Method::PUT,
            "/api/books/doesnotexist",
            json!({"title": "Dune", "author": "Herbert"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"message": "Book not found"}));
}

#[tokio::test]
async fn test_update_unknown_book_with_invalid_body_is_not_found() {
    let app = test_app();
    let (status, _) = send(
        &app,
        json_request(Method::PUT, "/api/books/doesnotexist", json!({"title": ""})),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_unknown_book() {
    let app = test_app();
    let (status, body) = send(&app, empty_request(Method::DELETE, "/api/books/nope")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"message": "Book not found"}));
}

// ============================================================================
// Validation
// ============================================================================

#[tokio::test]
async fn test_create_requires_title_and_author() {
    let app = test_app();

    for body in [
        json!({"author": "Herbert"}),
        json!({"title": "Dune"}),
        json!({"title": "", "author": "Herbert"}),
        json!({"title": "Dune", "author": null}),
        json!({}),
    ] {
        let (status, response) = send(&app, json_request(Method::POST, "/api/books", body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(response, json!({"message": "Title and author are required"}));
    }

    let (_, books) = send(&app, empty_request(Method::GET, "/api/books")).await;
    assert_eq!(books, json!([]));
}

#[tokio::test]
async fn test_update_with_missing_author_leaves_record_unchanged() {
    let app = seeded_app();
    let (_, books) = send(&app, empty_request(Method::GET, "/api/books")).await;
    let original = books[0].clone();
    let uri = format!("/api/books/{}", original["id"].as_str().unwrap());

    let (status, body) = send(
        &app,
        json_request(Method::PUT, &uri, json!({"title": "Changed", "author": ""})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"message": "Title and author are required"}));

    let (_, fetched) = send(&app, empty_request(Method::GET, &uri)).await;
    assert_eq!(fetched, original);
}

#[tokio::test]
async fn test_create_normalizes_year_and_isbn() {
    let app = test_app();

    let (status, created) = send(
        &app,
        json_request(
            Method::POST,
            "/api/books",
            json!({"title": "Emma", "author": "Austen", "year": 1815, "isbn": "978-0141439587"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["year"], 1815);
    assert_eq!(created["isbn"], "978-0141439587");

    let (_, created) = send(
        &app,
        json_request(
            Method::POST,
            "/api/books",
            json!({"title": "Emma", "author": "Austen", "year": "", "isbn": null}),
        ),
    )
    .await;
    assert_eq!(created["year"], Value::Null);
    assert_eq!(created["isbn"], "");
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let app = test_app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/books")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"]
        .as_str()
        .unwrap()
        .starts_with("Invalid request body"));
}

#[tokio::test]
async fn test_wrongly_typed_field_is_bad_request() {
    let app = test_app();
    let (status, body) = send(
        &app,
        json_request(Method::POST, "/api/books", json!({"title": 5, "author": "X"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].is_string());
}

// ============================================================================
// Counting
// ============================================================================

#[tokio::test]
async fn test_list_reflects_creates_and_deletes() {
    let app = test_app();
    let mut ids = Vec::new();

    for i in 0..5 {
        let (_, created) = send(
            &app,
            json_request(
                Method::POST,
                "/api/books",
                json!({"title": format!("Volume {}", i), "author": "Anon"}),
            ),
        )
        .await;
        ids.push(created["id"].as_str().unwrap().to_string());
    }

    for id in &ids[..2] {
        let (status, _) = send(&app, empty_request(Method::DELETE, &format!("/api/books/{}", id))).await;
        assert_eq!(status, StatusCode::OK);
    }

    let (_, books) = send(&app, empty_request(Method::GET, "/api/books")).await;
    let listed: Vec<_> = books
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["id"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(listed, ids[2..].to_vec());
}

// ============================================================================
// CORS and Static Files
// ============================================================================

#[tokio::test]
async fn test_cors_allows_any_origin() {
    let app = test_app();
    let request = Request::builder()
        .method(Method::GET)
        .uri("/api/books")
        .header(header::ORIGIN, "http://example.com")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        "*"
    );
}

#[tokio::test]
async fn test_root_serves_static_index() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join("index.html"), "<h1>Library</h1>").unwrap();

    let config = HttpServerConfig {
        static_dir: tmp.path().to_path_buf(),
        ..Default::default()
    };
    let app = HttpServer::new(config, BookStore::new()).router();

    let response = app
        .clone()
        .oneshot(empty_request(Method::GET, "/"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&body[..], b"<h1>Library</h1>");

    // API routes still take precedence over the static fallback
    let (status, books) = send(&app, empty_request(Method::GET, "/api/books")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(books, json!([]));
}

// ============================================================================
// Internal Errors
// ============================================================================

#[tokio::test]
async fn test_poisoned_store_returns_internal_error() {
    let server = HttpServer::new(api_only_config(), BookStore::with_sample_books());
    let state = server.state();
    let app = server.router();

    let poisoner = std::thread::spawn(move || {
        let _guard = state.write().unwrap();
        panic!("writer crashed while holding the catalog lock");
    });
    assert!(poisoner.join().is_err());

    let (status, body) = send(&app, empty_request(Method::GET, "/api/books")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"message": "Internal server error"}));
}
