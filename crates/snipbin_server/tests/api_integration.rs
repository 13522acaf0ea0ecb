//! Integration tests for the snipbin HTTP API.

mod support;

use axum::http::StatusCode;
use serde_json::{json, Value};
use support::{memory_server, memory_server_with_max, redb_server};

const ID_ALPHABET: &str = "abcdefghijkmnpqrstuvwxyz23456789";

fn created_id(body: &Value) -> String {
    body["id"].as_str().expect("id field").to_string()
}

#[tokio::test]
async fn paste_lifecycle() {
    let server = memory_server();

    let create = server
        .post("/api/paste")
        .json(&json!({
            "content": "fn main() { println!(\"hi\"); }",
            "language": "rust",
            "expiration": "1h"
        }))
        .await;
    create.assert_status(StatusCode::OK);

    let id = created_id(&create.json::<Value>());
    assert_eq!(id.len(), 5);
    assert!(id.chars().all(|c| ID_ALPHABET.contains(c)), "id: {}", id);

    let fetched = server.get(&format!("/api/paste/{}", id)).await;
    fetched.assert_status(StatusCode::OK);
    let paste = fetched.json::<Value>();
    assert_eq!(paste["content"], "fn main() { println!(\"hi\"); }");
    assert_eq!(paste["language"], "rust");
    assert!(paste["expires_at"].is_string());
    assert!(paste["created_at"].is_string());

    let raw = server.get(&format!("/api/paste/{}/raw", id)).await;
    raw.assert_status(StatusCode::OK);
    raw.assert_header("content-type", "text/plain; charset=utf-8");
    assert_eq!(raw.text(), "fn main() { println!(\"hi\"); }");

    let deleted = server.delete(&format!("/api/paste/{}", id)).await;
    deleted.assert_status(StatusCode::OK);
    assert_eq!(deleted.json::<Value>()["success"], true);

    let gone = server.get(&format!("/api/paste/{}", id)).await;
    gone.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unknown_language_and_expiration_normalize() {
    let server = memory_server();

    let create = server
        .post("/api/paste")
        .json(&json!({
            "content": "plain words",
            "language": "KLINGON",
            "expiration": "2w"
        }))
        .await;
    create.assert_status(StatusCode::OK);
    let id = created_id(&create.json::<Value>());

    let paste = server.get(&format!("/api/paste/{}", id)).await.json::<Value>();
    assert_eq!(paste["language"], "plaintext");
    // Unrecognized expiration falls back to one day.
    assert!(paste["expires_at"].is_string());
}

#[tokio::test]
async fn never_expiration_stores_null_expiry() {
    let server = memory_server();

    let create = server
        .post("/api/paste")
        .json(&json!({ "content": "keep me", "expiration": "never" }))
        .await;
    create.assert_status(StatusCode::OK);
    let id = created_id(&create.json::<Value>());

    let paste = server.get(&format!("/api/paste/{}", id)).await.json::<Value>();
    assert!(paste["expires_at"].is_null());
}

#[tokio::test]
async fn empty_content_is_rejected() {
    let server = memory_server();

    for content in ["", "   ", "\n\t"] {
        let response = server
            .post("/api/paste")
            .json(&json!({ "content": content }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body = response.json::<Value>();
        assert!(body["error"].as_str().unwrap().contains("empty"));
    }
}

#[tokio::test]
async fn content_ceiling_is_exact() {
    let server = memory_server_with_max(100);

    let at_limit = server
        .post("/api/paste")
        .json(&json!({ "content": "x".repeat(100) }))
        .await;
    at_limit.assert_status(StatusCode::OK);

    let over = server
        .post("/api/paste")
        .json(&json!({ "content": "x".repeat(101) }))
        .await;
    over.assert_status(StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn wrong_content_type_is_rejected() {
    let server = memory_server();

    let response = server.post("/api/paste").text("just some text").await;
    response.assert_status(StatusCode::UNSUPPORTED_MEDIA_TYPE);
}

#[tokio::test]
async fn invalid_json_is_rejected() {
    let server = memory_server();

    let response = server
        .post("/api/paste")
        .text("{ not json")
        .content_type("application/json")
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn malformed_ids_return_not_found() {
    let server = memory_server();

    // Ambiguous glyphs and wrong lengths fail the format check before
    // any store lookup.
    for id in ["abc0d", "abc1d", "abcod", "abcld", "abcd", "abcdefgh", "ABCDE"] {
        let response = server.get(&format!("/api/paste/{}", id)).await;
        response.assert_status(StatusCode::NOT_FOUND);

        let raw = server.get(&format!("/api/paste/{}/raw", id)).await;
        raw.assert_status(StatusCode::NOT_FOUND);
    }
}

#[tokio::test]
async fn missing_paste_returns_not_found() {
    let server = memory_server();
    let response = server.get("/api/paste/abcde").await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn responses_carry_security_headers() {
    let server = memory_server();
    let response = server.get("/api/paste/abcde").await;
    response.assert_header("x-content-type-options", "nosniff");
    response.assert_header("x-frame-options", "SAMEORIGIN");
}

#[tokio::test]
async fn redb_backend_round_trips() {
    let (server, _dir) = redb_server();

    let create = server
        .post("/api/paste")
        .json(&json!({
            "content": "persisted content",
            "language": "sql",
            "expiration": "7d"
        }))
        .await;
    create.assert_status(StatusCode::OK);
    let id = created_id(&create.json::<Value>());

    let paste = server.get(&format!("/api/paste/{}", id)).await.json::<Value>();
    assert_eq!(paste["content"], "persisted content");
    assert_eq!(paste["language"], "sql");

    let raw = server.get(&format!("/api/paste/{}/raw", id)).await;
    assert_eq!(raw.text(), "persisted content");

    server.delete(&format!("/api/paste/{}", id)).await;
    let gone = server.get(&format!("/api/paste/{}", id)).await;
    gone.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn control_characters_are_stripped_from_content() {
    let server = memory_server();

    let create = server
        .post("/api/paste")
        .json(&json!({ "content": "a\u{0000}b\u{0007}c\td\ne" }))
        .await;
    create.assert_status(StatusCode::OK);
    let id = created_id(&create.json::<Value>());

    let raw = server.get(&format!("/api/paste/{}/raw", id)).await;
    assert_eq!(raw.text(), "abc\td\ne");
}
