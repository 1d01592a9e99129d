// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Integration tests for the quote endpoints

mod fixtures;

use axum::http::StatusCode;
use fixtures::{TestServer, json_body};
use serde_json::json;

#[tokio::test]
async fn random_statement() {
    let server = TestServer::start().await;

    let response = server.get("/").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["ok"], json!(true));
    assert!(body["quote"].is_string());
    assert!(body.get("quoteid").is_none());
}

#[tokio::test]
async fn post_then_get_quote() {
    let server = TestServer::start().await;

    let response = server
        .client
        .post(server.url("/quote"))
        .json(&json!({ "quote": "X" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["ok"], json!(true));
    assert_eq!(body["quote"], json!("X"));
    assert_eq!(body["quoteid"], json!(10));

    let body = json_body(server.get("/quote/10").await).await;
    assert_eq!(body["ok"], json!(true));
    assert_eq!(body["quote"], json!("X"));
}

#[tokio::test]
async fn put_replaces_quote() {
    let server = TestServer::start().await;

    let response = server
        .client
        .put(server.url("/quote/3"))
        .json(&json!({ "quote": "A rose by any other name" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json_body(response).await["quote"],
        json!("A rose by any other name")
    );

    let body = json_body(server.get("/quote/3").await).await;
    assert_eq!(body["quote"], json!("A rose by any other name"));
}

#[tokio::test]
async fn put_without_quote_is_rejected() {
    let server = TestServer::start().await;

    let response = server
        .client
        .put(server.url("/quote/0"))
        .json(&json!({}))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = json_body(response).await;
    assert_eq!(body["ok"], json!(false));
    assert_eq!(body["error"], json!("must supply 'quote' via JSON dictionary"));
    assert_eq!(body["status_code"], json!(400));
}

#[tokio::test]
async fn post_with_non_string_quote_is_rejected() {
    let server = TestServer::start().await;

    let response = server
        .client
        .post(server.url("/quote"))
        .json(&json!({ "quote": 42 }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = json_body(server.get("/quote/10").await).await;
    assert_eq!(body["error"], json!("no quote ID 10"));
}

#[tokio::test]
async fn non_numeric_id_is_rejected() {
    let server = TestServer::start().await;

    for path in ["/quote/abc", "/quote/%FF"] {
        let response = server.get(path).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{path}");

        let body = json_body(response).await;
        assert_eq!(body["ok"], json!(false));
        assert_eq!(body["error"], json!("quote IDs must be numbers"));
    }
}

#[tokio::test]
async fn out_of_range_ids_are_rejected() {
    let server = TestServer::start().await;

    for (path, message) in [
        ("/quote/10", "no quote ID 10"),
        ("/quote/-1", "no quote ID -1"),
        (
            "/quote/99999999999999999999",
            "no quote ID 99999999999999999999",
        ),
    ] {
        let response = server.get(path).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"], json!(message));
    }

    let response = server
        .client
        .put(server.url("/quote/99"))
        .json(&json!({ "quote": "never stored" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["error"], json!("no quote ID 99"));
}
