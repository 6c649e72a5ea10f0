//! API integration tests against a running server
//!
//! Start the server (with either store backend), then run:
//! `cargo test --test api_tests -- --ignored`

use reqwest::{Client, StatusCode};
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080";

/// Helper to create a book and return its id
async fn create_book(client: &Client, title: &str) -> i64 {
    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&json!({
            "title": title,
            "author": "Herman Melville",
            "year": 1851
        }))
        .send()
        .await
        .expect("Failed to send create request");

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = response.json().await.expect("Failed to parse create response");
    body["id"].as_i64().expect("No book ID")
}

async fn lend(client: &Client, id: i64, action: &str, username: &str) -> StatusCode {
    client
        .post(format!("{}/books/{}/{}", BASE_URL, id, action))
        .json(&json!({ "username": username }))
        .send()
        .await
        .expect("Failed to send request")
        .status()
}

async fn delete_book(client: &Client, id: i64) {
    let _ = client
        .post(format!("{}/books/{}/delete", BASE_URL, id))
        .send()
        .await;
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_readiness_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/ready", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
}

#[tokio::test]
#[ignore]
async fn test_list_books() {
    let client = Client::new();

    let response = client
        .get(format!("{}/books", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body.is_array());
}

#[tokio::test]
#[ignore]
async fn test_checkout_and_return() {
    let client = Client::new();
    let id = create_book(&client, "Moby-Dick").await;

    assert_eq!(lend(&client, id, "checkout", "alice").await, StatusCode::OK);
    assert_eq!(lend(&client, id, "checkout", "bob").await, StatusCode::CONFLICT);
    assert_eq!(lend(&client, id, "return", "bob").await, StatusCode::CONFLICT);
    assert_eq!(lend(&client, id, "return", "alice").await, StatusCode::OK);

    let body: Value = client
        .get(format!("{}/books/{}", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(body["is_available"], true);

    delete_book(&client, id).await;
}

#[tokio::test]
#[ignore]
async fn test_concurrent_checkouts() {
    let client = Client::new();
    let id = create_book(&client, "Bartleby, the Scrivener").await;

    let attempts = (0..20).map(|i| {
        let client = client.clone();
        tokio::spawn(async move { lend(&client, id, "checkout", &format!("reader-{}", i)).await })
    });

    let mut ok = 0;
    for attempt in attempts.collect::<Vec<_>>() {
        match attempt.await.expect("Task panicked") {
            StatusCode::OK => ok += 1,
            status => assert_eq!(status, StatusCode::CONFLICT),
        }
    }
    assert_eq!(ok, 1);

    delete_book(&client, id).await;
}

#[tokio::test]
#[ignore]
async fn test_delete_missing_book() {
    let client = Client::new();

    let response = client
        .post(format!("{}/books/{}/delete", BASE_URL, i32::MAX))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}
