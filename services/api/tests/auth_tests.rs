//! End-to-end tests for signup and login.

mod common;

use axum::http::{Method, StatusCode};
use common::{send, test_app};
use serde_json::json;

fn signup_body() -> serde_json::Value {
    json!({
        "name": "Ada Lovelace",
        "email": "ada@example.com",
        "password": "correct horse battery staple",
        "userType": "student"
    })
}

#[tokio::test]
async fn signup_returns_the_new_user_without_the_password() {
    let app = test_app();
    let (status, body) = send(&app, Method::POST, "/auth/signup", Some(signup_body())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "User created successfully");
    assert_eq!(body["user"]["name"], "Ada Lovelace");
    assert_eq!(body["user"]["email"], "ada@example.com");
    assert_eq!(body["user"]["userType"], "student");
    assert!(body["user"]["id"].is_string());
    assert!(body["user"].get("password").is_none());
}

#[tokio::test]
async fn signing_up_twice_with_the_same_email_is_a_400() {
    let app = test_app();
    send(&app, Method::POST, "/auth/signup", Some(signup_body())).await;
    let (status, body) = send(&app, Method::POST, "/auth/signup", Some(signup_body())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "User already exists");
}

#[tokio::test]
async fn signup_requires_an_email() {
    let app = test_app();
    let mut body = signup_body();
    body.as_object_mut().expect("object body").remove("email");
    let (status, _) = send(&app, Method::POST, "/auth/signup", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn login_verifies_the_password() {
    let app = test_app();
    send(&app, Method::POST, "/auth/signup", Some(signup_body())).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/auth/login",
        Some(json!({ "email": "ada@example.com", "password": "correct horse battery staple" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Login successful");
    assert_eq!(body["user"]["email"], "ada@example.com");

    let (status, body) = send(
        &app,
        Method::POST,
        "/auth/login",
        Some(json!({ "email": "ada@example.com", "password": "wrong" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid email or password");
}

#[tokio::test]
async fn login_does_not_reveal_whether_an_email_exists() {
    let app = test_app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/auth/login",
        Some(json!({ "email": "nobody@example.com", "password": "whatever" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid email or password");
}
