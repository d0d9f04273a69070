#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use club_api::*;
use club_storage::ClubStore;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

pub const ADMIN_EMAIL: &str = "admin@club.com";
pub const ADMIN_PASSWORD: &str = "admin-secret";

// ===== Test Helper Functions =====

/// Keeps every reset token handed out so tests can complete the flow.
#[derive(Debug, Default, Clone)]
pub struct CapturedResets {
    sent: Arc<Mutex<Vec<(String, String)>>>,
}

impl CapturedResets {
    pub fn last_token_for(&self, email: &str) -> Option<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(to, _)| to == email)
            .map(|(_, token)| token.clone())
    }

    pub fn count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

impl ResetNotifier for CapturedResets {
    fn send_reset(&self, email: &str, token: &str) {
        self.sent
            .lock()
            .unwrap()
            .push((email.to_string(), token.to_string()));
    }
}

pub async fn create_state() -> AppState {
    let store = ClubStore::new();
    store.seed(ADMIN_EMAIL, ADMIN_PASSWORD).await.unwrap();
    AppState::new(store, AuthConfig::new("test-secret", 1))
}

pub async fn create_app() -> Router {
    club_api::routes(create_state().await)
}

/// App wired to a notifier the test can read reset tokens from.
pub async fn create_app_with_resets() -> (Router, CapturedResets) {
    let resets = CapturedResets::default();
    let state = create_state()
        .await
        .with_reset_notifier(Arc::new(resets.clone()));
    (club_api::routes(state), resets)
}

pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().uri(uri).method(method);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    (status, value)
}

pub async fn login(app: &Router, email: &str, password: &str) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/auth/login",
        None,
        Some(json!({"email": email, "password": password})),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    body["token"].as_str().unwrap().to_string()
}

pub async fn admin_token(app: &Router) -> String {
    login(app, ADMIN_EMAIL, ADMIN_PASSWORD).await
}

pub fn player_body(id: &str, alias: &str, index: usize) -> Value {
    json!({
        "national_id": id,
        "name": format!("Player {}", alias),
        "registration_name": alias,
        "phone": format!("30011122{:02}", index),
        "birth_date": "1995-05-17",
        "uniform_size": "M",
        "emergency_contact_name": "Contact",
        "emergency_contact_phone": "3000000000",
    })
}

pub async fn create_player(app: &Router, token: &str, id: &str, alias: &str, index: usize) {
    let (status, body) = send(
        app,
        Method::POST,
        "/players",
        Some(token),
        Some(player_body(id, alias, index)),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
}

/// Player with a login, returning the player's token.
pub async fn create_player_with_login(
    app: &Router,
    token: &str,
    id: &str,
    alias: &str,
    index: usize,
) -> String {
    let email = format!("{}@club.com", alias.to_lowercase());
    let mut body = player_body(id, alias, index);
    body["email"] = json!(email);
    body["password"] = json!("player-pass");
    let (status, created) = send(app, Method::POST, "/players", Some(token), Some(body)).await;
    assert_eq!(status, StatusCode::CREATED, "{created}");
    login(app, &email, "player-pass").await
}

pub async fn create_cause(app: &Router, token: &str, description: &str, amount: u32) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/fines/causes",
        Some(token),
        Some(json!({"description": description, "amount": amount})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["id"].as_str().unwrap().to_string()
}

pub async fn create_category(app: &Router, token: &str, name: &str) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/expenses/categories",
        Some(token),
        Some(json!({"name": name})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["id"].as_str().unwrap().to_string()
}

pub async fn issue_fine(app: &Router, token: &str, player_id: &str, cause_id: &str) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/fines",
        Some(token),
        Some(json!({"player_id": player_id, "cause_id": cause_id})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["id"].as_str().unwrap().to_string()
}
