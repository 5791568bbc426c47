//! In-memory `UserStore` and request helpers for driving the router without PostgreSQL.
#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, Response, StatusCode},
    Router,
};
use chrono::Utc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tower::util::ServiceExt;
use user_crud::{app, AppError, AppState, StaticKey, User, UserStore};

pub const TEST_KEY: &str = "your_api_key";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Failure {
    Query,
    Connection,
}

#[derive(Default)]
struct Table {
    next_id: i32,
    rows: Vec<User>,
}

/// Mirrors the PostgreSQL semantics: serial ids, insert-time timestamps, no existence checks.
#[derive(Default)]
pub struct MemoryStore {
    table: Mutex<Table>,
    calls: AtomicUsize,
    failure: Mutex<Option<Failure>>,
}

impl MemoryStore {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn rows(&self) -> Vec<User> {
        self.table.lock().unwrap().rows.clone()
    }

    pub fn fail_with(&self, failure: Option<Failure>) {
        *self.failure.lock().unwrap() = failure;
    }

    fn enter(&self) -> Result<(), AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match *self.failure.lock().unwrap() {
            None => Ok(()),
            Some(Failure::Query) => Err(AppError::Query(sqlx::Error::Protocol(
                "relation \"users\" does not exist".into(),
            ))),
            Some(Failure::Connection) => Err(AppError::Connection(sqlx::Error::PoolTimedOut)),
        }
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn list(&self) -> Result<Vec<User>, AppError> {
        self.enter()?;
        let snapshot = self.rows();
        let mut out = Vec::new();
        for user in snapshot {
            out.push(user);
            // Give concurrent lists a chance to interleave with this one.
            tokio::task::yield_now().await;
        }
        Ok(out)
    }

    async fn create(&self, user: &User) -> Result<u64, AppError> {
        self.enter()?;
        let mut table = self.table.lock().unwrap();
        table.next_id += 1;
        let row = User {
            id: table.next_id,
            date_created: Some(Utc::now()),
            ..user.clone()
        };
        table.rows.push(row);
        Ok(1)
    }

    async fn update(&self, user: &User) -> Result<u64, AppError> {
        self.enter()?;
        let mut table = self.table.lock().unwrap();
        let mut affected = 0;
        for row in table.rows.iter_mut().filter(|r| r.id == user.id) {
            row.username = user.username.clone();
            row.email = user.email.clone();
            row.firstname = user.firstname.clone();
            row.lastname = user.lastname.clone();
            row.sex = user.sex.clone();
            affected += 1;
        }
        Ok(affected)
    }

    async fn delete(&self, id: i32) -> Result<u64, AppError> {
        self.enter()?;
        let mut table = self.table.lock().unwrap();
        let before = table.rows.len();
        table.rows.retain(|r| r.id != id);
        Ok((before - table.rows.len()) as u64)
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.enter()
    }
}

pub fn test_app() -> (Router, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::default());
    let state = AppState::new(store.clone(), Arc::new(StaticKey::new(TEST_KEY)));
    (app(state), store)
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn post_json(uri: &str, body: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .method("POST")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn post_with_key(uri: &str, key: &str, body: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .method("POST")
        .header("content-type", "application/json")
        .header("API-KEY", key)
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

pub async fn json_body(response: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Create a user through the API and assert it was accepted.
pub async fn create(app: &Router, username: &str) {
    let body = serde_json::json!({
        "username": username,
        "email": format!("{}@example.com", username),
        "firstname": "First",
        "lastname": "Last",
        "sex": "female"
    });
    let response = send(app, post_with_key("/newuser", TEST_KEY, &body)).await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

pub async fn list(app: &Router) -> Vec<User> {
    let response = send(app, get("/users")).await;
    assert_eq!(response.status(), StatusCode::OK);
    serde_json::from_value(json_body(response).await).unwrap()
}
