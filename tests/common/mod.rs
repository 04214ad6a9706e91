#![allow(dead_code)]

use axum::{
    body::Body,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        Method, Request, StatusCode,
    },
    Router,
};
use serde_json::{json, Value};
use sqlx::SqlitePool;
use tasktrack::{auth::TokenCodec, config::Config, rest, store, AppState};
use tempfile::TempDir;
use tower::ServiceExt;

pub const SECRET: &str = "integration-test-secret";
pub const PASSWORD: &str = "correct horse battery staple";

/// A router over its own throwaway sqlite database.
pub struct TestApp {
    pub router: Router,
    pub pool: SqlitePool,
    pub tokens: TokenCodec,
    _temp_dir: TempDir,
}

impl TestApp {
    pub async fn new() -> Self {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let url = format!("sqlite://{}", temp_dir.path().join("test.db").display());

        let pool = store::connect(&url).await.expect("failed to open database");
        store::migrate(&pool).await.expect("failed to run migrations");

        let config = Config::from_lookup(|key| match key {
            "DATABASE_URL" => Some(url.clone()),
            "SECRET_KEY" => Some(SECRET.to_string()),
            _ => None,
        })
        .expect("invalid test config");

        let state = AppState::new(pool.clone(), &config);

        Self {
            router: rest::router(state),
            pool,
            tokens: TokenCodec::from_config(&config),
            _temp_dir: temp_dir,
        }
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
        }

        let request = match body {
            Some(body) => builder
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("failed to read body");
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        (status, value)
    }

    pub async fn get(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, Some(token), None).await
    }

    pub async fn post(&self, uri: &str, token: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, Some(token), Some(body)).await
    }

    pub async fn patch(&self, uri: &str, token: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::PATCH, uri, Some(token), Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.request(Method::DELETE, uri, Some(token), None).await
    }

    pub async fn register(&self, name: &str) -> (StatusCode, Value) {
        self.request(
            Method::POST,
            "/users/register",
            None,
            Some(json!({
                "name": name,
                "email": format!("{name}@example.com"),
                "password": PASSWORD,
            })),
        )
        .await
    }

    pub async fn login(&self, name: &str, password: &str) -> (StatusCode, Value) {
        self.request(
            Method::POST,
            "/users/login",
            None,
            Some(json!({ "name": name, "password": password })),
        )
        .await
    }

    /// Registers `name` and returns a fresh access token for it.
    pub async fn user_token(&self, name: &str) -> String {
        let (status, _) = self.register(name).await;
        assert_eq!(status, StatusCode::OK, "register {name}");

        let (status, body) = self.login(name, PASSWORD).await;
        assert_eq!(status, StatusCode::OK, "login {name}");

        body["access_token"]
            .as_str()
            .expect("access token")
            .to_string()
    }

    pub async fn count(&self, table: &str) -> i64 {
        sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&self.pool)
            .await
            .expect("count query")
    }
}

pub fn task_body(name: &str) -> Value {
    json!({
        "name": name,
        "description": "something to do",
        "status": "active",
        "difficulty": 3,
        "priority": 2,
        "deadline": "2025-05-01T12:00:00",
    })
}

pub fn id_of(body: &Value) -> i64 {
    body["id"].as_i64().expect("record id")
}
