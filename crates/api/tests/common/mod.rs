#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Method, Request, Response};
use axum::Router;
use dataflow_core::types::DbId;
use dataflow_db::models::record::Record;
use dataflow_db::{InMemoryRecordStore, RecordStore, StoreError};
use http_body_util::BodyExt;
use tower::ServiceExt;

use dataflow_api::auth::jwt::{generate_access_token, JwtConfig};
use dataflow_api::config::{ServerConfig, StoreBackend};
use dataflow_api::router::build_app_router;
use dataflow_api::state::AppState;

/// Account every test token acts for unless a test says otherwise.
pub const TEST_ACCOUNT: DbId = 1;

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
        access_token_expiry_mins: 15,
    }
}

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        store: StoreBackend::Memory,
        jwt: test_jwt_config(),
    }
}

/// Build the full application router around the given store, using the same
/// middleware stack as production.
pub fn build_test_app(store: Arc<dyn RecordStore>) -> Router {
    build_test_app_with_config(store, test_config())
}

/// Like [`build_test_app`], with a caller-supplied configuration.
pub fn build_test_app_with_config(store: Arc<dyn RecordStore>, config: ServerConfig) -> Router {
    let state = AppState {
        store,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// Build an app over a fresh in-memory store and hand the store back for
/// assertions.
pub fn build_memory_app() -> (Router, Arc<InMemoryRecordStore>) {
    let store = Arc::new(InMemoryRecordStore::new());
    (build_test_app(store.clone()), store)
}

/// A valid bearer token for `user_id` acting on `account_id`.
pub fn token_for(user_id: DbId, account_id: DbId) -> String {
    generate_access_token(user_id, account_id, &test_jwt_config()).unwrap()
}

pub fn test_token() -> String {
    token_for(1, TEST_ACCOUNT)
}

/// POST a JSON value with a bearer token.
pub async fn post_json(app: Router, uri: &str, body: serde_json::Value, token: &str) -> Response<Body> {
    post_raw(app, uri, body.to_string(), Some(token)).await
}

/// POST a raw body (possibly not JSON), optionally authenticated.
pub async fn post_raw(app: Router, uri: &str, body: String, token: Option<&str>) -> Response<Body> {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    app.oneshot(builder.body(Body::from(body)).unwrap())
        .await
        .unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/* --------------------------------------------------------------------------
Stores with scripted failures
-------------------------------------------------------------------------- */

/// Rejects every write with the given business-rule code.
pub struct BusinessRuleStore {
    pub code: &'static str,
    pub message: &'static str,
}

#[async_trait]
impl RecordStore for BusinessRuleStore {
    async fn create(&self, _account_id: DbId, _title: &str) -> Result<Record, StoreError> {
        Err(StoreError::BusinessRule {
            code: self.code.to_string(),
            message: self.message.to_string(),
        })
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

/// Behaves like an unreachable database.
pub struct UnavailableStore;

#[async_trait]
impl RecordStore for UnavailableStore {
    async fn create(&self, _account_id: DbId, _title: &str) -> Result<Record, StoreError> {
        Err(StoreError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Err(StoreError::Database(sqlx::Error::PoolTimedOut))
    }
}

/// Panics inside `create`, standing in for a programming error.
pub struct PanickingStore;

#[async_trait]
impl RecordStore for PanickingStore {
    async fn create(&self, _account_id: DbId, _title: &str) -> Result<Record, StoreError> {
        panic!("connection string postgres://admin:hunter2@db leaked");
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

/// Never answers, like a database that accepts the connection and then stalls.
pub struct HangingStore;

#[async_trait]
impl RecordStore for HangingStore {
    async fn create(&self, _account_id: DbId, _title: &str) -> Result<Record, StoreError> {
        std::future::pending().await
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
