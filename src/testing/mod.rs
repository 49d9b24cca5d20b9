//! Router-level test harness backed by `MemoryStore`.

pub mod memory;

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use crate::app::app;
use crate::auth::TokenService;
use crate::config::{AppConfig, Environment};
use crate::database::models::{ROLE_ADMIN, ROLE_USER};
use crate::database::Repository;
use crate::services::Service;
use crate::state::AppState;
pub use memory::MemoryStore;

pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
    pub tokens: TokenService,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_repository(
            AppConfig::for_environment(Environment::Development),
            |store| Repository::new(store.clone(), store.clone(), store),
        )
    }

    /// Builds the router over a repository assembled from the shared `MemoryStore`,
    /// so a test can swap in its own implementation of one capability.
    pub fn with_repository<F>(config: AppConfig, build: F) -> Self
    where
        F: FnOnce(Arc<MemoryStore>) -> Repository,
    {
        let tokens = TokenService::new(&config.security.jwt_secret, config.security.token_ttl_hours)
            .expect("development config carries a signing key");

        let store = Arc::new(MemoryStore::default());
        let repo = build(store.clone());
        let services = Service::new(&repo, tokens.clone(), config.security.password_salt.clone());
        let router = app(AppState::new(services, None), &config);

        Self {
            router,
            store,
            tokens,
        }
    }

    pub fn admin_token(&self) -> String {
        self.tokens.issue(1, ROLE_ADMIN).expect("token")
    }

    pub fn user_token(&self) -> String {
        self.tokens.issue(2, ROLE_USER).expect("token")
    }

    /// Sends one request through the full router; returns status and parsed JSON
    /// body (`Value::Null` when the body is empty).
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("request");

        self.send(request).await
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.expect("infallible");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("json body")
        };
        (status, value)
    }
}
