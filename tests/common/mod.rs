#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response, StatusCode};
use axum::Router;
use parking_lot::Mutex;
use serde_json::Value;
use tower::ServiceExt;

use product_studio::gateway::{CompletionRequest, GatewayError, LlmGateway};
use product_studio::pipeline::PromptSettings;
use product_studio::routes::AppState;
use product_studio::store::MemStore;

/// Gateway that replays one scripted reply and records every request.
pub struct StubGateway {
    reply: Mutex<Result<String, fn() -> GatewayError>>,
    pub requests: Mutex<Vec<CompletionRequest>>,
}

impl StubGateway {
    pub fn replying(text: &str) -> Arc<Self> {
        Arc::new(Self { reply: Mutex::new(Ok(text.to_string())), requests: Mutex::new(Vec::new()) })
    }

    pub fn failing(err: fn() -> GatewayError) -> Arc<Self> {
        Arc::new(Self { reply: Mutex::new(Err(err)), requests: Mutex::new(Vec::new()) })
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().len()
    }
}

#[async_trait]
impl LlmGateway for StubGateway {
    fn name(&self) -> &'static str {
        "stub"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<String, GatewayError> {
        self.requests.lock().push(request.clone());
        match &*self.reply.lock() {
            Ok(text) => Ok(text.clone()),
            Err(make) => Err(make()),
        }
    }
}

pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemStore>,
    pub gateway: Arc<StubGateway>,
}

pub fn build_test_app(gateway: Arc<StubGateway>) -> TestApp {
    build_test_app_with(gateway, true)
}

pub fn build_test_app_with(gateway: Arc<StubGateway>, country_aware: bool) -> TestApp {
    let store = Arc::new(MemStore::new());
    let state = AppState {
        store: store.clone(),
        gateway: gateway.clone(),
        settings: Arc::new(PromptSettings { country_aware, model: None }),
    };
    TestApp { router: product_studio::app(state), store, gateway }
}

pub async fn post_json(app: &Router, uri: &str, body: Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

pub async fn post_raw(app: &Router, uri: &str, body: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    let request = Request::builder().method(Method::GET).uri(uri).body(Body::empty()).unwrap();
    app.clone().oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn expect(response: Response<Body>, status: StatusCode) -> Value {
    assert_eq!(response.status(), status);
    body_json(response).await
}
