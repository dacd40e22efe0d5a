#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use promptsmith_api::config::{LlmConfig, ServerConfig};
use promptsmith_api::router::build_app_router;
use promptsmith_api::state::AppState;
use promptsmith_llm::messages::ChatMessage;
use promptsmith_llm::{ChatProvider, LlmError, LlmResult, TokenStream};

// ---------------------------------------------------------------------------
// Fake completion provider
// ---------------------------------------------------------------------------

/// One call seen by [`FakeProvider`].
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub kind: &'static str,
    pub api_key: String,
    pub messages: Vec<ChatMessage>,
}

/// Scripted stand-in for the completion endpoint.
///
/// JSON replies are consumed in order (classifier first, then suggester);
/// once exhausted, `complete_json` fails. `stream_chat` replays `tokens`
/// or fails with `stream_status`.
#[derive(Default)]
pub struct FakeProvider {
    tokens: Vec<String>,
    stream_status: Option<u16>,
    json_replies: Mutex<VecDeque<LlmResult<String>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl FakeProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tokens(mut self, tokens: &[&str]) -> Self {
        self.tokens = tokens.iter().map(|t| t.to_string()).collect();
        self
    }

    pub fn with_stream_status(mut self, status: u16) -> Self {
        self.stream_status = Some(status);
        self
    }

    pub fn with_json_reply(self, reply: &str) -> Self {
        self.json_replies
            .lock()
            .unwrap()
            .push_back(Ok(reply.to_string()));
        self
    }

    pub fn with_json_failure(self, status: u16) -> Self {
        self.json_replies.lock().unwrap().push_back(Err(LlmError::Api {
            status,
            body: "upstream failure".to_string(),
        }));
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, kind: &'static str, api_key: &str, messages: Vec<ChatMessage>) {
        self.calls.lock().unwrap().push(RecordedCall {
            kind,
            api_key: api_key.to_string(),
            messages,
        });
    }
}

#[async_trait]
impl ChatProvider for FakeProvider {
    async fn stream_chat(
        &self,
        api_key: &str,
        messages: Vec<ChatMessage>,
    ) -> LlmResult<TokenStream> {
        self.record("stream", api_key, messages);
        if let Some(status) = self.stream_status {
            return Err(LlmError::Api {
                status,
                body: "rejected".to_string(),
            });
        }
        let items: Vec<LlmResult<String>> = self.tokens.iter().cloned().map(Ok).collect();
        Ok(Box::pin(futures::stream::iter(items)))
    }

    async fn complete_json(&self, api_key: &str, messages: Vec<ChatMessage>) -> LlmResult<String> {
        self.record("json", api_key, messages);
        self.json_replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(LlmError::MalformedResponse("no scripted reply".into())))
    }
}

// ---------------------------------------------------------------------------
// App construction
// ---------------------------------------------------------------------------

/// Build a test `ServerConfig` with safe defaults and no server-side key.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        generate_timeout_secs: 120,
        shutdown_timeout_secs: 30,
        llm: LlmConfig::default(),
    }
}

pub fn config_with_key(key: &str) -> ServerConfig {
    let mut config = test_config();
    config.llm.api_key = Some(key.to_string());
    config
}

/// Build the full application router with all middleware layers, exactly
/// as `main.rs` does, around the given provider.
pub fn build_test_app_with(config: ServerConfig, provider: Arc<FakeProvider>) -> Router {
    let state = AppState {
        config: Arc::new(config.clone()),
        provider,
    };
    build_app_router(state, &config)
}

pub fn build_test_app() -> Router {
    build_test_app_with(test_config(), Arc::new(FakeProvider::new()))
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::post(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_text(response: Response<Body>) -> String {
    String::from_utf8(body_bytes(response).await).unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}
