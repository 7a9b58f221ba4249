//! Router-level tests against fake translators.

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;
use translate_gateway::domain::error::ProviderFailure;
use translate_gateway::interfaces::http::{router, webhook_router};
use translate_gateway::{
    AppState, Config, GatewayError, ProviderId, ProviderRegistry, TranslateInput, Translator,
};

enum Outcome {
    Text(&'static str),
    Fail(u16, &'static str),
    Unconfigured,
}

struct FakeTranslator {
    id: ProviderId,
    outcome: Outcome,
    calls: AtomicUsize,
    last_input: Mutex<Option<TranslateInput>>,
}

impl FakeTranslator {
    fn new(id: ProviderId, outcome: Outcome) -> Arc<Self> {
        Arc::new(Self {
            id,
            outcome,
            calls: AtomicUsize::new(0),
            last_input: Mutex::new(None),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Translator for FakeTranslator {
    fn id(&self) -> ProviderId {
        self.id
    }

    async fn translate(&self, input: &TranslateInput) -> Result<String, GatewayError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_input.lock().unwrap() = Some(input.clone());
        match &self.outcome {
            Outcome::Text(text) => Ok(text.to_string()),
            Outcome::Fail(status, message) => Err(GatewayError::provider(
                *status,
                ProviderFailure::UpstreamStatus,
                *message,
                Some(json!({ "upstream": "details" })),
            )),
            Outcome::Unconfigured => Err(GatewayError::configuration(
                format!("{} provider is not configured.", self.id.display_name()),
                None,
            )),
        }
    }
}

struct Harness {
    claude: Arc<FakeTranslator>,
    xai: Arc<FakeTranslator>,
    state: AppState,
}

fn harness(claude: Outcome, xai: Outcome) -> Harness {
    let claude = FakeTranslator::new(ProviderId::Claude, claude);
    let xai = FakeTranslator::new(ProviderId::Xai, xai);
    let registry = ProviderRegistry::new(
        vec![claude.clone() as Arc<dyn Translator>, xai.clone() as Arc<dyn Translator>],
        ProviderId::Xai,
    )
    .unwrap();
    Harness {
        claude,
        xai,
        state: AppState::with_registry(registry, Config::default()),
    }
}

impl Harness {
    fn total_calls(&self) -> usize {
        self.claude.calls() + self.xai.calls()
    }
}

async fn post(app: axum::Router, body: impl Into<Body>) -> (StatusCode, Value) {
    post_as(app, "application/json", body).await
}

async fn post_as(
    app: axum::Router,
    content_type: &str,
    body: impl Into<Body>,
) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", content_type)
        .body(body.into())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn post_json(state: &AppState, body: Value) -> (StatusCode, Value) {
    post(router(state.clone()), body.to_string()).await
}

#[tokio::test]
async fn default_provider_handles_request_without_provider() {
    let h = harness(Outcome::Text("unused"), Outcome::Text("Hello"));

    let (status, body) = post_json(&h.state, json!({ "prompt": "Bonjour" })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "translation": "Hello", "prompt": "Bonjour" }));
    assert_eq!(h.xai.calls(), 1);
    assert_eq!(h.claude.calls(), 0);
}

#[tokio::test]
async fn empty_provider_string_uses_default() {
    let h = harness(Outcome::Text("unused"), Outcome::Text("Hello"));

    let (status, _) = post_json(&h.state, json!({ "prompt": "Bonjour", "provider": "   " })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(h.xai.calls(), 1);
}

#[tokio::test]
async fn provider_is_matched_case_insensitively() {
    let h = harness(Outcome::Text("Hallo"), Outcome::Text("unused"));

    let (status, body) =
        post_json(&h.state, json!({ "prompt": "  Hello  ", "provider": " CLAUDE " })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "translation": "Hallo", "prompt": "Hello" }));
    assert_eq!(h.claude.calls(), 1);
    assert_eq!(h.xai.calls(), 0);
}

#[tokio::test]
async fn trimmed_prompt_and_metadata_reach_the_client() {
    let h = harness(Outcome::Text("Hola"), Outcome::Text("unused"));

    post_json(
        &h.state,
        json!({ "prompt": "\tHello\n", "provider": "claude", "metadata": { "target": "es" } }),
    )
    .await;

    let input = h.claude.last_input.lock().unwrap().clone().unwrap();
    assert_eq!(input.prompt, "Hello");
    assert_eq!(input.metadata.get("target"), Some(&json!("es")));
}

#[tokio::test]
async fn missing_prompt_is_rejected_without_dispatch() {
    let h = harness(Outcome::Text("x"), Outcome::Text("x"));

    for body in [
        json!({}),
        json!({ "prompt": "" }),
        json!({ "prompt": "   \n\t" }),
        json!({ "prompt": 42 }),
        json!({ "prompt": ["hi"] }),
        json!({ "prompt": null, "provider": "claude" }),
    ] {
        let (status, response) = post_json(&h.state, body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(response, json!({ "error": "Missing prompt text to translate." }));
    }
    assert_eq!(h.total_calls(), 0);
}

#[tokio::test]
async fn unsupported_provider_lists_registered_ids() {
    let h = harness(Outcome::Text("x"), Outcome::Text("x"));

    let (status, body) = post_json(&h.state, json!({ "prompt": "Hi", "provider": "unknown" })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({ "error": "Unsupported provider \"unknown\". Use one of: claude, xai." })
    );
    assert_eq!(h.total_calls(), 0);
}

#[tokio::test]
async fn malformed_json_gets_fixed_message() {
    let h = harness(Outcome::Text("x"), Outcome::Text("x"));

    for body in ["{\"prompt\": \"Hi\"", "not json", "[\"Hi\"]"] {
        let (status, response) = post(router(h.state.clone()), body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(response, json!({ "error": "Invalid JSON payload." }));
    }
    assert_eq!(h.total_calls(), 0);
}

#[tokio::test]
async fn upstream_status_is_mirrored() {
    let h = harness(Outcome::Text("x"), Outcome::Fail(429, "xAI API request failed with status 429."));

    let (status, body) = post_json(&h.state, json!({ "prompt": "Hi" })).await;

    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(body, json!({ "error": "xAI API request failed with status 429." }));
}

#[tokio::test]
async fn invalid_status_defaults_to_bad_gateway() {
    let h = harness(Outcome::Text("x"), Outcome::Fail(0, ""));

    let (status, body) = post_json(&h.state, json!({ "prompt": "Hi" })).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body, json!({ "error": "Translation failed." }));
}

#[tokio::test]
async fn unconfigured_backend_is_internal_error() {
    let h = harness(Outcome::Unconfigured, Outcome::Text("x"));

    let (status, body) = post_json(&h.state, json!({ "prompt": "Hi", "provider": "claude" })).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Claude provider is not configured." }));
    assert!(body.get("details").is_none());
}

#[tokio::test]
async fn registry_rejects_unregistered_default() {
    let claude = FakeTranslator::new(ProviderId::Claude, Outcome::Text("x"));
    let result = ProviderRegistry::new(vec![claude as Arc<dyn Translator>], ProviderId::Xai);
    assert!(result.is_err());
}

#[tokio::test]
async fn webhook_says_world_to_hello() {
    let (status, body) = post(webhook_router(), json!({ "text": "hello" }).to_string()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "text": "world" }));
}

#[tokio::test]
async fn webhook_hints_on_anything_else() {
    let (status, body) = post(webhook_router(), json!({ "text": "bye" }).to_string()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Send { \"text\": \"hello\" }" }));
}

#[tokio::test]
async fn webhook_accepts_form_bodies() {
    let form = "application/x-www-form-urlencoded";

    let (status, body) = post_as(webhook_router(), form, "text=hello").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "text": "world" }));

    let (status, body) = post_as(webhook_router(), form, "text=bye").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Send { \"text\": \"hello\" }" }));
}

#[tokio::test]
async fn translate_accepts_form_bodies() {
    let h = harness(Outcome::Text("Hola"), Outcome::Text("unused"));
    let (status, body) = post_as(
        router(h.state.clone()),
        "application/x-www-form-urlencoded; charset=utf-8",
        "prompt=Hello%20there&provider=claude",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "translation": "Hola", "prompt": "Hello there" }));
    let input = h.claude.last_input.lock().unwrap().clone().unwrap();
    assert_eq!(input.prompt, "Hello there");
    assert_eq!(h.xai.calls(), 0);
}

#[tokio::test]
async fn malformed_form_gets_fixed_message() {
    let (status, body) = post_as(
        webhook_router(),
        "application/x-www-form-urlencoded",
        "text=hello&text=again",
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Invalid form payload." }));
}
