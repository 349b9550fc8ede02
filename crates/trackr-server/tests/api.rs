use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;
use trackr_core::{AgentError, Message, ToolCall};
use trackr_llm::{Generation, GenerationRequest, GenerativeModel, LlmMetrics};
use trackr_server::services::chat::FALLBACK_REPLY;
use trackr_server::{router, AssistantProfile, ServerState};

type Script = Box<dyn Fn() -> Result<Generation, AgentError> + Send + Sync>;

/// Model stub that answers every request from a script and records what it was sent.
struct ScriptedModel {
    script: Script,
    seen: Mutex<Vec<GenerationRequest>>,
}

impl ScriptedModel {
    fn new(script: impl Fn() -> Result<Generation, AgentError> + Send + Sync + 'static) -> Arc<Self> {
        Arc::new(Self {
            script: Box::new(script),
            seen: Mutex::new(Vec::new()),
        })
    }

    fn requests(&self) -> Vec<GenerationRequest> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl GenerativeModel for ScriptedModel {
    fn model_name(&self) -> &str {
        "scripted"
    }

    async fn generate(&self, request: GenerationRequest) -> Result<Generation, AgentError> {
        self.seen.lock().unwrap().push(request);
        (self.script)()
    }
}

fn generation(raw: Value, text: &[&str], calls: Vec<ToolCall>) -> Generation {
    Generation {
        raw,
        text_parts: text.iter().map(|t| t.to_string()).collect(),
        calls,
        block_reason: None,
        metrics: LlmMetrics::default(),
    }
}

fn app(model: Arc<ScriptedModel>) -> Router {
    let profile = AssistantProfile::financial().unwrap();
    router(Arc::new(ServerState::new(model, profile)))
}

async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    post_raw(app, uri, body.to_string()).await
}

async fn post_raw(app: Router, uri: &str, body: String) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn failure() -> Value {
    json!({"error": "failed to generate content"})
}

// === /chat ===

#[tokio::test]
async fn balance_question_relays_function_call() {
    let model = ScriptedModel::new(|| Ok(generation(json!({}), &[], vec![ToolCall::new("getBalance", json!({}))])));

    let (status, body) = post_json(
        app(model.clone()),
        "/chat",
        json!({"message": {"history": [], "message": "What's my balance?"}}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"type": "function_call", "calls": [{"name": "getBalance", "args": {}}]}));

    let sent = model.requests();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].input, "What's my balance?");
    assert!(sent[0].history.is_empty());
    assert!(sent[0].system_instruction.starts_with("You are Trackr"));
    assert_eq!(sent[0].tools.len(), 9);
}

#[tokio::test]
async fn multiple_calls_keep_order_and_drop_text() {
    let model = ScriptedModel::new(|| {
        Ok(generation(
            json!({}),
            &["Let me look that up."],
            vec![
                ToolCall::new("getTransactions", json!({"type": "expense"})),
                ToolCall::new("getBalance", json!({})),
            ],
        ))
    });

    let (status, body) = post_json(
        app(model),
        "/chat",
        json!({"message": {"history": [], "message": "Spending vs balance?"}}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["type"], "function_call");
    assert_eq!(body["calls"][0]["name"], "getTransactions");
    assert_eq!(body["calls"][1]["name"], "getBalance");
    assert!(body.get("content").is_none());
}

#[tokio::test]
async fn text_reply_is_relayed() {
    let model = ScriptedModel::new(|| Ok(generation(json!({}), &["A budget is a plan."], vec![])));

    let (status, body) = post_json(
        app(model),
        "/chat",
        json!({"message": {"history": [], "message": "What is a budget?"}}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"type": "text", "content": "A budget is a plan."}));
}

#[tokio::test]
async fn empty_response_yields_fallback_text() {
    let model = ScriptedModel::new(|| Ok(generation(json!({"candidates": []}), &[], vec![])));

    let (status, body) = post_json(
        app(model),
        "/chat",
        json!({"message": {"history": [], "message": "???"}}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"type": "text", "content": FALLBACK_REPLY}));
}

#[tokio::test]
async fn history_in_both_wire_forms_is_forwarded_in_order() {
    let model = ScriptedModel::new(|| Ok(generation(json!({}), &["ok"], vec![])));

    let (status, _) = post_json(
        app(model.clone()),
        "/chat",
        json!({"message": {
            "history": [
                {"role": "user", "parts": [{"text": "Show my cards"}]},
                {"role": "model", "parts": [{"text": "You have two cards."}]},
                {"role": "user", "content": "Archive the old one"},
                {"role": "assistant", "content": "Which card?"}
            ],
            "message": "The blue one"
        }}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let sent = model.requests();
    assert_eq!(
        sent[0].history,
        vec![
            Message::user("Show my cards"),
            Message::assistant("You have two cards."),
            Message::user("Archive the old one"),
            Message::assistant("Which card?"),
        ]
    );
    assert_eq!(sent[0].input, "The blue one");
}

#[tokio::test]
async fn function_call_turn_in_history_is_accepted() {
    let model = ScriptedModel::new(|| Ok(generation(json!({}), &["Your balance is $120."], vec![])));

    let (status, body) = post_json(
        app(model.clone()),
        "/chat",
        json!({"message": {
            "history": [
                {"role": "user", "parts": [{"text": "What's my balance?"}]},
                {"role": "model", "parts": [{"functionCall": {"name": "getBalance", "args": {}}}]}
            ],
            "message": "And in euros?"
        }}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"type": "text", "content": "Your balance is $120."}));
    let sent = model.requests();
    assert_eq!(sent[0].history, vec![Message::user("What's my balance?"), Message::assistant("")]);
}

#[tokio::test]
async fn upstream_failure_is_generic_500() {
    let model = ScriptedModel::new(|| {
        Err(AgentError::Status {
            status: 429,
            body: "RESOURCE_EXHAUSTED: quota".into(),
        })
    });

    let (status, body) = post_json(
        app(model),
        "/chat",
        json!({"message": {"history": [], "message": "hi"}}),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, failure());
}

#[tokio::test]
async fn blocked_chat_response_is_generic_500() {
    let model = ScriptedModel::new(|| {
        let mut blocked = generation(json!({"promptFeedback": {"blockReason": "SAFETY"}}), &[], vec![]);
        blocked.block_reason = Some("SAFETY".into());
        Ok(blocked)
    });

    let (status, body) = post_json(
        app(model),
        "/chat",
        json!({"message": {"history": [], "message": "hi"}}),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, failure());
}

#[tokio::test]
async fn malformed_chat_bodies_get_error_envelope_without_calling_model() {
    let model = ScriptedModel::new(|| Ok(generation(json!({}), &["unreachable"], vec![])));

    let cases = [
        json!({"message": {"message": "no history"}}).to_string(),
        json!({"message": {"history": []}}).to_string(),
        json!({"message": "flat string"}).to_string(),
        json!({"message": {"history": [{"role": "system", "content": "x"}], "message": "hi"}}).to_string(),
        json!({"message": {"history": [{"role": "user", "parts": []}], "message": "hi"}}).to_string(),
        "{not json".to_string(),
    ];

    for case in cases {
        let (status, body) = post_raw(app(model.clone()), "/chat", case.clone()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "case {case}");
        assert_eq!(body, failure(), "case {case}");
    }
    assert!(model.requests().is_empty());
}

#[tokio::test]
async fn missing_content_type_is_error_envelope() {
    let model = ScriptedModel::new(|| Ok(generation(json!({}), &["unreachable"], vec![])));
    let request = Request::builder()
        .method("POST")
        .uri("/chat")
        .body(Body::from(json!({"message": {"history": [], "message": "hi"}}).to_string()))
        .unwrap();

    let response = app(model).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

// === /insight ===

#[tokio::test]
async fn insight_returns_raw_response() {
    let markdown = "This insight covers a grocery purchase.\n\n## Executive Summary\n...\n## Financial Details\n...\n\
                    ## Transaction Context\n...\n## Observations & Signals\n...\n## Recommendations\n...";
    let raw = json!({
        "candidates": [{"content": {"role": "model", "parts": [{"text": markdown}]}, "finishReason": "STOP"}],
        "usageMetadata": {"promptTokenCount": 40, "candidatesTokenCount": 120}
    });
    let scripted_raw = raw.clone();
    let model = ScriptedModel::new(move || Ok(generation(scripted_raw.clone(), &[markdown], vec![])));

    let transaction = json!({"title": "Grocery run", "amount": 54.20, "category": "groceries", "type": "expense"});
    let (status, body) = post_json(app(model.clone()), "/insight", json!({"object": transaction})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"res": raw}));
    let text = body["res"]["candidates"][0]["content"]["parts"][0]["text"].as_str().unwrap();
    for section in ["Executive Summary", "Financial Details", "Transaction Context", "Observations & Signals"] {
        assert!(text.contains(section));
    }

    let sent = model.requests();
    assert_eq!(sent.len(), 1);
    assert!(sent[0].tools.is_empty());
    assert!(sent[0].history.is_empty());
    assert!(sent[0].system_instruction.contains("analyze a single transaction object"));
    let forwarded: Value = serde_json::from_str(&sent[0].input).unwrap();
    assert_eq!(forwarded, transaction);
}

#[tokio::test]
async fn insight_failure_is_generic_500() {
    let model = ScriptedModel::new(|| Err(AgentError::Timeout));

    let (status, body) = post_json(app(model), "/insight", json!({"object": {"title": "Rent"}})).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, failure());
}

#[tokio::test]
async fn blocked_insight_still_returns_raw_response() {
    let raw = json!({"promptFeedback": {"blockReason": "SAFETY"}});
    let scripted_raw = raw.clone();
    let model = ScriptedModel::new(move || {
        let mut blocked = generation(scripted_raw.clone(), &[], vec![]);
        blocked.block_reason = Some("SAFETY".into());
        Ok(blocked)
    });

    let (status, body) = post_json(app(model), "/insight", json!({"object": {"title": "Casino chips"}})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"res": raw}));
}

#[tokio::test]
async fn insight_without_object_is_error_envelope() {
    let model = ScriptedModel::new(|| Ok(generation(json!({}), &[], vec![])));

    let (status, body) = post_json(app(model.clone()), "/insight", json!({"record": {}})).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, failure());
    assert!(model.requests().is_empty());
}

// === misc ===

#[tokio::test]
async fn health_is_ok() {
    let model = ScriptedModel::new(|| Ok(generation(json!({}), &[], vec![])));
    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();

    let response = app(model).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..], b"OK");
}

#[tokio::test]
async fn concurrent_requests_are_independent() {
    let model = ScriptedModel::new(|| Ok(generation(json!({}), &["ok"], vec![])));
    let app = app(model.clone());

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let app = app.clone();
            tokio::spawn(async move {
                post_json(app, "/chat", json!({"message": {"history": [], "message": format!("q{i}")}})).await
            })
        })
        .collect();

    for handle in handles {
        let (status, body) = handle.await.unwrap();
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["content"], "ok");
    }

    let mut inputs: Vec<String> = model.requests().into_iter().map(|r| r.input).collect();
    inputs.sort();
    assert_eq!(inputs, (0..8).map(|i| format!("q{i}")).collect::<Vec<_>>());
}
