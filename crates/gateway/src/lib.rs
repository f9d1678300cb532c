//! HTTP webhook gateway for IronBrief.
//!
//! Transport glue only: one inbound webhook route and a health check. The
//! interesting work happens in `handle_message`, which runs the pipeline —
//! detect language, classify intent, then either acknowledge a
//! knowledge-update request or generate a grounded reply.
//!
//! Update requests are acknowledged and logged; nothing is written to the
//! knowledge base from here.

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use ironbrief_assistant::Assistant;
use ironbrief_core::generate::TextGenerator;
use ironbrief_core::language::LanguageTag;
use ironbrief_inference::OllamaClient;
use ironbrief_knowledge::{FsWatcher, KnowledgeStore};

/// Shared application state for the gateway.
pub struct GatewayState {
    pub assistant: Assistant,
    pub store: Arc<KnowledgeStore>,
}

type SharedState = Arc<GatewayState>;

/// Build the Axum router with all gateway routes.
pub fn build_router(state: SharedState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/webhook", post(webhook_handler))
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .with_state(state)
}

/// Run the full pipeline for one inbound message and produce the reply text.
///
/// Never fails: every pipeline component degrades internally, so the caller
/// always has something to send back.
pub async fn handle_message(assistant: &Assistant, text: &str, source_id: &str) -> String {
    let lang = assistant.detect_language(text).await;

    if assistant.is_knowledge_update(text).await {
        // No write path: acknowledging is the whole side effect.
        info!(source_id, lang = %lang, message = %text, "Knowledge update request acknowledged");
        acknowledgment(lang).to_string()
    } else {
        assistant.respond(text, lang).await
    }
}

/// The transport-synthesized acknowledgment for an update request.
fn acknowledgment(lang: LanguageTag) -> &'static str {
    if lang.is_chinese() {
        "收到,我記下來了!"
    } else {
        "Got it, noted!"
    }
}

// ── Handlers ──────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct WebhookRequest {
    text: String,
    #[serde(default)]
    source_id: String,
}

#[derive(Debug, Serialize)]
struct WebhookReply {
    reply: String,
}

async fn webhook_handler(
    State(state): State<SharedState>,
    Json(request): Json<WebhookRequest>,
) -> Result<Json<WebhookReply>, StatusCode> {
    if request.text.trim().is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }

    let reply = handle_message(&state.assistant, &request.text, &request.source_id).await;
    Ok(Json(WebhookReply { reply }))
}

async fn health_handler(State(state): State<SharedState>) -> Json<serde_json::Value> {
    let snapshot = state.store.snapshot();
    Json(serde_json::json!({
        "status": "ok",
        "knowledge_loaded_at": snapshot.loaded_at,
        "knowledge_chars": snapshot.total_chars(),
    }))
}

// ── Startup ───────────────────────────────────────────────────────────

/// Start the gateway HTTP server: wire the inference client, load and watch
/// the knowledge base, and serve until shutdown.
pub async fn start(config: ironbrief_config::AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let generator: Arc<dyn TextGenerator> = Arc::new(OllamaClient::new(
        config.inference.endpoint.clone(),
        config.inference.model.clone(),
        std::time::Duration::from_secs(config.inference.timeout_secs),
    ));

    let store = Arc::new(KnowledgeStore::new(&config.knowledge.root));
    store.load().await;

    // The watcher must outlive the server; a failed setup just means no
    // auto-reload.
    let watcher = FsWatcher::markdown();
    let _watch_task = Arc::clone(&store).watch(&watcher);

    let assistant = Assistant::new(generator, Arc::clone(&store));
    let state = Arc::new(GatewayState { assistant, store });

    let addr = format!("{}:{}", config.gateway.host, config.gateway.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(addr = %addr, model = %config.inference.model, "Gateway listening");

    axum::serve(listener, build_router(state)).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use http_body_util::BodyExt;
    use ironbrief_core::error::InferenceError;
    use std::sync::Mutex;
    use tower::ServiceExt;

    /// Returns scripted outcomes in order; panics when the script runs dry.
    struct Scripted {
        outcomes: Mutex<Vec<Result<String, InferenceError>>>,
    }

    impl Scripted {
        fn replies(texts: &[&str]) -> Arc<Self> {
            Arc::new(Self {
                outcomes: Mutex::new(texts.iter().map(|t| Ok(t.to_string())).collect()),
            })
        }
    }

    #[async_trait]
    impl TextGenerator for Scripted {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn generate(&self, _prompt: &str, _max_tokens: u32) -> Result<String, InferenceError> {
            let mut outcomes = self.outcomes.lock().unwrap();
            assert!(!outcomes.is_empty(), "scripted generator ran dry");
            outcomes.remove(0)
        }
    }

    fn state_with(generator: Arc<dyn TextGenerator>) -> (SharedState, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(KnowledgeStore::new(dir.path()));
        let assistant = Assistant::new(generator, Arc::clone(&store));
        (Arc::new(GatewayState { assistant, store }), dir)
    }

    #[tokio::test]
    async fn update_intent_gets_an_acknowledgment() {
        // detect → zh-TW, intent confirm → YES; no generation call happens.
        let generator = Scripted::replies(&["zh-TW", "YES"]);
        let (state, _dir) = state_with(generator);

        let reply = handle_message(&state.assistant, "記得明天要打電話給客戶", "user-1").await;
        assert_eq!(reply, "收到,我記下來了!");
    }

    #[tokio::test]
    async fn question_gets_a_generated_reply() {
        // detect → en; no intent rule matches, so the next scripted reply
        // feeds generation directly.
        let generator = Scripted::replies(&["en", "The export ships next week."]);
        let (state, _dir) = state_with(generator);

        let reply = handle_message(&state.assistant, "when does the export ship?", "user-1").await;
        assert_eq!(reply, "The export ships next week.");
    }

    #[tokio::test]
    async fn rejected_update_falls_through_to_generation() {
        let generator = Scripted::replies(&["en", "NO", "No progress recorded yet."]);
        let (state, _dir) = state_with(generator);

        let reply = handle_message(&state.assistant, "what's the progress?", "user-1").await;
        assert_eq!(reply, "No progress recorded yet.");
    }

    #[tokio::test]
    async fn webhook_round_trip() {
        let generator = Scripted::replies(&["en", "hi there"]);
        let (state, _dir) = state_with(generator);
        let app = build_router(state);

        let response = app
            .oneshot(
                axum::http::Request::post("/webhook")
                    .header("content-type", "application/json")
                    .body(axum::body::Body::from(
                        r#"{"text": "say hi", "source_id": "u1"}"#,
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let parsed: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(parsed["reply"], "hi there");
    }

    #[tokio::test]
    async fn blank_text_is_rejected() {
        let generator = Scripted::replies(&[]);
        let (state, _dir) = state_with(generator);
        let app = build_router(state);

        let response = app
            .oneshot(
                axum::http::Request::post("/webhook")
                    .header("content-type", "application/json")
                    .body(axum::body::Body::from(r#"{"text": "   "}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn health_reports_knowledge_state() {
        let generator = Scripted::replies(&[]);
        let (state, _dir) = state_with(generator);
        let app = build_router(state);

        let response = app
            .oneshot(
                axum::http::Request::get("/health")
                    .body(axum::body::Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let parsed: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(parsed["status"], "ok");
        assert_eq!(parsed["knowledge_chars"], 0);
    }
}
