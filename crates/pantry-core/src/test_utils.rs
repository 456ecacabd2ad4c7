//! Test utilities for pantry-core
//!
//! Mock upstream servers bound to an ephemeral local port:
//! - [`MockRecipeApi`]: the recipe search API (`GET /api/recipes/v2`)
//! - [`MockCompletionApi`]: an OpenAI-compatible completion API
//!   (`POST /chat/completions`, `GET /models`)
//!
//! Both record what they received so tests can check the outgoing requests.
//! The servers shut down when dropped.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{
    extract::{Json, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use tokio::sync::oneshot;

use crate::models::{Hit, RecipeSummary};

/// Bind an ephemeral port and serve `app` until the returned sender fires
async fn spawn(app: Router) -> (SocketAddr, oneshot::Sender<()>) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let (shutdown_tx, shutdown_rx) = oneshot::channel();

    tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                shutdown_rx.await.ok();
            })
            .await
            .unwrap();
    });

    (addr, shutdown_tx)
}

/// Base URL of a local port with nothing listening
///
/// Requests to it fail with a connection error rather than a URL error.
pub async fn closed_port_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

/// Build a hit with the given label and calories
pub fn sample_hit(label: &str, calories: f64) -> Hit {
    let slug = label.to_lowercase().replace(' ', "-");
    Hit {
        recipe: RecipeSummary {
            label: label.to_string(),
            image: format!("https://img.example.com/{}.jpg", slug),
            calories,
            url: format!("https://recipes.example.com/{}", slug),
        },
    }
}

// =============================================================================
// Recipe search API
// =============================================================================

#[derive(Debug)]
enum SearchReply {
    Hits(Vec<Hit>),
    /// 200 with this raw body
    Raw(&'static str),
    Status(u16),
}

#[derive(Clone)]
struct RecipeApiState {
    reply: Arc<SearchReply>,
    requests: Arc<Mutex<Vec<HashMap<String, String>>>>,
}

/// Mock recipe search API
pub struct MockRecipeApi {
    addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
    requests: Arc<Mutex<Vec<HashMap<String, String>>>>,
}

impl MockRecipeApi {
    /// Start a server answering every search with `hits`
    pub async fn start(hits: Vec<Hit>) -> Self {
        Self::start_with(SearchReply::Hits(hits)).await
    }

    /// Start a server answering every search with `status`
    pub async fn failing(status: u16) -> Self {
        Self::start_with(SearchReply::Status(status)).await
    }

    /// Start a server answering 200 with a body that is not JSON
    pub async fn malformed() -> Self {
        Self::start_with(SearchReply::Raw("<html>maintenance</html>")).await
    }

    /// Start a server answering 200 with JSON that has no `hits` field
    pub async fn without_hits() -> Self {
        Self::start_with(SearchReply::Raw(r#"{"from": 0, "to": 0, "count": 0}"#)).await
    }

    async fn start_with(reply: SearchReply) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = RecipeApiState {
            reply: Arc::new(reply),
            requests: requests.clone(),
        };

        let app = Router::new()
            .route("/api/recipes/v2", get(handle_search))
            .with_state(state);

        let (addr, shutdown_tx) = spawn(app).await;

        Self {
            addr,
            shutdown_tx: Some(shutdown_tx),
            requests,
        }
    }

    /// Get the base URL for this mock server
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Number of search requests received
    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Query parameters of the most recent request
    pub fn last_query(&self) -> Option<HashMap<String, String>> {
        self.requests.lock().unwrap().last().cloned()
    }

    /// Stop the mock server
    pub fn stop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockRecipeApi {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn handle_search(
    State(state): State<RecipeApiState>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    state.requests.lock().unwrap().push(params);

    match state.reply.as_ref() {
        SearchReply::Hits(hits) => {
            let count = hits.len();
            let from = usize::from(count > 0);
            Json(json!({
                "from": from,
                "to": count,
                "count": count,
                "hits": hits,
            }))
            .into_response()
        }
        SearchReply::Raw(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/json")],
            *body,
        )
            .into_response(),
        SearchReply::Status(status) => {
            let status = StatusCode::from_u16(*status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            (status, "upstream unavailable").into_response()
        }
    }
}

// =============================================================================
// Completion API
// =============================================================================

#[derive(Debug)]
enum CompletionReply {
    Content(Option<String>),
    Error { status: u16, body: String },
}

#[derive(Debug, Default)]
struct Recorded {
    calls: usize,
    last_body: Option<Value>,
    last_authorization: Option<String>,
}

#[derive(Clone)]
struct CompletionApiState {
    reply: Arc<CompletionReply>,
    recorded: Arc<Mutex<Recorded>>,
}

/// Mock OpenAI-compatible completion API
pub struct MockCompletionApi {
    addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
    recorded: Arc<Mutex<Recorded>>,
}

impl MockCompletionApi {
    /// Start a server whose first choice carries `content`
    pub async fn start(content: &str) -> Self {
        Self::start_with(CompletionReply::Content(Some(content.to_string()))).await
    }

    /// Start a server whose first choice has `content: null`
    pub async fn without_content() -> Self {
        Self::start_with(CompletionReply::Content(None)).await
    }

    /// Start a server answering completions with `status` and a raw JSON body
    pub async fn failing(status: u16, body: &str) -> Self {
        Self::start_with(CompletionReply::Error {
            status,
            body: body.to_string(),
        })
        .await
    }

    async fn start_with(reply: CompletionReply) -> Self {
        let recorded = Arc::new(Mutex::new(Recorded::default()));
        let state = CompletionApiState {
            reply: Arc::new(reply),
            recorded: recorded.clone(),
        };

        let app = Router::new()
            .route("/chat/completions", post(handle_completion))
            .route("/models", get(handle_models))
            .with_state(state);

        let (addr, shutdown_tx) = spawn(app).await;

        Self {
            addr,
            shutdown_tx: Some(shutdown_tx),
            recorded,
        }
    }

    /// Get the base URL for this mock server
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Number of completion requests received
    pub fn call_count(&self) -> usize {
        self.recorded.lock().unwrap().calls
    }

    /// JSON body of the most recent completion request
    pub fn last_request(&self) -> Option<Value> {
        self.recorded.lock().unwrap().last_body.clone()
    }

    /// Authorization header of the most recent completion request
    pub fn last_authorization(&self) -> Option<String> {
        self.recorded.lock().unwrap().last_authorization.clone()
    }

    /// Stop the mock server
    pub fn stop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockCompletionApi {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn handle_completion(
    State(state): State<CompletionApiState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    {
        let mut recorded = state.recorded.lock().unwrap();
        recorded.calls += 1;
        recorded.last_body = Some(body);
        recorded.last_authorization = headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
    }

    match state.reply.as_ref() {
        CompletionReply::Content(content) => Json(json!({
            "id": "gen-mock",
            "object": "chat.completion",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": content},
                "finish_reason": "stop"
            }]
        }))
        .into_response(),
        CompletionReply::Error { status, body } => {
            let status = StatusCode::from_u16(*status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            (
                status,
                [(header::CONTENT_TYPE, "application/json")],
                body.clone(),
            )
                .into_response()
        }
    }
}

async fn handle_models() -> Json<Value> {
    Json(json!({
        "data": [{"id": "mistralai/mistral-7b-instruct:free"}]
    }))
}
