//! Mock backend shared by the integration tests
//!
//! Serves every endpoint the client talks to on an ephemeral port and records
//! the request bodies it receives.

#![allow(dead_code)]

use axum::{
    extract::State,
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Request bodies seen by the mock, in arrival order
#[derive(Clone, Default)]
pub struct Recorder {
    calls: Arc<Mutex<Vec<(String, Value)>>>,
}

impl Recorder {
    fn record(&self, path: &str, body: Value) {
        self.calls.lock().unwrap().push((path.to_string(), body));
    }

    pub fn calls(&self) -> Vec<(String, Value)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, path: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(p, _)| p == path)
            .count()
    }
}

async fn health(State(rec): State<Recorder>) -> Json<Value> {
    rec.record("/health", Value::Null);
    Json(json!({"status": "ok"}))
}

async fn query(State(rec): State<Recorder>, Json(body): Json<Value>) -> Json<Value> {
    rec.record("/postgres/query", body.clone());
    let sql = body["query"].as_str().unwrap_or_default().to_string();
    if sql.contains("WHERE id = $1") {
        if body["args"][0] == json!("1") {
            return Json(json!([{"id": "1", "name": "widget"}]));
        }
        return Json(json!([]));
    }
    Json(json!([
        {"id": "1", "name": "widget"},
        {"id": "2", "name": "gadget"}
    ]))
}

async fn execute(State(rec): State<Recorder>, Json(body): Json<Value>) -> Json<Value> {
    rec.record("/postgres/execute", body);
    Json(json!({"rows_affected": 1}))
}

async fn ask(State(rec): State<Recorder>, Json(body): Json<Value>) -> Json<Value> {
    rec.record("/api/v1/rag/ask", body);
    Json(json!({"answer": "Qast is a RAG system.", "context": ["doc1"]}))
}

async fn extract(State(rec): State<Recorder>, Json(body): Json<Value>) -> Json<Value> {
    rec.record("/api/v1/privacy/extract", body);
    Json(json!({"result": {"triples": 3}}))
}

async fn remove_item(State(rec): State<Recorder>) -> Json<Value> {
    rec.record("/items/1", Value::Null);
    Json(json!({"deleted": true}))
}

async fn server_error() -> (StatusCode, &'static str) {
    (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded")
}

async fn bad_request() -> (StatusCode, Json<Value>) {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({"error": "query is required"})),
    )
}

async fn wrong_shape() -> Json<Value> {
    Json(json!({"unexpected": true}))
}

async fn slow() -> Json<Value> {
    tokio::time::sleep(Duration::from_secs(3)).await;
    Json(json!({"status": "late"}))
}

/// Healthy backend with every endpoint mounted at the root
pub fn backend_router(rec: Recorder) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/postgres/query", post(query))
        .route("/postgres/execute", post(execute))
        .route("/api/v1/rag/ask", post(ask))
        .route("/api/v1/privacy/extract", post(extract))
        .route("/items/1", delete(remove_item))
        .route("/api/health", get(health))
        .route("/broken", get(server_error))
        .route("/rejects", post(bad_request))
        .route("/wrong-shape", get(wrong_shape))
        .route("/slow", get(slow))
        .with_state(rec)
}

/// Backend where every RAG endpoint answers 500 with a non-JSON body
pub fn failing_router() -> Router {
    Router::new()
        .route("/health", get(server_error))
        .route("/api/v1/rag/ask", post(server_error))
        .route("/api/v1/privacy/extract", post(server_error))
}

/// Serve `router` on 127.0.0.1 with an OS-assigned port; returns the base URL
pub async fn spawn(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

/// A base URL nothing is listening on
pub async fn closed_port() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}
