//! Request and response payloads for every backend endpoint

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// One result row from `/postgres/query`, column name to value
pub type Row = serde_json::Map<String, Value>;

/// `GET /health`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

/// Body shared by `/postgres/query` and `/postgres/execute`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SqlRequest {
    pub query: String,
    pub args: Vec<Value>,
}

/// `POST /postgres/execute`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecuteResult {
    pub rows_affected: i64,
}

/// How the RAG service should pitch its answer
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ExpertiseLevel {
    #[default]
    Novice,
    Expert,
}

impl ExpertiseLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExpertiseLevel::Novice => "novice",
            ExpertiseLevel::Expert => "expert",
        }
    }

    /// Next level in selector order (wraps)
    pub fn next(self) -> Self {
        match self {
            ExpertiseLevel::Novice => ExpertiseLevel::Expert,
            ExpertiseLevel::Expert => ExpertiseLevel::Novice,
        }
    }
}

impl fmt::Display for ExpertiseLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `POST /api/v1/rag/ask` request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AskRequest {
    pub query: String,
    pub expertise_level: ExpertiseLevel,
}

/// `POST /api/v1/rag/ask` response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AskResponse {
    pub answer: String,
    #[serde(default)]
    pub context: Vec<String>,
}

/// `POST /api/v1/privacy/extract` request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractRequest {
    pub text: String,
    pub user_id: String,
    pub template_name: String,
}
