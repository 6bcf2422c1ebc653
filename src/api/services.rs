//! Domain service façades
//!
//! Each façade fixes an endpoint path and payload shape and forwards to
//! [`ApiClient`]. None of them validate input; errors go straight up.

use async_trait::async_trait;
use serde_json::Value;

use super::client::ApiClient;
use super::error::ApiError;
use super::types::{
    AskRequest, AskResponse, ExecuteResult, ExpertiseLevel, ExtractRequest, HealthStatus, Row,
    SqlRequest,
};

pub const HEALTH_PATH: &str = "/health";
pub const QUERY_PATH: &str = "/postgres/query";
pub const EXECUTE_PATH: &str = "/postgres/execute";
pub const ASK_PATH: &str = "/api/v1/rag/ask";
pub const EXTRACT_PATH: &str = "/api/v1/privacy/extract";

/// Default base URL of the Qast RAG service
pub const DEFAULT_RAG_BASE_URL: &str = "http://localhost:8081";
pub const DEFAULT_USER_ID: &str = "frontend_user";
pub const DEFAULT_TEMPLATE: &str = "extract_knowledge_graph";

/// `GET /health`
#[derive(Debug, Clone)]
pub struct HealthService {
    client: ApiClient,
}

impl HealthService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn check(&self) -> Result<HealthStatus, ApiError> {
        self.client.get(HEALTH_PATH).await
    }
}

/// SQL passthrough over HTTP
#[derive(Debug, Clone)]
pub struct PostgresService {
    client: ApiClient,
}

impl PostgresService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Run a SELECT; rows come back in backend order
    pub async fn query(&self, query: &str, args: &[Value]) -> Result<Vec<Row>, ApiError> {
        self.client.post(QUERY_PATH, &sql_request(query, args)).await
    }

    /// Run an INSERT/UPDATE/DELETE
    pub async fn execute(&self, query: &str, args: &[Value]) -> Result<ExecuteResult, ApiError> {
        self.client
            .post(EXECUTE_PATH, &sql_request(query, args))
            .await
    }
}

fn sql_request(query: &str, args: &[Value]) -> SqlRequest {
    SqlRequest {
        query: query.to_string(),
        args: args.to_vec(),
    }
}

/// Qast RAG endpoints: ask and privacy extraction (ingest)
#[derive(Debug, Clone)]
pub struct RagService {
    client: ApiClient,
    user_id: String,
    template_name: String,
}

impl RagService {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            user_id: DEFAULT_USER_ID.to_string(),
            template_name: DEFAULT_TEMPLATE.to_string(),
        }
    }

    pub fn with_user_id(mut self, user_id: &str) -> Self {
        self.user_id = user_id.to_string();
        self
    }

    pub fn with_template(mut self, template_name: &str) -> Self {
        self.template_name = template_name.to_string();
        self
    }

    pub async fn ask(
        &self,
        query: &str,
        expertise_level: ExpertiseLevel,
    ) -> Result<AskResponse, ApiError> {
        let request = AskRequest {
            query: query.to_string(),
            expertise_level,
        };
        self.client.post(ASK_PATH, &request).await
    }

    /// Extract with the configured user id and template
    pub async fn extract(&self, text: &str) -> Result<Value, ApiError> {
        self.extract_with(text, &self.user_id, &self.template_name)
            .await
    }

    pub async fn extract_with(
        &self,
        text: &str,
        user_id: &str,
        template_name: &str,
    ) -> Result<Value, ApiError> {
        let request = ExtractRequest {
            text: text.to_string(),
            user_id: user_id.to_string(),
            template_name: template_name.to_string(),
        };
        self.client.post(EXTRACT_PATH, &request).await
    }
}

/// Backend operations the chat UI depends on
///
/// Implemented by [`QastClient`] for real HTTP and by mocks in tests.
#[async_trait]
pub trait QastBackend: Send + Sync {
    async fn health(&self) -> Result<HealthStatus, ApiError>;

    async fn ask(
        &self,
        query: &str,
        expertise_level: ExpertiseLevel,
    ) -> Result<AskResponse, ApiError>;

    async fn extract(&self, text: &str) -> Result<Value, ApiError>;
}

/// Health on the API server, ask/extract on the RAG service
#[derive(Debug, Clone)]
pub struct QastClient {
    health: HealthService,
    rag: RagService,
}

impl QastClient {
    pub fn new(health: HealthService, rag: RagService) -> Self {
        Self { health, rag }
    }
}

#[async_trait]
impl QastBackend for QastClient {
    async fn health(&self) -> Result<HealthStatus, ApiError> {
        self.health.check().await
    }

    async fn ask(
        &self,
        query: &str,
        expertise_level: ExpertiseLevel,
    ) -> Result<AskResponse, ApiError> {
        self.rag.ask(query, expertise_level).await
    }

    async fn extract(&self, text: &str) -> Result<Value, ApiError> {
        self.rag.extract(text).await
    }
}
