//! Backend API access
//!
//! - [`client`]: the HTTP adapter (`get`/`post`/`delete`)
//! - [`services`]: one façade per backend feature
//! - [`table`]: CRUD over a single table via the SQL façade

pub mod client;
pub mod error;
pub mod services;
pub mod table;
pub mod types;

pub use client::{ApiClient, ServiceRequest, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
pub use error::ApiError;
pub use services::{
    HealthService, PostgresService, QastBackend, QastClient, RagService, DEFAULT_RAG_BASE_URL,
    DEFAULT_TEMPLATE, DEFAULT_USER_ID,
};
pub use table::TableService;
pub use types::{
    AskRequest, AskResponse, ExecuteResult, ExpertiseLevel, ExtractRequest, HealthStatus, Row,
    SqlRequest,
};
