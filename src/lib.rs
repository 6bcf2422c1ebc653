//! qast: client for the Qast RAG service and wodge HTTP backends
//!
//! This library provides:
//! - An HTTP adapter with typed errors and one façade per backend endpoint
//! - SQL passthrough (query/execute) and a table CRUD helper
//! - A request lifecycle state machine with one in-flight request per slot
//! - Terminal UI (TUI) for RAG chat and knowledge ingestion

pub mod api;
pub mod config;
pub mod lifecycle;
pub mod transport;
pub mod tui;

pub use api::{ApiClient, ApiError, QastBackend, QastClient};
pub use config::Config;
pub use lifecycle::{OutcomeSlot, RequestOutcome};
