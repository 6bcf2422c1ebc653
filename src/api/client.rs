//! HTTP client adapter
//!
//! Wraps `reqwest` into three verbs (GET/POST/DELETE) against a fixed base
//! URL. All three go through [`ApiClient::send`], which performs exactly one
//! round trip and normalizes failures into [`ApiError`].

use reqwest::header::CONTENT_TYPE;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

use super::error::ApiError;

/// Default base URL of the wodge API server
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";

/// Default per-request timeout
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Immutable description of one backend call
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

impl ServiceRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            path: path.into(),
            body: None,
        }
    }

    /// Build a POST request, serializing `body` up front
    pub fn post<B: Serialize + ?Sized>(
        path: impl Into<String>,
        body: &B,
    ) -> Result<Self, ApiError> {
        let body = serde_json::to_value(body).map_err(|e| ApiError::Encode(e.to_string()))?;
        Ok(Self {
            method: Method::POST,
            path: path.into(),
            body: Some(body),
        })
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self {
            method: Method::DELETE,
            path: path.into(),
            body: None,
        }
    }
}

/// JSON-over-HTTP client bound to one base URL
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client with the default timeout
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        Self::with_timeout(base_url, Some(Duration::from_secs(DEFAULT_TIMEOUT_SECS)))
    }

    /// Create a client; `None` leaves the transport without a timeout
    pub fn with_timeout(base_url: &str, timeout: Option<Duration>) -> Result<Self, ApiError> {
        let parsed = url::Url::parse(base_url)
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ApiError::InvalidUrl(format!(
                "{}: scheme must be http or https",
                base_url
            )));
        }

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ApiError::Transport(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Join `path` onto the base URL with exactly one `/` between them
    pub fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send(ServiceRequest::get(path)).await
    }

    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send(ServiceRequest::post(path, body)?).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send(ServiceRequest::delete(path)).await
    }

    /// Perform one round trip and decode the JSON body into `T`
    pub async fn send<T: DeserializeOwned>(&self, request: ServiceRequest) -> Result<T, ApiError> {
        let url = self.url_for(&request.path);
        tracing::debug!(method = %request.method, %url, "sending request");

        let mut builder = self
            .client
            .request(request.method.clone(), &url)
            .header(CONTENT_TYPE, "application/json");
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| {
            let err = ApiError::from_network_error(e);
            tracing::warn!(method = %request.method, %url, error = %err, "request failed");
            err
        })?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(ApiError::from_network_error)?;
        tracing::debug!(%url, status = status.as_u16(), bytes = body.len(), "response received");

        if !status.is_success() {
            let err = ApiError::from_http_status(status, &body);
            tracing::warn!(
                method = %request.method,
                %url,
                status = status.as_u16(),
                error = %err,
                "backend returned error status"
            );
            return Err(err);
        }

        serde_json::from_slice(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }
}
