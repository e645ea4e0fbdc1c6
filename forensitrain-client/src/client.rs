//! Enrichment backend HTTP client
//!
//! Every JSON endpoint answers with the same envelope:
//! `{status: "success"|other, data: T, errors: string|null}`.
//! Non-2xx responses and failure envelopes both surface as
//! [`ClientError::RequestFailed`] carrying the backend message when present.

use async_trait::async_trait;
use reqwest::multipart;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

use forensitrain_core::{
    GeosocialFootprint, ImageReport, PhoneReport, RawEnrichment, ALLOWED_IMAGE_MIME,
    MAX_IMAGE_BYTES,
};

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend API base URL
    pub base_url: String,
    /// Request timeout in seconds. The original client had none; a hung
    /// request would sit in-flight until superseded, so the timeout is
    /// explicit and configurable here.
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000/api".to_string(),
            timeout_secs: 30,
        }
    }
}

impl ClientConfig {
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.to_string();
        self
    }

    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}

/// Errors from the enrichment client
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),

    /// Bad local input; never reaches the network
    #[error("{0}")]
    Validation(String),

    /// Transport error, non-2xx status, or failure envelope
    #[error("Request failed: {0}")]
    RequestFailed(String),
}

/// Report export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Pdf,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Pdf => "pdf",
        }
    }
}

/// Exported report body
#[derive(Debug, Clone)]
pub enum ExportPayload {
    Json(serde_json::Value),
    Pdf(Vec<u8>),
}

/// An image queued for analysis
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    /// Local pre-flight check: MIME type and size limits are enforced
    /// before anything touches the network.
    pub fn validate(&self) -> Result<(), ClientError> {
        if !ALLOWED_IMAGE_MIME.contains(&self.mime.as_str()) {
            return Err(ClientError::Validation(format!(
                "Unsupported image type: {} (expected JPEG or PNG)",
                self.mime
            )));
        }
        if self.bytes.len() > MAX_IMAGE_BYTES {
            return Err(ClientError::Validation(format!(
                "Image too large: {} bytes (limit {} bytes)",
                self.bytes.len(),
                MAX_IMAGE_BYTES
            )));
        }
        Ok(())
    }
}

/// Common interface to the enrichment backend.
///
/// The orchestrator is driven through this trait so tests can substitute a
/// mock backend.
#[async_trait]
pub trait Enrichment: Send + Sync {
    /// Carrier/validity lookup only
    async fn analyze_phone(&self, phone: &str) -> Result<PhoneReport, ClientError>;

    /// Full enrichment: analyze plus accounts, breaches, emails
    async fn enrich_phone(&self, phone: &str) -> Result<RawEnrichment, ClientError>;

    /// Image metadata analysis; input is validated locally first
    async fn analyze_image(&self, upload: &ImageUpload) -> Result<ImageReport, ClientError>;

    /// Geotagged post history for a username
    async fn fetch_footprint(&self, username: &str) -> Result<GeosocialFootprint, ClientError>;

    /// Export the investigation report as JSON or PDF
    async fn export_report(
        &self,
        phone: &str,
        fmt: ExportFormat,
    ) -> Result<ExportPayload, ClientError>;
}

/// Thread-safe reference to an enrichment backend
pub type SharedEnrichment = Arc<dyn Enrichment>;

/// Response envelope shared by all JSON endpoints
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    status: String,
    data: Option<T>,
    #[serde(default)]
    errors: Option<String>,
}

/// reqwest-backed enrichment client
pub struct EnrichmentClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl EnrichmentClient {
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ClientError::ClientBuild(e.to_string()))?;
        Ok(Self { http, config })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    async fn post_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: serde_json::Value,
    ) -> Result<T, ClientError> {
        debug!("POST {}", path);
        let response = self
            .http
            .post(self.endpoint(path))
            .json(&body)
            .send()
            .await
            .map_err(|e| ClientError::RequestFailed(e.to_string()))?;
        Self::decode(response).await
    }

    /// Normalize HTTP status and envelope status into one failure path
    async fn decode<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = response.status();
        if !status.is_success() {
            warn!("Backend returned {}", status);
            return Err(ClientError::RequestFailed(format!(
                "backend returned {}",
                status
            )));
        }

        let envelope: Envelope<T> = response
            .json()
            .await
            .map_err(|e| ClientError::RequestFailed(format!("malformed response: {}", e)))?;

        if envelope.status != "success" {
            return Err(ClientError::RequestFailed(
                envelope
                    .errors
                    .unwrap_or_else(|| "request failed".to_string()),
            ));
        }

        envelope
            .data
            .ok_or_else(|| ClientError::RequestFailed("empty response data".to_string()))
    }
}

#[async_trait]
impl Enrichment for EnrichmentClient {
    async fn analyze_phone(&self, phone: &str) -> Result<PhoneReport, ClientError> {
        self.post_json("/phone/analyze", json!({ "phone_number": phone }))
            .await
    }

    async fn enrich_phone(&self, phone: &str) -> Result<RawEnrichment, ClientError> {
        self.post_json("/phone/enrich", json!({ "phone_number": phone }))
            .await
    }

    async fn analyze_image(&self, upload: &ImageUpload) -> Result<ImageReport, ClientError> {
        upload.validate()?;

        let part = multipart::Part::bytes(upload.bytes.clone())
            .file_name(upload.file_name.clone())
            .mime_str(&upload.mime)
            .map_err(|e| ClientError::Validation(e.to_string()))?;
        let form = multipart::Form::new().part("file", part);

        debug!("POST /analyze-image ({} bytes)", upload.bytes.len());
        let response = self
            .http
            .post(self.endpoint("/analyze-image"))
            .multipart(form)
            .send()
            .await
            .map_err(|e| ClientError::RequestFailed(e.to_string()))?;
        Self::decode(response).await
    }

    async fn fetch_footprint(&self, username: &str) -> Result<GeosocialFootprint, ClientError> {
        self.post_json("/geosocial/footprint", json!({ "username": username }))
            .await
    }

    async fn export_report(
        &self,
        phone: &str,
        fmt: ExportFormat,
    ) -> Result<ExportPayload, ClientError> {
        let url = format!("{}?fmt={}", self.endpoint("/phone/export"), fmt.as_str());
        debug!("POST /phone/export?fmt={}", fmt.as_str());

        let response = self
            .http
            .post(url)
            .json(&json!({ "phone_number": phone }))
            .send()
            .await
            .map_err(|e| ClientError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::RequestFailed(format!(
                "backend returned {}",
                status
            )));
        }

        // The PDF body is raw bytes; only the JSON variant is enveloped-free JSON
        match fmt {
            ExportFormat::Pdf => {
                let bytes = response
                    .bytes()
                    .await
                    .map_err(|e| ClientError::RequestFailed(e.to_string()))?;
                Ok(ExportPayload::Pdf(bytes.to_vec()))
            }
            ExportFormat::Json => {
                let value = response
                    .json()
                    .await
                    .map_err(|e| ClientError::RequestFailed(format!("malformed response: {}", e)))?;
                Ok(ExportPayload::Json(value))
            }
        }
    }
}
