//! HTTP client for the vision classification API.
//!
//! Requests carry a base64 image; responses arrive in a
//! `{ success, data, error }` envelope and are validated field by
//! field before anything reaches the domain.

use std::time::Duration;

use serde::Serialize;
use serde_json::Value;

use super::types::{AnalysisResult, ClassificationError};

/// Default request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Vision classification API client.
pub struct VisionClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

#[derive(Serialize)]
struct ClassifyRequest<'a> {
    image_base64: &'a str,
}

#[derive(Serialize)]
struct RefineRequest<'a> {
    previous: &'a AnalysisResult,
    feedback: &'a str,
    image_base64: &'a str,
}

/// API response envelope.
#[derive(Debug, serde::Deserialize)]
struct ApiResponse {
    success: bool,
    data: Option<Value>,
    error: Option<ApiError>,
}

#[derive(Debug, Default, serde::Deserialize)]
struct ApiError {
    #[allow(dead_code)]
    code: Option<String>,
    message: String,
}

impl VisionClient {
    /// Create a client for the given endpoint.
    pub fn new(base_url: String, api_key: String) -> Result<Self, ClassificationError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ClassificationError::Api(e.to_string()))?;

        Ok(Self {
            http,
            base_url,
            api_key,
        })
    }

    /// Classify a waste item from a base64-encoded image.
    pub async fn classify(&self, image_base64: &str) -> Result<AnalysisResult, ClassificationError> {
        self.post("/classify", &ClassifyRequest { image_base64 }).await
    }

    /// Re-run classification with user feedback on a previous result.
    pub async fn refine(
        &self,
        previous: &AnalysisResult,
        feedback: &str,
        image_base64: &str,
    ) -> Result<AnalysisResult, ClassificationError> {
        self.post(
            "/refine",
            &RefineRequest {
                previous,
                feedback,
                image_base64,
            },
        )
        .await
    }

    async fn post<T: Serialize>(
        &self,
        endpoint: &str,
        body: &T,
    ) -> Result<AnalysisResult, ClassificationError> {
        let url = format!("{}{}", self.base_url, endpoint);

        let response = self
            .http
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(body)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() || e.is_timeout() {
                    ClassificationError::Offline
                } else {
                    ClassificationError::Api(e.to_string())
                }
            })?;

        let status = response.status();
        if status.is_server_error() {
            return Err(ClassificationError::Offline);
        }
        if !status.is_success() {
            return Err(ClassificationError::Api(format!(
                "API returned status {status}"
            )));
        }

        let envelope: ApiResponse = response
            .json()
            .await
            .map_err(|e| ClassificationError::Serialization(e.to_string()))?;

        if !envelope.success {
            let message = envelope
                .error
                .map(|e| e.message)
                .unwrap_or_else(|| "unknown API error".to_string());
            return Err(ClassificationError::Api(message));
        }

        let data = envelope.data.ok_or_else(|| {
            ClassificationError::Api("API returned success but no data".to_string())
        })?;

        AnalysisResult::from_value(&data)
    }
}
