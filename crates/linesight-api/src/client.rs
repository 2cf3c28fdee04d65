//! HTTP client for the LineSight ingestion API.

use std::path::Path;

use reqwest::StatusCode;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT};
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;

use linesight_model::{
    ColumnMatchResult, ConfirmMappingRequest, ConfirmMappingResponse, DataSource, DataSourceId,
    DataSourcePatch, FactoryId, ProductionLine,
};

use crate::checksum::compute_file_sha256;
use crate::error::{ApiError, Result};

/// User agent string for API requests.
const USER_AGENT_VALUE: &str = concat!("linesight-cli/", env!("CARGO_PKG_VERSION"));

/// Client for the LineSight ingestion REST API.
///
/// All calls are asynchronous and are made exactly once: there are no
/// retries, and recovery is user-initiated. No request timeout is configured,
/// matching the product behavior this client mirrors; a hung request keeps
/// its caller waiting.
#[derive(Debug, Clone)]
pub struct IngestClient {
    client: reqwest::Client,
    base_url: String,
}

impl IngestClient {
    /// Creates a client for the backend at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| ApiError::Network(format!("failed to create HTTP client: {e}")))?;

        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Upload a file and get the backend's column match suggestions.
    ///
    /// Sends multipart/form-data with the file contents and its SHA256
    /// checksum. The matching itself (hash/fuzzy/LLM tiers) runs entirely
    /// server-side.
    pub async fn upload_and_match(&self, path: &Path) -> Result<Vec<ColumnMatchResult>> {
        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(str::to_string)
            .ok_or_else(|| {
                ApiError::InvalidRequest(format!("not a file path: {}", path.display()))
            })?;

        let checksum = compute_file_sha256(path)?;
        tracing::debug!("Uploading {} (sha256 {})", filename, checksum);

        let bytes = tokio::fs::read(path).await.map_err(ApiError::from)?;
        let part = Part::bytes(bytes)
            .file_name(filename)
            .mime_str("application/octet-stream")
            .map_err(|e| ApiError::InvalidRequest(e.to_string()))?;
        let form = Form::new().part("file", part).text("checksum", checksum);

        let url = format!("{}/api/v1/ingestion/upload_and_match", self.base_url);
        let response = self.client.post(&url).multipart(form).send().await?;
        handle_response(response).await
    }

    /// List a factory's production lines.
    ///
    /// A line whose `data_source` is null has simply not been configured
    /// yet; callers render that as a guided empty state, not an error.
    pub async fn list_lines(&self, factory_id: &FactoryId) -> Result<Vec<ProductionLine>> {
        let url = format!("{}/api/v1/factories/{}/lines", self.base_url, factory_id);
        let response = self.client.get(&url).send().await?;
        handle_response(response).await
    }

    /// Fetch a single data source.
    pub async fn get_data_source(&self, id: &DataSourceId) -> Result<DataSource> {
        let url = format!("{}/api/v1/data-sources/{}", self.base_url, id);
        let response = self.client.get(&url).send().await?;
        handle_response(response).await
    }

    /// Update a data source's editable fields (time column, description).
    ///
    /// The active schema's column map has no update surface: changing a
    /// confirmed schema requires a new upload cycle.
    pub async fn update_data_source(
        &self,
        id: &DataSourceId,
        patch: &DataSourcePatch,
    ) -> Result<DataSource> {
        if patch.is_empty() {
            return Err(ApiError::InvalidRequest(
                "nothing to update: set a time column or description".to_string(),
            ));
        }
        let url = format!("{}/api/v1/data-sources/{}", self.base_url, id);
        let response = self.client.put(&url).json(patch).send().await?;
        handle_response(response).await
    }

    /// Submit a reviewed mapping for confirmation.
    ///
    /// On success the backend creates (or updates) the data source and
    /// persists a new immutable schema mapping version.
    pub async fn confirm_mapping(
        &self,
        request: &ConfirmMappingRequest,
    ) -> Result<ConfirmMappingResponse> {
        let url = format!("{}/api/v1/ingestion/confirm_mapping", self.base_url);
        let response = self.client.post(&url).json(request).send().await?;
        handle_response(response).await
    }
}

/// Map a response to a typed payload.
///
/// Non-success statuses become [`ApiError::Status`] carrying the status code
/// and the response body text.
async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(status_error(status, body));
    }

    let payload: T = response.json().await?;
    Ok(payload)
}

fn status_error(status: StatusCode, body: String) -> ApiError {
    ApiError::Status {
        status: status.as_u16(),
        body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_creation_and_base_url_trimming() {
        let client = IngestClient::new("http://localhost:8000/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000");
    }

    #[test]
    fn status_errors_keep_the_body_text() {
        let err = status_error(
            StatusCode::UNPROCESSABLE_ENTITY,
            "{\"detail\": \"missing time_column\"}".to_string(),
        );
        match err {
            ApiError::Status { status, body } => {
                assert_eq!(status, 422);
                assert!(body.contains("missing time_column"));
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }
}
