use crawlerx_core::{Job, JobSummary};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde_json::json;

use crate::{ApiError, ApiSettings, FailureKind};

/// The backend's job endpoints.
#[async_trait::async_trait]
pub trait CrawlApi: Send + Sync {
    /// `POST /crawl`
    async fn create_job(&self, url: &str) -> Result<JobSummary, ApiError>;

    /// `GET /jobs`. A `null` or empty body is an empty list.
    async fn list_jobs(&self) -> Result<Vec<Job>, ApiError>;

    /// `GET /jobs/{id}`. `Ok(None)` when the backend answers without a record.
    async fn get_job(&self, job_id: &str) -> Result<Option<Job>, ApiError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestCrawlApi {
    settings: ApiSettings,
    client: reqwest::Client,
}

impl ReqwestCrawlApi {
    pub fn new(settings: ApiSettings) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ApiError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }

    pub fn settings(&self) -> &ApiSettings {
        &self.settings
    }

    async fn read_body(&self, request: reqwest::RequestBuilder) -> Result<Vec<u8>, ApiError> {
        let response = request
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let bytes = response.bytes().await.map_err(map_reqwest_error)?;
        Ok(bytes.to_vec())
    }
}

#[async_trait::async_trait]
impl CrawlApi for ReqwestCrawlApi {
    async fn create_job(&self, url: &str) -> Result<JobSummary, ApiError> {
        let endpoint = self.settings.endpoint(&["crawl"])?;
        let body = json!({ "url": url }).to_string();
        let request = self
            .client
            .post(endpoint)
            .header(CONTENT_TYPE, "application/json")
            .body(body);
        let bytes = self.read_body(request).await?;
        serde_json::from_slice(&bytes).map_err(decode_error)
    }

    async fn list_jobs(&self) -> Result<Vec<Job>, ApiError> {
        let endpoint = self.settings.endpoint(&["jobs"])?;
        let bytes = self.read_body(self.client.get(endpoint)).await?;
        if is_blank(&bytes) {
            return Ok(Vec::new());
        }
        let jobs: Option<Vec<Job>> = serde_json::from_slice(&bytes).map_err(decode_error)?;
        Ok(jobs.unwrap_or_default())
    }

    async fn get_job(&self, job_id: &str) -> Result<Option<Job>, ApiError> {
        let endpoint = self.settings.endpoint(&["jobs", job_id])?;
        let bytes = self.read_body(self.client.get(endpoint)).await?;
        if is_blank(&bytes) {
            return Ok(None);
        }
        serde_json::from_slice(&bytes).map_err(decode_error)
    }
}

fn is_blank(bytes: &[u8]) -> bool {
    bytes.iter().all(u8::is_ascii_whitespace)
}

fn decode_error(err: serde_json::Error) -> ApiError {
    ApiError::new(FailureKind::Decode, err.to_string())
}

fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::new(FailureKind::Timeout, err.to_string());
    }
    ApiError::new(FailureKind::Network, err.to_string())
}
