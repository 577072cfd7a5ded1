use std::time::Duration;

use crawlerx_core::ExportFormat;
use url::Url;

use crate::{ApiError, FailureKind};

/// Where the backend lives and how long to wait for it.
#[derive(Debug, Clone)]
pub struct ApiSettings {
    /// Scheme, host and optional port, e.g. `http://localhost:8080`.
    pub base_url: String,
    /// Path prefix in front of every route, e.g. `/api/v1`. May be empty.
    pub api_prefix: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            api_prefix: "/api/v1".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl ApiSettings {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// `base_url` + `api_prefix` + the given path segments, each segment
    /// percent-encoded.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = Url::parse(self.base_url.trim()).map_err(|err| {
            ApiError::new(FailureKind::InvalidUrl, format!("{}: {err}", self.base_url))
        })?;
        {
            let mut path = url.path_segments_mut().map_err(|()| {
                ApiError::new(
                    FailureKind::InvalidUrl,
                    format!("{} cannot carry a path", self.base_url),
                )
            })?;
            path.pop_if_empty();
            path.extend(self.api_prefix.split('/').filter(|part| !part.is_empty()));
            path.extend(segments);
        }
        Ok(url)
    }

    /// WebSocket endpoint: the HTTP base with `ws`/`wss` in place of
    /// `http`/`https`, under `<prefix>/ws`.
    pub fn live_feed_url(&self) -> Result<Url, ApiError> {
        let mut url = self.endpoint(&["ws"])?;
        let scheme = match url.scheme() {
            "http" => "ws",
            "https" => "wss",
            "ws" | "wss" => return Ok(url),
            other => {
                return Err(ApiError::new(
                    FailureKind::InvalidUrl,
                    format!("unsupported scheme {other} for live feed"),
                ))
            }
        };
        url.set_scheme(scheme).map_err(|()| {
            ApiError::new(FailureKind::InvalidUrl, format!("cannot switch {url} to {scheme}"))
        })?;
        Ok(url)
    }

    pub fn export_url(&self, job_id: &str, format: ExportFormat) -> Result<Url, ApiError> {
        let mut url = self.endpoint(&["jobs", "export", job_id])?;
        url.query_pairs_mut().append_pair("format", format.as_str());
        Ok(url)
    }
}
