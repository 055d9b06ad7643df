//! HTTP client for a remote Demucs inference service.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use vsep_media::AudioBuffer;

use crate::backend::{BackendKind, SeparatedStems, SourceSeparator};
use crate::error::{SeparatorError, SeparatorResult};

/// Configuration for the remote separation client.
#[derive(Debug, Clone)]
pub struct RemoteSeparatorConfig {
    /// Base URL of the inference service.
    pub base_url: String,
    /// Request timeout. Separation of long uploads takes a while.
    pub timeout: Duration,
    /// Max retries for transient failures.
    pub max_retries: u32,
}

impl Default for RemoteSeparatorConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8001".to_string(),
            timeout: Duration::from_secs(300),
            max_retries: 2,
        }
    }
}

impl RemoteSeparatorConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("SEPARATOR_SERVICE_URL")
                .unwrap_or_else(|_| "http://localhost:8001".to_string()),
            timeout: Duration::from_secs(
                std::env::var("SEPARATOR_SERVICE_TIMEOUT")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(300),
            ),
            max_retries: std::env::var("SEPARATOR_SERVICE_RETRIES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(2),
        }
    }
}

/// Wire format: separation request.
#[derive(Debug, Serialize)]
struct SeparateRequest<'a> {
    sample_rate: u32,
    samples: &'a [f32],
}

/// Wire format: separation response.
///
/// The service returns the vocal stem and the summed non-vocal stems at
/// the request's sample rate.
#[derive(Debug, Deserialize)]
struct SeparateResponse {
    vocals: Vec<f32>,
    background: Vec<f32>,
}

#[derive(Debug, Deserialize)]
struct ServiceHealth {
    status: String,
}

/// Client for a remote source separation service.
pub struct RemoteSeparator {
    http: Client,
    config: RemoteSeparatorConfig,
}

impl RemoteSeparator {
    /// Create a new remote separator.
    pub fn new(config: RemoteSeparatorConfig) -> SeparatorResult<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(SeparatorError::Network)?;

        Ok(Self { http, config })
    }

    /// Create from environment variables.
    pub fn from_env() -> SeparatorResult<Self> {
        Self::new(RemoteSeparatorConfig::from_env())
    }

    /// Execute with retry logic.
    async fn with_retry<F, Fut, T>(&self, operation: F) -> SeparatorResult<T>
    where
        F: Fn() -> Fut,
        Fut: std::future::Future<Output = SeparatorResult<T>>,
    {
        let mut last_error = None;

        for attempt in 0..=self.config.max_retries {
            match operation().await {
                Ok(result) => return Ok(result),
                Err(e) if e.is_retryable() && attempt < self.config.max_retries => {
                    let delay = Duration::from_millis(500 * 2u64.pow(attempt));
                    warn!(
                        attempt = attempt + 1,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "Separation request failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    last_error = Some(e);
                }
                Err(e) => return Err(e),
            }
        }

        Err(last_error
            .unwrap_or_else(|| SeparatorError::RequestFailed("unknown error".to_string())))
    }
}

#[async_trait]
impl SourceSeparator for RemoteSeparator {
    fn kind(&self) -> BackendKind {
        BackendKind::Remote
    }

    async fn is_available(&self) -> bool {
        let url = format!("{}/health", self.config.base_url);

        match self.http.get(&url).send().await {
            Ok(response) if response.status().is_success() => response
                .json::<ServiceHealth>()
                .await
                .map(|h| h.status == "healthy" || h.status == "ok")
                .unwrap_or(false),
            Ok(response) => {
                warn!(status = %response.status(), "Separation service health check failed");
                false
            }
            Err(e) => {
                warn!(error = %e, "Separation service health check error");
                false
            }
        }
    }

    async fn separate(&self, input: &AudioBuffer) -> SeparatorResult<SeparatedStems> {
        let url = format!("{}/separate", self.config.base_url);

        debug!(
            url = %url,
            samples = input.samples.len(),
            sample_rate = input.sample_rate,
            "Sending separation request"
        );

        let response = self
            .with_retry(|| async {
                let response = self
                    .http
                    .post(&url)
                    .json(&SeparateRequest {
                        sample_rate: input.sample_rate,
                        samples: &input.samples,
                    })
                    .send()
                    .await
                    .map_err(SeparatorError::Network)?;

                if !response.status().is_success() {
                    let status = response.status();
                    let body = response.text().await.unwrap_or_default();
                    return Err(SeparatorError::RequestFailed(format!(
                        "separation service returned {status}: {body}"
                    )));
                }

                response
                    .json::<SeparateResponse>()
                    .await
                    .map_err(|e| SeparatorError::InvalidResponse(e.to_string()))
            })
            .await?;

        if response.vocals.len() != input.samples.len()
            || response.background.len() != input.samples.len()
        {
            return Err(SeparatorError::InvalidResponse(format!(
                "stem length mismatch: input={} vocals={} background={}",
                input.samples.len(),
                response.vocals.len(),
                response.background.len()
            )));
        }

        Ok(SeparatedStems {
            vocals: AudioBuffer {
                samples: response.vocals,
                sample_rate: input.sample_rate,
            },
            background: AudioBuffer {
                samples: response.background,
                sample_rate: input.sample_rate,
            },
        })
    }
}
