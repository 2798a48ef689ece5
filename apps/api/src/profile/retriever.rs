//! Profile retrieval: resolves an identifier to a raw profile record.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde_json::Value;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::llm_client::{backoff_delay, MAX_RETRIES};

/// Extracts the profile handle from a bare handle or a profile URL.
///
/// `https://www.linkedin.com/in/jane-doe/` → `jane-doe`
///
/// Handles are letters, digits, `-` and `_`; anything else is `InvalidInput`.
pub fn extract_handle(identifier: &str) -> Result<&str, AppError> {
    let trimmed = identifier.trim();
    let trimmed = trimmed.strip_suffix('/').unwrap_or(trimmed);
    let handle = trimmed.rsplit('/').next().unwrap_or(trimmed).trim();

    if handle.is_empty() {
        return Err(AppError::InvalidInput("profile cannot be empty".to_string()));
    }
    if !handle
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(AppError::InvalidInput(format!(
            "Invalid profile name '{handle}' passed in"
        )));
    }
    Ok(handle)
}

#[async_trait]
pub trait ProfileSource: Send + Sync {
    /// Fetches the raw record for `handle`; unknown handles are `NotFound`.
    async fn fetch(&self, handle: &str) -> Result<Value, AppError>;
}

/// Profile API client: `GET {base_url}/profiles/{handle}` with a bearer token.
#[derive(Clone)]
pub struct HttpProfileSource {
    client: Client,
    base_url: Url,
    token: String,
}

impl HttpProfileSource {
    pub fn new(
        base_url: Option<String>,
        token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, AppError> {
        let (Some(base_url), Some(token)) = (base_url, token) else {
            return Err(AppError::Configuration(
                "PROFILE_API_URL and PROFILE_API_TOKEN must both be set".to_string(),
            ));
        };
        let base_url = Url::parse(&base_url)
            .ok()
            .filter(|url| !url.cannot_be_a_base())
            .ok_or_else(|| {
                AppError::Configuration(format!("PROFILE_API_URL '{base_url}' is not a base URL"))
            })?;
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url,
            token,
        })
    }

    /// `{base_url}/profiles/{handle}` with the handle as one percent-encoded segment.
    fn profile_url(&self, handle: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("profiles").push(handle);
        }
        url
    }
}

#[async_trait]
impl ProfileSource for HttpProfileSource {
    async fn fetch(&self, handle: &str) -> Result<Value, AppError> {
        let url = self.profile_url(handle);
        let mut last_error: Option<AppError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                let delay = backoff_delay(attempt);
                warn!(
                    "Profile fetch attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = match self.client.get(url.clone()).bearer_auth(&self.token).send().await {
                Ok(r) => r,
                Err(e) if e.is_timeout() => {
                    last_error = Some(AppError::Timeout(format!("fetching profile '{handle}'")));
                    continue;
                }
                Err(e) => {
                    last_error = Some(AppError::Oracle(format!("Profile request failed: {e}")));
                    continue;
                }
            };

            let status = response.status();
            if status == StatusCode::NOT_FOUND {
                return Err(AppError::NotFound(format!(
                    "Invalid profile name '{handle}' passed in"
                )));
            }
            if status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
                last_error = Some(AppError::Oracle(format!("Profile API returned {status}")));
                continue;
            }
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(AppError::Oracle(format!(
                    "Profile API returned {status}: {body}"
                )));
            }

            let record: Value = response
                .json()
                .await
                .map_err(|e| AppError::Oracle(format!("Profile response unreadable: {e}")))?;
            info!("Retrieved data for {handle}");
            return Ok(record);
        }

        Err(last_error.unwrap_or_else(|| {
            AppError::Oracle(format!("Profile fetch failed after {MAX_RETRIES} attempts"))
        }))
    }
}
