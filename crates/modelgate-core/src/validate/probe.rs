//! Minimal HTTP probe used by the credential validators
//!
//! Validators only ever need "one bounded request, status plus body back".
//! Isolating that behind a trait keeps the fallback logic testable without a
//! live backend, and keeps the timeout mapping in one place.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

/// Failure of a single probe request
///
/// Timeouts are a distinct variant so validators can report them separately
/// from generic connectivity failures.
#[derive(Error, Debug, Clone)]
pub enum ProbeError {
    #[error("request timed out")]
    TimedOut,
    #[error("connection failed: {0}")]
    Connect(String),
}

/// Response of a single probe request
#[derive(Debug, Clone)]
pub struct ProbeResponse {
    pub status: u16,
    pub body: String,
}

impl ProbeResponse {
    /// Whether the status is in the 2xx range
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Cancellable single-request primitive backing the validators
#[async_trait]
pub trait HttpProbe: Send + Sync {
    /// Perform a GET request bounded by `timeout`
    async fn get(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        timeout: Duration,
    ) -> Result<ProbeResponse, ProbeError>;

    /// Perform a JSON POST request bounded by `timeout`
    async fn post_json(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: &serde_json::Value,
        timeout: Duration,
    ) -> Result<ProbeResponse, ProbeError>;
}

/// Production probe backed by `reqwest`
///
/// The timeout is applied per request rather than on the client so each
/// validator call honors its caller-supplied bound.
pub struct ReqwestProbe {
    client: Client,
}

impl ReqwestProbe {
    /// Create a new probe with a default client
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }
}

impl Default for ReqwestProbe {
    fn default() -> Self {
        Self::new()
    }
}

fn map_error(err: reqwest::Error) -> ProbeError {
    if err.is_timeout() {
        ProbeError::TimedOut
    } else {
        ProbeError::Connect(err.to_string())
    }
}

async fn read_response(response: reqwest::Response) -> Result<ProbeResponse, ProbeError> {
    let status = response.status().as_u16();
    let body = response.text().await.map_err(map_error)?;
    Ok(ProbeResponse { status, body })
}

#[async_trait]
impl HttpProbe for ReqwestProbe {
    async fn get(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        timeout: Duration,
    ) -> Result<ProbeResponse, ProbeError> {
        let mut request = self.client.get(url).timeout(timeout);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }
        let response = request.send().await.map_err(map_error)?;
        read_response(response).await
    }

    async fn post_json(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: &serde_json::Value,
        timeout: Duration,
    ) -> Result<ProbeResponse, ProbeError> {
        let mut request = self.client.post(url).timeout(timeout).json(body);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }
        let response = request.send().await.map_err(map_error)?;
        read_response(response).await
    }
}
