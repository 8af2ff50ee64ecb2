//! HTTP transport
//!
//! The API client talks to the network through [`HttpTransport`], so the retry
//! loop can be driven by scripted responses in tests. [`ReqwestTransport`] is
//! the production implementation.
//!
//! # design principles
//! - **No status interpretation here** - every body, 2xx or not, goes to the classifier
//! - **No automatic redirects** - job redirects are followed by the client's retry loop
//! - **Transport failures are typed** - timeouts and network errors map to their own variants

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde_json::Value;

use crate::client::ClientConfig;
use crate::error::{DynectError, Result};
use crate::types::Verb;

/// A fully resolved request.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub verb: Verb,
    pub url: String,
    pub headers: Vec<(String, String)>,
    /// JSON body, only set for write verbs.
    pub body: Option<Value>,
}

/// Raw response as received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Sends one HTTP request and returns the raw response.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse>;
}

/// [`HttpTransport`] backed by a `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Build a client with the configured timeouts and redirects disabled.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| DynectError::NetworkError {
                detail: format!("Failed to create HTTP client: {e}"),
            })?;
        Ok(Self { client })
    }

    fn build(&self, request: &HttpRequest) -> RequestBuilder {
        let mut builder = match request.verb {
            Verb::Get => self.client.get(&request.url),
            Verb::Post => self.client.post(&request.url),
            Verb::Put => self.client.put(&request.url),
            Verb::Delete => self.client.delete(&request.url),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }
        builder
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        let builder = self.build(&request);
        let (status, body) = execute_request(builder).await?;
        Ok(HttpResponse { status, body })
    }
}

/// Sends the request and reads the whole body as text.
///
/// # Returns
/// * `Ok((status_code, response_text))` - for any HTTP status
/// * `Err(DynectError::Timeout)` - the transport timed out
/// * `Err(DynectError::NetworkError)` - connection or body read failure
async fn execute_request(request_builder: RequestBuilder) -> Result<(u16, String)> {
    let response = request_builder.send().await.map_err(|e| {
        if e.is_timeout() {
            DynectError::Timeout {
                detail: e.to_string(),
            }
        } else {
            DynectError::NetworkError {
                detail: e.to_string(),
            }
        }
    })?;

    let status_code = response.status().as_u16();

    let response_text = response
        .text()
        .await
        .map_err(|e| DynectError::NetworkError {
            detail: format!("Failed to read response body: {e}"),
        })?;

    Ok((status_code, response_text))
}

/// Default connect timeout.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
/// Default per-request timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
