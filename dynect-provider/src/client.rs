//! API client: session login and the redirect-following retry loop.

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;

use crate::classifier;
use crate::error::{DynectError, Result};
use crate::http_client::{
    DEFAULT_CONNECT_TIMEOUT, DEFAULT_REQUEST_TIMEOUT, HttpRequest, HttpTransport,
    ReqwestTransport,
};
use crate::resource::ResourcePath;
use crate::session::{Session, default_headers};
use crate::trace::{LogSink, TraceEvent, TraceSink};
use crate::types::{Credentials, Envelope, Verb};

/// Production API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api2.dynect.net";
/// Tries per call, the first request included.
pub const DEFAULT_MAX_TRIES: u32 = 12;
/// Fixed wait between tries, the provider's recommended job poll interval.
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(5);

/// Client settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub max_tries: u32,
    pub retry_delay: Duration,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            max_tries: DEFAULT_MAX_TRIES,
            retry_delay: DEFAULT_RETRY_DELAY,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl ClientConfig {
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

/// Dynect REST client.
///
/// Stateless between calls apart from what the caller passes in: the
/// [`Session`] returned by [`login`](Self::login) is borrowed by every
/// [`call`](Self::call).
pub struct ApiClient {
    transport: Arc<dyn HttpTransport>,
    sink: Arc<dyn TraceSink>,
    config: ClientConfig,
}

impl ApiClient {
    /// Client over `reqwest`, tracing to the `log` facade.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let transport = ReqwestTransport::new(&config)?;
        Ok(Self::with_transport(
            config,
            Arc::new(transport),
            Arc::new(LogSink),
        ))
    }

    pub fn with_transport(
        config: ClientConfig,
        transport: Arc<dyn HttpTransport>,
        sink: Arc<dyn TraceSink>,
    ) -> Self {
        Self {
            transport,
            sink,
            config,
        }
    }

    /// Open a session: `POST REST/Session` and keep `data.token`.
    pub async fn login(&self, credentials: &Credentials) -> Result<Session> {
        let body =
            serde_json::to_value(credentials).map_err(|e| DynectError::SerializationError {
                detail: e.to_string(),
            })?;

        let envelope = self
            .send(
                &self.config.base_url,
                &default_headers(),
                Verb::Post,
                &ResourcePath::session(),
                Some(&body),
            )
            .await?;

        let token = envelope
            .data
            .get("token")
            .and_then(Value::as_str)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| DynectError::ParseError {
                detail: format!(
                    "Session response has no token: {}",
                    envelope.message_summary()
                ),
            })?;

        log::debug!("[dynect] Session established for {}", credentials.username);
        Ok(Session::new(self.config.base_url.clone(), token))
    }

    /// Issue `verb` against `resource` and return the decoded envelope.
    ///
    /// Job redirects are polled with `GET` until a real envelope arrives or the
    /// try budget runs out. The envelope is returned whatever its `status`.
    pub async fn call(
        &self,
        session: &Session,
        verb: Verb,
        resource: &ResourcePath,
        body: Option<&Value>,
    ) -> Result<Envelope> {
        self.send(session.base_url(), session.headers(), verb, resource, body)
            .await
    }

    async fn send(
        &self,
        base_url: &str,
        headers: &[(String, String)],
        verb: Verb,
        resource: &ResourcePath,
        body: Option<&Value>,
    ) -> Result<Envelope> {
        let max_tries = self.config.max_tries.max(1);

        let mut verb = verb;
        let mut target = resource.clone();
        let mut body = body.cloned();

        for attempt in 1..=max_tries {
            if attempt > 1 {
                self.sink.record(&TraceEvent::Backoff {
                    attempt,
                    delay: self.config.retry_delay,
                });
                tokio::time::sleep(self.config.retry_delay).await;
            }

            let request = HttpRequest {
                verb,
                url: target.to_url(base_url),
                headers: headers.to_vec(),
                body: if verb.has_body() { body.clone() } else { None },
            };
            self.sink.record(&TraceEvent::Request {
                attempt,
                verb,
                url: &request.url,
                body: request.body.as_ref(),
            });

            let response = self.transport.send(request).await?;
            self.sink.record(&TraceEvent::Response {
                attempt,
                status: response.status,
                body: &response.body,
            });

            match classifier::decode(&response.body) {
                Err(DynectError::Redirect { job_path }) => {
                    self.sink.record(&TraceEvent::Redirect {
                        attempt,
                        job_path: &job_path,
                    });
                    verb = Verb::Get;
                    target = ResourcePath::parse(&job_path);
                    body = None;
                }
                decoded => return decoded,
            }
        }

        let resource = resource.to_string();
        self.sink.record(&TraceEvent::TimedOut {
            resource: &resource,
            max_tries,
        });
        Err(DynectError::OperationTimedOut {
            resource,
            max_tries,
        })
    }
}
