//! Structured trace events emitted by the API client.

use std::time::Duration;

use serde_json::Value;

use crate::types::Verb;
use crate::utils::log_sanitizer::{redact_credentials, sanitize_body, truncate_for_log};

/// One step of an API call as seen by the retry loop.
#[derive(Debug, Clone, Copy)]
pub enum TraceEvent<'a> {
    /// A request is about to be sent.
    Request {
        attempt: u32,
        verb: Verb,
        url: &'a str,
        body: Option<&'a Value>,
    },
    /// A response body arrived.
    Response {
        attempt: u32,
        status: u16,
        body: &'a str,
    },
    /// The provider answered with a job path; the next attempt polls it.
    Redirect { attempt: u32, job_path: &'a str },
    /// Waiting before the next attempt.
    Backoff { attempt: u32, delay: Duration },
    /// The retry budget is exhausted.
    TimedOut { resource: &'a str, max_tries: u32 },
}

/// Receiver of client trace events, injected at client construction.
pub trait TraceSink: Send + Sync {
    fn record(&self, event: &TraceEvent<'_>);
}

/// Forwards events to the `log` facade with credentials redacted.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl TraceSink for LogSink {
    fn record(&self, event: &TraceEvent<'_>) {
        match *event {
            TraceEvent::Request {
                attempt,
                verb,
                url,
                body,
            } => {
                log::debug!("[dynect] {verb} {url} (try {attempt})");
                if let Some(body) = body {
                    log::debug!(
                        "[dynect] Request Body: {}",
                        truncate_for_log(&redact_credentials(body).to_string())
                    );
                }
            }
            TraceEvent::Response {
                attempt,
                status,
                body,
            } => {
                log::debug!("[dynect] Response Status: {status} (try {attempt})");
                log::debug!("[dynect] Response Body: {}", sanitize_body(body));
            }
            TraceEvent::Redirect { attempt, job_path } => {
                log::info!("[dynect] Operation still processing, polling {job_path} (try {attempt})");
            }
            TraceEvent::Backoff { attempt, delay } => {
                log::debug!(
                    "[dynect] Waiting {:.1}s before try {attempt}",
                    delay.as_secs_f32()
                );
            }
            TraceEvent::TimedOut {
                resource,
                max_tries,
            } => {
                log::warn!("[dynect] Giving up on {resource} after {max_tries} tries");
            }
        }
    }
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl TraceSink for NullSink {
    fn record(&self, _event: &TraceEvent<'_>) {}
}
