//! Test helpers: scripted transport and recording trace sink.

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use serde_json::{Value, json};

use crate::error::{DynectError, Result};
use crate::http_client::{HttpRequest, HttpResponse, HttpTransport};
use crate::trace::{TraceEvent, TraceSink};

/// Body of a successful or failed envelope with no messages.
pub fn envelope_body(status: &str, data: Value) -> String {
    json!({"status": status, "data": data, "job_id": 1, "msgs": []}).to_string()
}

/// Body the provider returns while an operation is still running as a job.
pub fn redirect_body(job_id: u64) -> String {
    format!("/REST/Job/{job_id}")
}

// ===== ScriptedTransport =====

/// Replays queued responses in order and records every request.
pub struct ScriptedTransport {
    responses: Mutex<VecDeque<Result<HttpResponse>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    pub fn new(bodies: impl IntoIterator<Item = String>) -> Self {
        Self::from_results(bodies.into_iter().map(|b| Ok(HttpResponse::new(200, b))))
    }

    pub fn from_results(results: impl IntoIterator<Item = Result<HttpResponse>>) -> Self {
        Self {
            responses: Mutex::new(results.into_iter().collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl HttpTransport for ScriptedTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request);
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .unwrap_or_else(|| {
                Err(DynectError::NetworkError {
                    detail: "script exhausted".to_string(),
                })
            })
    }
}

// ===== RecordingSink =====

/// Collects the names of trace events.
#[derive(Default)]
pub struct RecordingSink {
    events: Mutex<Vec<&'static str>>,
}

impl RecordingSink {
    pub fn count(&self, name: &str) -> usize {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|e| **e == name)
            .count()
    }
}

impl TraceSink for RecordingSink {
    fn record(&self, event: &TraceEvent<'_>) {
        let name = match event {
            TraceEvent::Request { .. } => "request",
            TraceEvent::Response { .. } => "response",
            TraceEvent::Redirect { .. } => "redirect",
            TraceEvent::Backoff { .. } => "backoff",
            TraceEvent::TimedOut { .. } => "timed_out",
        };
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(name);
    }
}
