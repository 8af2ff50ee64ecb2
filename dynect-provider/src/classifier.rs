//! Error classifier: turns a raw response body into an [`Envelope`] or an error.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{ApiErrorKind, DynectError, Result};
use crate::types::Envelope;

/// Job resource path inside a non-envelope body.
static JOB_PATH: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"REST/Job/[0-9]+").ok());

/// Extract the job resource path from a raw body, if it contains one.
pub fn job_path(body: &str) -> Option<&str> {
    JOB_PATH
        .as_ref()
        .and_then(|re| re.find(body))
        .map(|m| m.as_str())
}

/// Decode a response body.
///
/// - A body that is not an envelope but names a job raises
///   [`DynectError::Redirect`] with the job path.
/// - Any other undecodable body raises [`DynectError::ParseError`].
/// - A decoded envelope raises [`DynectError::Api`] for the first message whose
///   code is in the taxonomy; unknown codes are informational.
pub fn decode(body: &str) -> Result<Envelope> {
    let envelope: Envelope = match serde_json::from_str(body) {
        Ok(envelope) => envelope,
        Err(e) => {
            if let Some(path) = job_path(body) {
                return Err(DynectError::Redirect {
                    job_path: path.to_string(),
                });
            }
            return Err(DynectError::ParseError {
                detail: e.to_string(),
            });
        }
    };

    for message in &envelope.messages {
        if let Some(kind) = message.code.as_deref().and_then(ApiErrorKind::from_code) {
            return Err(DynectError::Api {
                kind,
                detail: message.text().to_string(),
            });
        }
    }

    Ok(envelope)
}
