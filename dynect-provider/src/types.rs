use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Ordered rdata field map sent as the `rdata` object of a record.
pub type FieldMap = serde_json::Map<String, Value>;

// ============ Request ============

/// HTTP verb of an API call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    /// Query.
    Get,
    /// Create.
    Post,
    /// Update. Not used by the reconciler.
    Put,
    /// Remove.
    Delete,
}

impl Verb {
    /// Upper-case method name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }

    /// Write verbs carry a JSON body, read verbs never do.
    pub fn has_body(self) -> bool {
        matches!(self, Self::Post | Self::Put)
    }

    /// Whether the verb changes provider state.
    pub fn is_mutating(self) -> bool {
        !matches!(self, Self::Get)
    }
}

impl std::fmt::Display for Verb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Login parameters for `POST /REST/Session/`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    /// Customer (account) name.
    #[serde(rename = "customer_name")]
    pub customer: String,
    /// API user name.
    #[serde(rename = "user_name")]
    pub username: String,
    /// API password.
    pub password: String,
}

impl Credentials {
    pub fn new(
        customer: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            customer: customer.into(),
            username: username.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("customer", &self.customer)
            .field("username", &self.username)
            .field("password", &"********")
            .finish()
    }
}

// ============ Response Envelope ============

/// Top-level `status` of a response envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnvelopeStatus {
    /// The operation completed.
    Success,
    /// The operation failed; `msgs` explains why.
    Failure,
    /// The operation is still running as a job.
    Incomplete,
}

/// One entry of the envelope's `msgs` list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Error code, `null` for informational messages.
    #[serde(rename = "ERR_CD", default)]
    pub code: Option<String>,
    /// Severity (`INFO`, `WARN`, `ERROR`).
    #[serde(rename = "LVL", default)]
    pub severity: Option<String>,
    /// Free text.
    #[serde(rename = "INFO", default)]
    pub text: Option<String>,
    /// Subsystem that produced the message (`BLL`, `API-B`, ...).
    #[serde(rename = "SOURCE", default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl Message {
    pub fn text(&self) -> &str {
        self.text.as_deref().unwrap_or_default()
    }
}

/// Decoded response body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub status: EnvelopeStatus,
    #[serde(default)]
    pub data: Value,
    #[serde(rename = "msgs", default)]
    pub messages: Vec<Message>,
    /// Job that produced this response, when the provider reports one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_id: Option<u64>,
}

impl Envelope {
    pub fn is_success(&self) -> bool {
        self.status == EnvelopeStatus::Success
    }

    /// All message texts joined for logging, `CODE: text` where a code is present.
    pub fn message_summary(&self) -> String {
        self.messages
            .iter()
            .map(|m| match m.code.as_deref() {
                Some(code) if !code.is_empty() => format!("{code}: {}", m.text()),
                _ => m.text().to_string(),
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}

// ============ Records ============

/// A resource record as stored by the provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Provider-assigned identifier, opaque to callers.
    pub record_id: String,
    /// Fully qualified node name.
    pub node: String,
    /// Record type tag as reported by the provider.
    pub record_type: String,
    /// TTL, absent when the listing only returned a record URI.
    pub ttl: Option<u32>,
    /// Rdata fields, empty when the listing only returned a record URI.
    pub fields: FieldMap,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn verb_body_rules() {
        assert!(Verb::Post.has_body());
        assert!(Verb::Put.has_body());
        assert!(!Verb::Get.has_body());
        assert!(!Verb::Delete.has_body());
        assert!(!Verb::Get.is_mutating());
        assert!(Verb::Delete.is_mutating());
    }

    #[test]
    fn credentials_use_session_field_names() {
        let creds = Credentials::new("acme", "ops", "s3cret");
        let value = serde_json::to_value(&creds).unwrap();
        assert_eq!(
            value,
            json!({"customer_name": "acme", "user_name": "ops", "password": "s3cret"})
        );
    }

    #[test]
    fn credentials_debug_hides_password() {
        let creds = Credentials::new("acme", "ops", "s3cret");
        let debug = format!("{creds:?}");
        assert!(!debug.contains("s3cret"));
        assert!(debug.contains("acme"));
    }

    #[test]
    fn envelope_decodes_provider_shape() {
        let body = json!({
            "status": "success",
            "data": {"token": "abc"},
            "job_id": 42,
            "msgs": [
                {"INFO": "login: Login successful", "SOURCE": "BLL", "ERR_CD": null, "LVL": "INFO"}
            ]
        });
        let envelope: Envelope = serde_json::from_value(body).unwrap();
        assert!(envelope.is_success());
        assert_eq!(envelope.job_id, Some(42));
        assert_eq!(envelope.messages.len(), 1);
        assert_eq!(envelope.messages[0].code, None);
        assert_eq!(envelope.message_summary(), "login: Login successful");
    }

    #[test]
    fn envelope_defaults_missing_fields() {
        let envelope: Envelope = serde_json::from_str(r#"{"status":"incomplete"}"#).unwrap();
        assert_eq!(envelope.status, EnvelopeStatus::Incomplete);
        assert_eq!(envelope.data, Value::Null);
        assert!(envelope.messages.is_empty());
    }

    #[test]
    fn message_summary_prefixes_codes() {
        let envelope: Envelope = serde_json::from_value(json!({
            "status": "failure",
            "msgs": [
                {"ERR_CD": "NOT_FOUND", "INFO": "node: Not in zone"},
                {"INFO": "get: Failed"}
            ]
        }))
        .unwrap();
        assert_eq!(
            envelope.message_summary(),
            "NOT_FOUND: node: Not in zone, get: Failed"
        );
    }
}
