//! [`DynectApi`] over the REST client.

use async_trait::async_trait;
use serde_json::{Map, Value, json};

use crate::client::ApiClient;
use crate::error::{ApiErrorKind, DynectError, Result};
use crate::resource::ResourcePath;
use crate::schema::RecordType;
use crate::session::Session;
use crate::traits::DynectApi;
use crate::types::{Credentials, Envelope, EnvelopeStatus, FieldMap, Record, Verb};

/// Authenticated Dynect provider: a client plus the session it logged in with.
pub struct DynectProvider {
    client: ApiClient,
    session: Session,
}

impl DynectProvider {
    /// Log in and keep the resulting session.
    pub async fn login(client: ApiClient, credentials: &Credentials) -> Result<Self> {
        let session = client.login(credentials).await?;
        Ok(Self { client, session })
    }

    pub fn from_session(client: ApiClient, session: Session) -> Self {
        Self { client, session }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Call and interpret the envelope status.
    ///
    /// `incomplete` means the provider accepted the work as a job, which counts
    /// as done for our purposes. `failure` without a taxonomy code becomes
    /// `UNKNOWN_ERROR` with the message texts as detail.
    async fn request(
        &self,
        verb: Verb,
        resource: &ResourcePath,
        body: Option<&Value>,
    ) -> Result<Envelope> {
        let envelope = self
            .client
            .call(&self.session, verb, resource, body)
            .await?;

        match envelope.status {
            EnvelopeStatus::Success => Ok(envelope),
            EnvelopeStatus::Incomplete => {
                log::warn!(
                    "[dynect] {verb} {resource} accepted as job {:?}, still running",
                    envelope.job_id
                );
                Ok(envelope)
            }
            EnvelopeStatus::Failure => {
                let summary = envelope.message_summary();
                Err(DynectError::Api {
                    kind: ApiErrorKind::UnknownError,
                    detail: if summary.is_empty() {
                        format!("{verb} {resource} failed")
                    } else {
                        summary
                    },
                })
            }
        }
    }

    async fn query_records(&self, resource: &ResourcePath) -> Result<Vec<Record>> {
        match self.request(Verb::Get, resource, None).await {
            Ok(envelope) => normalize_records(&envelope.data),
            Err(e) if e.is_not_found() => {
                log::debug!("[dynect] {resource} not found, treating as empty");
                Ok(Vec::new())
            }
            Err(e) => Err(e),
        }
    }
}

#[async_trait]
impl DynectApi for DynectProvider {
    async fn node_exists(&self, zone: &str, node: &str) -> Result<bool> {
        match self
            .request(Verb::Get, &ResourcePath::node(zone, node), None)
            .await
        {
            Ok(_) => Ok(true),
            Err(e) if e.is_not_found() => Ok(false),
            Err(e) => Err(e),
        }
    }

    async fn create_node(&self, zone: &str, node: &str) -> Result<()> {
        self.request(Verb::Post, &ResourcePath::node(zone, node), Some(&json!({})))
            .await
            .map(|_| ())
    }

    async fn delete_node(&self, zone: &str, node: &str) -> Result<()> {
        self.request(Verb::Delete, &ResourcePath::node(zone, node), None)
            .await
            .map(|_| ())
    }

    async fn list_records(
        &self,
        zone: &str,
        node: &str,
        record_type: RecordType,
    ) -> Result<Vec<Record>> {
        self.query_records(&ResourcePath::records(record_type, zone, node))
            .await
    }

    async fn list_all_records(&self, zone: &str, node: &str) -> Result<Vec<Record>> {
        self.query_records(&ResourcePath::all_records(zone, node))
            .await
    }

    async fn create_record(
        &self,
        zone: &str,
        node: &str,
        record_type: RecordType,
        ttl: u32,
        fields: &FieldMap,
    ) -> Result<()> {
        let body = json!({ "rdata": fields, "ttl": ttl });
        self.request(
            Verb::Post,
            &ResourcePath::records(record_type, zone, node),
            Some(&body),
        )
        .await
        .map(|_| ())
    }

    async fn delete_record(
        &self,
        zone: &str,
        node: &str,
        record_type: RecordType,
        record_id: &str,
    ) -> Result<()> {
        self.request(
            Verb::Delete,
            &ResourcePath::record(record_type, zone, node, record_id),
            None,
        )
        .await
        .map(|_| ())
    }
}

// ============ Listing normalization ============

/// Normalize a listing payload into records.
///
/// The provider answers with `null`, a single record object, a record URI, or
/// an array of objects and URIs. All of them become a sequence.
pub(crate) fn normalize_records(data: &Value) -> Result<Vec<Record>> {
    match data {
        Value::Null => Ok(Vec::new()),
        Value::Array(items) => items
            .iter()
            .filter(|item| !item.is_null())
            .map(record_from_value)
            .collect(),
        other => Ok(vec![record_from_value(other)?]),
    }
}

fn record_from_value(value: &Value) -> Result<Record> {
    match value {
        Value::Object(obj) => record_from_object(obj),
        Value::String(uri) => record_from_uri(uri),
        other => Err(DynectError::ParseError {
            detail: format!("Unexpected record entry: {other}"),
        }),
    }
}

fn record_from_object(obj: &Map<String, Value>) -> Result<Record> {
    let record_id = match obj.get("record_id") {
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        _ => {
            return Err(DynectError::ParseError {
                detail: "Record without record_id".to_string(),
            });
        }
    };

    let text = |key: &str| obj.get(key).and_then(Value::as_str).map(str::to_string);

    let ttl = match obj.get("ttl") {
        Some(Value::Number(n)) => n.as_u64().and_then(|v| u32::try_from(v).ok()),
        Some(Value::String(s)) => s.parse().ok(),
        _ => None,
    };

    Ok(Record {
        record_id,
        node: text("fqdn").or_else(|| text("node")).unwrap_or_default(),
        record_type: text("record_type").unwrap_or_default(),
        ttl,
        fields: obj
            .get("rdata")
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default(),
    })
}

/// `/REST/<Type>Record/<zone>/<node>/<record_id>`
fn record_from_uri(uri: &str) -> Result<Record> {
    let path = ResourcePath::parse(uri);
    match path.segments() {
        [_, resource, _zone, node, record_id] => Ok(Record {
            record_id: record_id.clone(),
            node: node.clone(),
            record_type: resource
                .strip_suffix("Record")
                .unwrap_or(resource)
                .to_string(),
            ttl: None,
            fields: FieldMap::new(),
        }),
        _ => Err(DynectError::ParseError {
            detail: format!("Unexpected record URI: {uri}"),
        }),
    }
}
