//! Test helper module
//!
//! In-memory [`DynectApi`] with a call log and per-operation failure injection.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use dynect_provider::{
    DynectApi, DynectError, FieldMap, Record, RecordType, Result, Verb, mapper,
};
use tokio::sync::Mutex;

/// One recorded API call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiCall {
    pub verb: Verb,
    pub operation: &'static str,
    pub node: String,
}

// ===== MockDynectApi =====

pub struct MockDynectApi {
    /// `(zone, node)` to records. A present key is an existing node.
    nodes: Mutex<BTreeMap<(String, String), Vec<Record>>>,
    next_id: AtomicU64,
    calls: Mutex<Vec<ApiCall>>,
    /// Operation name to the error it fails with.
    failures: Mutex<HashMap<&'static str, DynectError>>,
}

impl MockDynectApi {
    pub fn new() -> Self {
        Self {
            nodes: Mutex::new(BTreeMap::new()),
            next_id: AtomicU64::new(1000),
            calls: Mutex::new(Vec::new()),
            failures: Mutex::new(HashMap::new()),
        }
    }

    pub async fn add_node(&self, zone: &str, node: &str) {
        self.nodes
            .lock()
            .await
            .entry((zone.to_string(), node.to_string()))
            .or_default();
    }

    /// Seed a record from raw rdata, creating the node if needed.
    pub async fn seed(&self, zone: &str, node: &str, record_type: RecordType, rdata: &str) {
        let fields = mapper::format_record(record_type, rdata).unwrap();
        let record = self.new_record(node, record_type, 3600, fields);
        self.nodes
            .lock()
            .await
            .entry((zone.to_string(), node.to_string()))
            .or_default()
            .push(record);
    }

    pub async fn fail_on(&self, operation: &'static str, error: DynectError) {
        self.failures.lock().await.insert(operation, error);
    }

    pub async fn has_node(&self, zone: &str, node: &str) -> bool {
        self.nodes
            .lock()
            .await
            .contains_key(&(zone.to_string(), node.to_string()))
    }

    pub async fn records(&self, zone: &str, node: &str) -> Vec<Record> {
        self.nodes
            .lock()
            .await
            .get(&(zone.to_string(), node.to_string()))
            .cloned()
            .unwrap_or_default()
    }

    pub async fn calls(&self) -> Vec<ApiCall> {
        self.calls.lock().await.clone()
    }

    pub async fn count(&self, operation: &str) -> usize {
        self.calls
            .lock()
            .await
            .iter()
            .filter(|c| c.operation == operation)
            .count()
    }

    fn new_record(
        &self,
        node: &str,
        record_type: RecordType,
        ttl: u32,
        fields: FieldMap,
    ) -> Record {
        Record {
            record_id: self.next_id.fetch_add(1, Ordering::Relaxed).to_string(),
            node: node.to_string(),
            record_type: record_type.as_str().to_string(),
            ttl: Some(ttl),
            fields,
        }
    }

    async fn enter(&self, verb: Verb, operation: &'static str, node: &str) -> Result<()> {
        self.calls.lock().await.push(ApiCall {
            verb,
            operation,
            node: node.to_string(),
        });
        match self.failures.lock().await.get(operation) {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }

    fn not_found(what: &str) -> DynectError {
        DynectError::Api {
            kind: dynect_provider::ApiErrorKind::NotFound,
            detail: format!("{what}: Not in zone"),
        }
    }
}

#[async_trait]
impl DynectApi for MockDynectApi {
    async fn node_exists(&self, zone: &str, node: &str) -> Result<bool> {
        self.enter(Verb::Get, "node_exists", node).await?;
        Ok(self.has_node(zone, node).await)
    }

    async fn create_node(&self, zone: &str, node: &str) -> Result<()> {
        self.enter(Verb::Post, "create_node", node).await?;
        self.add_node(zone, node).await;
        Ok(())
    }

    async fn delete_node(&self, zone: &str, node: &str) -> Result<()> {
        self.enter(Verb::Delete, "delete_node", node).await?;
        self.nodes
            .lock()
            .await
            .remove(&(zone.to_string(), node.to_string()))
            .map(|_| ())
            .ok_or_else(|| Self::not_found("node"))
    }

    async fn list_records(
        &self,
        zone: &str,
        node: &str,
        record_type: RecordType,
    ) -> Result<Vec<Record>> {
        self.enter(Verb::Get, "list_records", node).await?;
        Ok(self
            .records(zone, node)
            .await
            .into_iter()
            .filter(|r| r.record_type == record_type.as_str())
            .collect())
    }

    async fn list_all_records(&self, zone: &str, node: &str) -> Result<Vec<Record>> {
        self.enter(Verb::Get, "list_all_records", node).await?;
        Ok(self.records(zone, node).await)
    }

    async fn create_record(
        &self,
        zone: &str,
        node: &str,
        record_type: RecordType,
        ttl: u32,
        fields: &FieldMap,
    ) -> Result<()> {
        self.enter(Verb::Post, "create_record", node).await?;
        let record = self.new_record(node, record_type, ttl, fields.clone());
        self.nodes
            .lock()
            .await
            .entry((zone.to_string(), node.to_string()))
            .or_default()
            .push(record);
        Ok(())
    }

    async fn delete_record(
        &self,
        zone: &str,
        node: &str,
        _record_type: RecordType,
        record_id: &str,
    ) -> Result<()> {
        self.enter(Verb::Delete, "delete_record", node).await?;
        let mut nodes = self.nodes.lock().await;
        let records = nodes
            .get_mut(&(zone.to_string(), node.to_string()))
            .ok_or_else(|| Self::not_found("node"))?;
        let before = records.len();
        records.retain(|r| r.record_id != record_id);
        if records.len() == before {
            return Err(Self::not_found("record"));
        }
        Ok(())
    }
}
