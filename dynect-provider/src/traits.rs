use async_trait::async_trait;

use crate::error::Result;
use crate::schema::RecordType;
use crate::types::{FieldMap, Record};

/// Node and record operations of the Dynect API.
///
/// [`DynectProvider`](crate::DynectProvider) implements this over HTTP. The
/// reconciler only depends on this trait.
#[async_trait]
pub trait DynectApi: Send + Sync {
    /// Whether the node exists in the zone. A `NOT_FOUND` answer yields `false`.
    async fn node_exists(&self, zone: &str, node: &str) -> Result<bool>;

    /// Create an empty node.
    async fn create_node(&self, zone: &str, node: &str) -> Result<()>;

    /// Delete the node with everything below it.
    async fn delete_node(&self, zone: &str, node: &str) -> Result<()>;

    /// All records of one type at the node. A missing node yields no records.
    async fn list_records(
        &self,
        zone: &str,
        node: &str,
        record_type: RecordType,
    ) -> Result<Vec<Record>>;

    /// All records at the node, any type. A missing node yields no records.
    async fn list_all_records(&self, zone: &str, node: &str) -> Result<Vec<Record>>;

    /// Create one record from a mapped field set.
    async fn create_record(
        &self,
        zone: &str,
        node: &str,
        record_type: RecordType,
        ttl: u32,
        fields: &FieldMap,
    ) -> Result<()>;

    /// Delete one record by id.
    async fn delete_record(
        &self,
        zone: &str,
        node: &str,
        record_type: RecordType,
        record_id: &str,
    ) -> Result<()>;
}
