use serde::{Deserialize, Serialize};

use dynect_provider::RecordType;

use crate::error::{CoreError, CoreResult};

/// Desired state of one node and record type.
///
/// An empty `rdata` list is a pure deletion: every record of the type goes away
/// and the node is removed once nothing else is left on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconcileRequest {
    /// Zone name, e.g. `example.org`.
    pub zone: String,
    /// Fully qualified node name, e.g. `www.example.org.`.
    pub node: String,
    pub record_type: RecordType,
    pub ttl: u32,
    /// One raw rdata string per desired record.
    pub rdata: Vec<String>,
    /// Report what would change without mutating anything.
    #[serde(default)]
    pub dry_run: bool,
}

impl ReconcileRequest {
    pub fn new(
        zone: impl Into<String>,
        node: impl Into<String>,
        record_type: RecordType,
        ttl: u32,
    ) -> Self {
        Self {
            zone: zone.into(),
            node: node.into(),
            record_type,
            ttl,
            rdata: Vec::new(),
            dry_run: false,
        }
    }

    #[must_use]
    pub fn with_rdata<I, S>(mut self, rdata: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rdata = rdata.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Whether no records are requested.
    pub fn is_deletion(&self) -> bool {
        self.rdata.is_empty()
    }

    pub fn validate(&self) -> CoreResult<()> {
        if self.zone.trim().is_empty() {
            return Err(CoreError::ValidationError("zone is empty".to_string()));
        }
        if self.node.trim().is_empty() {
            return Err(CoreError::ValidationError("node is empty".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_collects_rdata() {
        let request = ReconcileRequest::new("example.org", "www.example.org.", RecordType::A, 60)
            .with_rdata(["192.0.2.1", "192.0.2.2"])
            .dry_run(true);
        assert_eq!(request.rdata.len(), 2);
        assert!(request.dry_run);
        assert!(!request.is_deletion());
    }

    #[test]
    fn rejects_blank_zone_and_node() {
        let blank_zone = ReconcileRequest::new(" ", "www.example.org.", RecordType::A, 60);
        assert!(matches!(
            blank_zone.validate(),
            Err(CoreError::ValidationError(_))
        ));

        let blank_node = ReconcileRequest::new("example.org", "", RecordType::A, 60);
        assert!(matches!(
            blank_node.validate(),
            Err(CoreError::ValidationError(_))
        ));
    }
}
