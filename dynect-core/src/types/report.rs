use std::fmt;

use serde::Serialize;

use dynect_provider::RecordType;

/// Reconcile step an outcome belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    EnsureNode,
    DeleteRecord,
    CreateRecord,
    DeleteNode,
}

impl Step {
    fn verb(self) -> &'static str {
        match self {
            Self::EnsureNode | Self::CreateRecord => "create",
            Self::DeleteRecord | Self::DeleteNode => "delete",
        }
    }

    fn object(self) -> &'static str {
        match self {
            Self::EnsureNode | Self::DeleteNode => "node",
            Self::DeleteRecord | Self::CreateRecord => "record",
        }
    }
}

/// What happened (or would happen, in a dry run) in a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Created,
    Deleted,
    WillCreate,
    WillDelete,
    /// The rdata did not fit the record schema; nothing was sent.
    Skipped,
    /// The provider rejected a best-effort step.
    Failed,
}

impl Action {
    pub fn is_failure(self) -> bool {
        matches!(self, Self::Skipped | Self::Failed)
    }
}

/// One reported step with everything needed to describe it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepOutcome {
    pub step: Step,
    pub action: Action,
    pub zone: String,
    pub node: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_type: Option<RecordType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_id: Option<String>,
    /// Raw rdata as requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    /// Provider or mapper message for failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl StepOutcome {
    pub fn node(step: Step, action: Action, zone: &str, node: &str) -> Self {
        Self {
            step,
            action,
            zone: zone.to_string(),
            node: node.to_string(),
            record_type: None,
            ttl: None,
            record_id: None,
            data: None,
            message: None,
        }
    }

    pub fn record(
        step: Step,
        action: Action,
        zone: &str,
        node: &str,
        record_type: RecordType,
    ) -> Self {
        Self {
            record_type: Some(record_type),
            ..Self::node(step, action, zone, node)
        }
    }

    #[must_use]
    pub fn with_ttl(mut self, ttl: u32) -> Self {
        self.ttl = Some(ttl);
        self
    }

    #[must_use]
    pub fn with_record_id(mut self, record_id: impl Into<String>) -> Self {
        self.record_id = Some(record_id.into());
        self
    }

    #[must_use]
    pub fn with_data(mut self, data: impl Into<String>) -> Self {
        self.data = Some(data.into());
        self
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl fmt::Display for StepOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.action {
            Action::Created => write!(f, "Created")?,
            Action::Deleted => write!(f, "Deleted")?,
            Action::WillCreate => write!(f, "Will create")?,
            Action::WillDelete => write!(f, "Will delete")?,
            Action::Skipped => write!(f, "Skipped")?,
            Action::Failed => write!(f, "Failed to {}", self.step.verb())?,
        }

        write!(
            f,
            " {} (Zone=\"{}\", Node=\"{}\"",
            self.step.object(),
            self.zone,
            self.node
        )?;
        if let Some(ttl) = self.ttl {
            write!(f, ", TTL=\"{ttl}\"")?;
        }
        if let Some(record_type) = self.record_type {
            write!(f, ", Type=\"{record_type}\"")?;
        }
        if let Some(record_id) = &self.record_id {
            write!(f, ", RecordId=\"{record_id}\"")?;
        }
        if let Some(data) = &self.data {
            write!(f, ", Data=\"{data}\"")?;
        }
        write!(f, ")")?;

        if let Some(message) = &self.message {
            write!(f, " - {message}")?;
        }
        Ok(())
    }
}

/// Ordered outcomes of one reconcile run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconcileReport {
    pub dry_run: bool,
    pub outcomes: Vec<StepOutcome>,
}

impl ReconcileReport {
    pub fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            outcomes: Vec::new(),
        }
    }

    /// Append an outcome and log it: failures at `error`, changes at `warn`.
    pub fn push(&mut self, outcome: StepOutcome) {
        if outcome.action.is_failure() {
            log::error!("{outcome}");
        } else {
            log::warn!("{outcome}");
        }
        self.outcomes.push(outcome);
    }

    pub fn outcomes(&self) -> &[StepOutcome] {
        &self.outcomes
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn has_failures(&self) -> bool {
        self.outcomes.iter().any(|o| o.action.is_failure())
    }

    pub fn count(&self, step: Step, action: Action) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.step == step && o.action == action)
            .count()
    }
}
