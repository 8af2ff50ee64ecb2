//! Record set reconciliation service

use std::collections::HashSet;
use std::sync::Arc;

use dynect_provider::{DynectApi, DynectError, mapper};

use crate::error::{CoreError, CoreResult};
use crate::types::{Action, ReconcileReport, ReconcileRequest, Step, StepOutcome};

/// Replaces the records of one node and type with a desired set.
///
/// Steps run one after another:
/// 1. ensure the node exists (only when records are requested)
/// 2. list the existing records of the type
/// 3. delete each of them
/// 4. map and create each requested record
/// 5. delete the node if a pure deletion left it empty
///
/// Steps 1 and 2 abort the run on failure. Everything else is reported per
/// record and the run carries on.
pub struct ReconcileService {
    api: Arc<dyn DynectApi>,
}

impl ReconcileService {
    /// Create a reconcile service instance
    #[must_use]
    pub fn new(api: Arc<dyn DynectApi>) -> Self {
        Self { api }
    }

    pub async fn reconcile(&self, request: &ReconcileRequest) -> CoreResult<ReconcileReport> {
        request.validate()?;
        log::info!(
            "[reconcile] {} {} {} with {} value(s){}",
            request.zone,
            request.node,
            request.record_type,
            request.rdata.len(),
            if request.dry_run { " (dry run)" } else { "" }
        );

        let mut report = ReconcileReport::new(request.dry_run);

        if !request.is_deletion() {
            self.ensure_node(request, &mut report).await?;
        }

        let removed = self.delete_existing(request, &mut report).await?;
        self.create_requested(request, &mut report).await;

        if request.is_deletion() {
            self.delete_empty_node(request, &removed, &mut report).await;
        }

        Ok(report)
    }

    async fn ensure_node(
        &self,
        request: &ReconcileRequest,
        report: &mut ReconcileReport,
    ) -> CoreResult<()> {
        let exists = self
            .api
            .node_exists(&request.zone, &request.node)
            .await
            .map_err(|e| aborted("check node", request, e))?;
        if exists {
            log::debug!("[reconcile] Node {} already exists", request.node);
            return Ok(());
        }

        let action = if request.dry_run {
            Action::WillCreate
        } else {
            self.api
                .create_node(&request.zone, &request.node)
                .await
                .map_err(|e| aborted("create node", request, e))?;
            Action::Created
        };
        report.push(StepOutcome::node(
            Step::EnsureNode,
            action,
            &request.zone,
            &request.node,
        ));
        Ok(())
    }

    /// Returns the ids that are gone, or would be gone after a dry run.
    async fn delete_existing(
        &self,
        request: &ReconcileRequest,
        report: &mut ReconcileReport,
    ) -> CoreResult<HashSet<String>> {
        let existing = self
            .api
            .list_records(&request.zone, &request.node, request.record_type)
            .await
            .map_err(|e| aborted("query records", request, e))?;

        let mut removed = HashSet::new();
        for record in existing {
            let outcome = StepOutcome::record(
                Step::DeleteRecord,
                Action::Deleted,
                &request.zone,
                &request.node,
                request.record_type,
            )
            .with_record_id(&record.record_id);

            let outcome = if request.dry_run {
                StepOutcome {
                    action: Action::WillDelete,
                    ..outcome
                }
            } else {
                match self
                    .api
                    .delete_record(
                        &request.zone,
                        &request.node,
                        request.record_type,
                        &record.record_id,
                    )
                    .await
                {
                    Ok(()) => outcome,
                    Err(e) => {
                        report.push(StepOutcome {
                            action: Action::Failed,
                            ..outcome.with_message(e.to_string())
                        });
                        continue;
                    }
                }
            };
            removed.insert(record.record_id);
            report.push(outcome);
        }
        Ok(removed)
    }

    async fn create_requested(&self, request: &ReconcileRequest, report: &mut ReconcileReport) {
        for rdata in &request.rdata {
            let outcome = StepOutcome::record(
                Step::CreateRecord,
                Action::Created,
                &request.zone,
                &request.node,
                request.record_type,
            )
            .with_ttl(request.ttl)
            .with_data(rdata);

            let fields = match mapper::format_record(request.record_type, rdata) {
                Ok(fields) => fields,
                Err(e) => {
                    report.push(StepOutcome {
                        action: Action::Skipped,
                        ..outcome.with_message(e.to_string())
                    });
                    continue;
                }
            };

            let action = if request.dry_run {
                Action::WillCreate
            } else {
                match self
                    .api
                    .create_record(
                        &request.zone,
                        &request.node,
                        request.record_type,
                        request.ttl,
                        &fields,
                    )
                    .await
                {
                    Ok(()) => Action::Created,
                    Err(e) => {
                        report.push(StepOutcome {
                            action: Action::Failed,
                            ..outcome.with_message(e.to_string())
                        });
                        continue;
                    }
                }
            };
            report.push(StepOutcome { action, ..outcome });
        }
    }

    /// Best-effort: failures are reported, never raised.
    async fn delete_empty_node(
        &self,
        request: &ReconcileRequest,
        removed: &HashSet<String>,
        report: &mut ReconcileReport,
    ) {
        let failed = |e: DynectError| {
            StepOutcome::node(Step::DeleteNode, Action::Failed, &request.zone, &request.node)
                .with_message(e.to_string())
        };

        match self.api.node_exists(&request.zone, &request.node).await {
            Ok(true) => {}
            Ok(false) => {
                log::debug!("[reconcile] Node {} does not exist", request.node);
                return;
            }
            Err(e) => return report.push(failed(e)),
        }

        let remaining = match self
            .api
            .list_all_records(&request.zone, &request.node)
            .await
        {
            Ok(records) => records
                .into_iter()
                .filter(|r| !removed.contains(&r.record_id))
                .count(),
            Err(e) => return report.push(failed(e)),
        };
        if remaining > 0 {
            log::debug!(
                "[reconcile] Keeping node {}, {remaining} record(s) left",
                request.node
            );
            return;
        }

        let action = if request.dry_run {
            Action::WillDelete
        } else {
            match self.api.delete_node(&request.zone, &request.node).await {
                Ok(()) => Action::Deleted,
                Err(e) => return report.push(failed(e)),
            }
        };
        report.push(StepOutcome::node(
            Step::DeleteNode,
            action,
            &request.zone,
            &request.node,
        ));
    }
}

fn aborted(operation: &str, request: &ReconcileRequest, source: DynectError) -> CoreError {
    CoreError::Aborted {
        operation: operation.to_string(),
        zone: request.zone.clone(),
        node: request.node.clone(),
        source,
    }
}
