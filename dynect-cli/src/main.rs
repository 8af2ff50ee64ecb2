//! `dynect` command line entry point.
//!
//! Loads credentials, logs in, and reconciles one node and record type. Each
//! step is logged as it happens; the exit code is non-zero when the run aborts
//! or any step failed.

mod cli;
mod credentials;

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use dynect_core::{ReconcileReport, ReconcileRequest, ReconcileService};
use dynect_provider::{ApiClient, ClientConfig, DynectProvider};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{Cli, Verbosity};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbosity);

    match run(&cli).await {
        Ok(report) => {
            if cli.json {
                match serde_json::to_string_pretty(&report) {
                    Ok(json) => println!("{json}"),
                    Err(e) => tracing::error!("Failed to render report: {e}"),
                }
            }
            if report.has_failures() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr so `--json` output stays clean. Records from the `log`
/// facade used by the libraries are captured as well.
fn init_tracing(verbosity: Verbosity) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.as_filter()));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .without_time()
                .with_target(false),
        )
        .init();
}

async fn run(cli: &Cli) -> Result<ReconcileReport> {
    let credentials = credentials::load(&cli.credentials_file)?;
    let node = cli.resolve_node().await?;
    let zone = cli.resolve_zone(&node)?;

    let request = ReconcileRequest::new(zone, node, cli.record_type, cli.ttl)
        .with_rdata(cli.rdata_entries())
        .dry_run(cli.dry_run);

    let client = ApiClient::new(ClientConfig::default().with_base_url(cli.api_url.clone()))?;
    let provider = DynectProvider::login(client, &credentials)
        .await
        .context("Login failed")?;

    let service = ReconcileService::new(Arc::new(provider));
    let report = service.reconcile(&request).await?;

    tracing::info!(
        "Reconciled {} {} {}: {} step(s){}",
        request.zone,
        request.node,
        request.record_type,
        report.outcomes().len(),
        if report.has_failures() {
            ", with failures"
        } else {
            ""
        }
    );
    Ok(report)
}
