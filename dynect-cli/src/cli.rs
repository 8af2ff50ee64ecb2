//! Command line arguments and the defaults derived from them.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use dynect_provider::{DEFAULT_BASE_URL, RecordType};
use hickory_resolver::TokioResolver;
use hickory_resolver::proto::rr::{Record, RecordType as DnsRecordType};

/// Replace the records of one node and type in a Dynect zone.
///
/// With no RDATA the records of the type are deleted, and the node too once
/// nothing else is left on it.
#[derive(Parser, Debug)]
#[command(
    name = "dynect",
    version,
    about,
    after_help = "Example: dynect -n _sip._tcp.example.org. -t SRV 0 10 5061 sip.example.org."
)]
pub struct Cli {
    /// File whose first line holds `customer username password`
    #[arg(
        short = 'c',
        long,
        default_value = "./dynect4r.secret",
        env = "DYNECT_CREDENTIALS_FILE"
    )]
    pub credentials_file: PathBuf,

    /// DNS zone (defaults to the node name minus its first label)
    #[arg(short, long)]
    pub zone: Option<String>,

    /// Node name (defaults to the canonical name of the local host)
    #[arg(short, long)]
    pub node: Option<String>,

    /// Time to live
    #[arg(short = 's', long, default_value_t = 86400)]
    pub ttl: u32,

    /// Record type
    #[arg(short = 't', long = "type", default_value = "A")]
    pub record_type: RecordType,

    /// Log verbosity
    #[arg(short, long, value_enum, default_value_t = Verbosity::Warn)]
    pub verbosity: Verbosity,

    /// Report what would change without changing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Print the report as JSON on stdout
    #[arg(long)]
    pub json: bool,

    /// API endpoint
    #[arg(long, default_value = DEFAULT_BASE_URL, env = "DYNECT_API_URL")]
    pub api_url: String,

    /// Record data; separate multiple records with commas
    #[arg(value_name = "RDATA")]
    pub rdata: Vec<String>,
}

/// Log level selected with `--verbosity`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Verbosity {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl Verbosity {
    /// `EnvFilter` directive.
    pub fn as_filter(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}

impl Cli {
    /// Node from `--node`, else the local hostname resolved to its canonical
    /// name. The bare hostname is used when resolution fails.
    pub async fn resolve_node(&self) -> Result<String> {
        if let Some(node) = &self.node {
            return Ok(node.clone());
        }
        let env = std::env::var("HOSTNAME").ok();
        let file = std::fs::read_to_string("/etc/hostname").ok();
        let host =
            local_hostname(env, file).context("Cannot determine the local hostname, pass --node")?;

        let canonical = canonical_name(&host).await;
        Ok(absolute(canonical.as_deref().unwrap_or(&host)))
    }

    /// Zone from `--zone`, else derived from `node`.
    pub fn resolve_zone(&self, node: &str) -> Result<String> {
        match &self.zone {
            Some(zone) => Ok(zone.clone()),
            None => derive_zone(node)
                .with_context(|| format!("Cannot derive a zone from node {node:?}, pass --zone")),
        }
    }

    /// RDATA arguments as one entry per record.
    pub fn rdata_entries(&self) -> Vec<String> {
        split_rdata(&self.rdata)
    }
}

/// First non-empty hostname source.
fn local_hostname(env: Option<String>, file: Option<String>) -> Option<String> {
    [env, file]
        .into_iter()
        .flatten()
        .map(|h| h.trim().to_string())
        .find(|h| !h.is_empty())
}

/// Look `host` up through the system resolver, search domains included.
async fn canonical_name(host: &str) -> Option<String> {
    let resolver = match TokioResolver::builder_tokio() {
        Ok(builder) => builder.build(),
        Err(e) => {
            tracing::debug!("No system resolver configuration: {e}");
            return None;
        }
    };
    match resolver.lookup_ip(host).await {
        Ok(lookup) => address_owner(lookup.as_lookup().record_iter()),
        Err(e) => {
            tracing::debug!("Cannot resolve {host}: {e}");
            None
        }
    }
}

/// Owner name of the first address record, past any CNAME chain.
fn address_owner<'a>(records: impl IntoIterator<Item = &'a Record>) -> Option<String> {
    records
        .into_iter()
        .find(|r| matches!(r.record_type(), DnsRecordType::A | DnsRecordType::AAAA))
        .map(|r| r.name().to_utf8())
}

/// `host` with exactly one trailing dot.
fn absolute(host: &str) -> String {
    format!("{}.", host.trim_end_matches('.'))
}

/// Text after the node's first label, without the trailing dot.
fn derive_zone(node: &str) -> Option<String> {
    node.split_once('.')
        .map(|(_, rest)| rest.trim_end_matches('.'))
        .filter(|zone| !zone.is_empty())
        .map(str::to_string)
}

/// Join the arguments with spaces and split the result on commas.
fn split_rdata(args: &[String]) -> Vec<String> {
    args.join(" ")
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}
