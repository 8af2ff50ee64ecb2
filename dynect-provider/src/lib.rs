//! # dynect-provider
//!
//! Client for the Dyn Managed DNS (Dynect) REST API: session login, job
//! redirect following, error classification, and the record schema used to
//! turn raw rdata text into the structured objects the API expects.
//!
//! ## Modules
//!
//! | Concern | Entry point |
//! |---------|-------------|
//! | Session and retry loop | [`ApiClient`] |
//! | Response classification | [`classifier::decode`] |
//! | Record schema | [`RecordType`], [`fields_for`] |
//! | Rdata mapping | [`mapper::format`] |
//! | Typed node/record operations | [`DynectApi`], [`DynectProvider`] |
//!
//! ## Feature Flags
//!
//! - **`native-tls`** *(default)*: use the platform's native TLS implementation.
//! - **`rustls`**: use rustls.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use dynect_provider::{
//!     ApiClient, ClientConfig, Credentials, DynectApi, DynectProvider, RecordType, mapper,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ApiClient::new(ClientConfig::default())?;
//!     let provider =
//!         DynectProvider::login(client, &Credentials::new("acme", "ops", "secret")).await?;
//!
//!     if !provider.node_exists("example.org", "www.example.org.").await? {
//!         provider.create_node("example.org", "www.example.org.").await?;
//!     }
//!
//!     let fields = mapper::format("A", "192.0.2.10")?;
//!     provider
//!         .create_record("example.org", "www.example.org.", RecordType::A, 3600, &fields)
//!         .await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Every operation returns [`Result<T, DynectError>`](DynectError):
//!
//! - [`DynectError::Api`]: the provider reported a known error code, see [`ApiErrorKind`]
//! - [`DynectError::OperationTimedOut`]: the job was still pending after the last try
//! - [`DynectError::FieldCountMismatch`]: rdata did not fit the record schema
//! - [`DynectError::NetworkError`] / [`DynectError::Timeout`]: transport failures
//!
//! Transport failures are not retried. Only job redirects are polled, with a
//! fixed delay between tries.

pub mod classifier;
mod client;
mod error;
mod http_client;
pub mod mapper;
mod provider;
mod resource;
mod schema;
mod session;
mod trace;
mod traits;
mod types;
pub mod utils;

#[cfg(test)]
mod test_utils;

// Re-export error types
pub use error::{ApiErrorKind, DynectError, Result};

// Client and session
pub use client::{
    ApiClient, ClientConfig, DEFAULT_BASE_URL, DEFAULT_MAX_TRIES, DEFAULT_RETRY_DELAY,
};
pub use session::{AUTH_TOKEN_HEADER, Session};

// Transport seam
pub use http_client::{
    DEFAULT_CONNECT_TIMEOUT, DEFAULT_REQUEST_TIMEOUT, HttpRequest, HttpResponse, HttpTransport,
    ReqwestTransport,
};
pub use trace::{LogSink, NullSink, TraceEvent, TraceSink};

// Schema and paths
pub use resource::{ROOT_SEGMENT, ResourcePath};
pub use schema::{RecordType, fields_for};

// Typed operations
pub use provider::DynectProvider;
pub use traits::DynectApi;

// Re-export types
pub use types::{Credentials, Envelope, EnvelopeStatus, FieldMap, Message, Record, Verb};
