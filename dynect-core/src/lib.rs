//! Dynect Core Library
//!
//! Reconciles the records of one node and type in a Dynect zone against a
//! desired set:
//! - ensure the node exists
//! - replace every record of the type with the requested ones
//! - remove the node once a pure deletion leaves it empty
//!
//! The service works against the [`DynectApi`] trait, so it can run over the
//! HTTP provider or any other implementation.

pub mod error;
pub mod services;
pub mod types;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use dynect_provider::DynectApi;
pub use error::{CoreError, CoreResult};
pub use services::ReconcileService;
pub use types::{Action, ReconcileReport, ReconcileRequest, Step, StepOutcome};
