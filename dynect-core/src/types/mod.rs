//! Type definition module

mod report;
mod request;

pub use report::{Action, ReconcileReport, Step, StepOutcome};
pub use request::ReconcileRequest;

// Re-export public types of the provider library
pub use dynect_provider::{FieldMap, Record, RecordType};
