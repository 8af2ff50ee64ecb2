//! Business logic service layer

mod reconcile_service;

pub use reconcile_service::ReconcileService;
