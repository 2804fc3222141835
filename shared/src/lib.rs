//! Shared types for the fleet add-in workspace
//!
//! Record types exchanged with the remote fleet-management API, the
//! `Entity` binding between a Rust type and its remote `typeName`, and
//! the alert types both add-in modules report through.

pub mod alert;
pub mod entity;
pub mod export;
pub mod models;

// Re-exports
pub use alert::{Alert, AlertLevel, AlertSink, RecordingAlerts, TracingAlerts};
pub use entity::{Entity, Search};
pub use models::{AddInData, GeoPoint, Zone, ZoneType, ZoneTypeRef};
pub use serde::{Deserialize, Serialize};
