//! Fleet Client - client for the remote fleet-management API
//!
//! The remote API is a JSON-RPC endpoint exposing `Authenticate`, `Get` and
//! `Set` over typed records. [`FleetApi`] is the seam the add-ins are written
//! against; [`GeotabClient`] talks to the real service and, with the
//! `in-memory` feature, [`InMemoryFleet`] stands in for it.

pub mod api;
pub mod config;
pub mod error;
pub mod http;
#[cfg(feature = "in-memory")]
pub mod memory;
pub mod session;

pub use api::FleetApi;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::GeotabClient;
#[cfg(feature = "in-memory")]
pub use memory::{InMemoryFleet, Method, RecordedCall};
pub use session::{Credentials, SessionContext};

// Re-export shared types for convenience
pub use shared::{AddInData, Entity, Search, Zone, ZoneType, ZoneTypeRef};
