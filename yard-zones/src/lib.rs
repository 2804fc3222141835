//! # yard-zones
//!
//! Zone classifier: splits a fleet's geofence zones into regular zones and
//! "Yard Move Zones" by zone-type membership, and moves single zones between
//! the two sets while keeping the remote system of record and the local
//! collections consistent.
//!
//! ## Pieces
//!
//! - [`resolver`]: find the distinguished zone type by exact name
//! - [`partition`]: stable, disjoint split of the zone list
//! - [`filter`] / [`debounce`]: search views over each list
//! - [`ZoneClassifier`]: session-owned state, loading, moving
//! - [`drag`]: drag-and-drop gesture state machine driving moves
//! - [`export`] / [`stats`] / [`snapshot`]: derived outputs
//!
//! ## Example
//!
//! ```ignore
//! use yard_zones::{ZoneClassifier, ZoneList};
//!
//! let classifier = ZoneClassifier::activate(client, TracingAlerts).await?;
//! classifier.move_zone("b2F", ZoneList::YardMove).await?;
//! ```

mod classifier;
pub mod debounce;
pub mod drag;
mod error;
pub mod export;
pub mod filter;
mod inflight;
mod mover;
pub mod partition;
pub mod resolver;
pub mod snapshot;
pub mod stats;

// Re-exports
pub use classifier::{LoadOutcome, ZoneClassifier};
pub use debounce::{DEFAULT_SEARCH_DEBOUNCE, SearchDebouncer};
pub use drag::{DragController, DragPayload, DragState, DropDecision, DropOutcome};
pub use error::{ExportError, LoadError, MoveError};
pub use export::ExportFormat;
pub use filter::{FilteredView, filter_zones};
pub use mover::{MoveOutcome, edit_zone_types};
pub use partition::{ZoneList, ZonePartition, is_yard_move};
pub use resolver::{YARD_MOVE_ZONES, resolve_yard_move_type};
pub use snapshot::{BoardSnapshot, ListSnapshot, ZoneRow};
pub use stats::ZoneStats;
