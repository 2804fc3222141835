//! # asset-mappings
//!
//! Read-only viewer for the mapping between third-party (Ruckit) devices
//! and the fleet platform's devices. Mappings are stored as add-in data
//! records of type `ri-device`; this crate fetches them, projects them
//! into display rows, and exports them as CSV.

mod error;
mod row;
mod viewer;

pub use error::{ExportError, ExportResult};
pub use row::{CSV_HEADER, MappingRow, NOT_AVAILABLE};
pub use viewer::{AssetMappingViewer, EXPORT_PREFIX, MAPPING_WHERE_CLAUSE};
