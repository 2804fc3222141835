//! Error types for the zone classifier

use crate::ZoneList;
use fleet_client::ClientError;
use thiserror::Error;

/// Loading zones and zone types failed
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to load zones: {0}")]
    Fetch(#[from] ClientError),
}

/// A single reclassification was refused or failed.
///
/// Whatever the variant, local state is exactly what it was before the attempt.
#[derive(Debug, Error)]
pub enum MoveError {
    /// The "Yard Move Zones" zone type does not exist in this database
    #[error("\"Yard Move Zones\" zone type not found; zones cannot be moved")]
    CategoryMissing,

    #[error("Zone {0} is not loaded")]
    UnknownZone(String),

    #[error("{zone_name} is already in {list}")]
    AlreadyInList { zone_name: String, list: ZoneList },

    /// Another move of the same zone has not finished yet
    #[error("{zone_name} is already being moved")]
    InFlight { zone_name: String },

    #[error("Failed to read {zone_name}: {source}")]
    Fetch {
        zone_name: String,
        source: ClientError,
    },

    /// The zone was deleted remotely since the last load
    #[error("{zone_name} no longer exists")]
    Vanished { zone_name: String },

    #[error("Failed to update {zone_name}: {source}")]
    Update {
        zone_name: String,
        source: ClientError,
    },
}

impl MoveError {
    /// Refused before any network call
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            Self::CategoryMissing
                | Self::UnknownZone(_)
                | Self::AlreadyInList { .. }
                | Self::InFlight { .. }
        )
    }

    pub fn is_version_conflict(&self) -> bool {
        match self {
            Self::Fetch { source, .. } | Self::Update { source, .. } => {
                source.is_version_conflict()
            }
            _ => false,
        }
    }
}

/// Export failed
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("No data to export")]
    Empty,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
