//! Zone Model

use super::null_as_default;
use crate::Entity;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Boundary point of a zone (x = longitude, y = latitude)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub x: f64,
    pub y: f64,
}

/// Reference from a zone to a zone type
///
/// System zone types are sent as bare strings (`"ZoneTypeCustomerId"`),
/// user-defined ones as `{ "id": "b12" }`. Both shapes round-trip as received.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ZoneTypeRef {
    Builtin(String),
    Custom { id: String },
}

impl ZoneTypeRef {
    /// Reference to a user-defined zone type
    pub fn custom(id: impl Into<String>) -> Self {
        Self::Custom { id: id.into() }
    }

    pub fn id(&self) -> &str {
        match self {
            Self::Builtin(id) => id,
            Self::Custom { id } => id,
        }
    }
}

/// Geofenced zone
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Zone {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// Zone type references; set semantics by id despite the ordered storage
    #[serde(default, deserialize_with = "null_as_default")]
    pub zone_types: Vec<ZoneTypeRef>,
    /// Boundary, passed through unmodified
    #[serde(default, deserialize_with = "null_as_default")]
    pub points: Vec<GeoPoint>,
    /// Optimistic-concurrency token
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Fields not modeled here, carried through updates untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Zone {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            zone_types: Vec::new(),
            points: Vec::new(),
            version: None,
            extra: Map::new(),
        }
    }

    pub fn with_zone_type(mut self, zone_type: ZoneTypeRef) -> Self {
        self.zone_types.push(zone_type);
        self
    }

    pub fn with_points(mut self, points: Vec<GeoPoint>) -> Self {
        self.points = points;
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Whether any zone type reference carries `zone_type_id`
    pub fn has_zone_type(&self, zone_type_id: &str) -> bool {
        self.zone_types.iter().any(|t| t.id() == zone_type_id)
    }

    /// Zone type ids in stored order
    pub fn zone_type_ids(&self) -> impl Iterator<Item = &str> {
        self.zone_types.iter().map(ZoneTypeRef::id)
    }
}

impl Entity for Zone {
    const TYPE_NAME: &'static str = "Zone";

    fn entity_id(&self) -> Option<&str> {
        Some(&self.id)
    }
}
