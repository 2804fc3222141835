//! Zone Type Model

use super::null_as_default;
use crate::Entity;
use serde::{Deserialize, Serialize};

/// Zone type (category) definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneType {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl ZoneType {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            comment: None,
            version: None,
        }
    }
}

impl Entity for ZoneType {
    const TYPE_NAME: &'static str = "ZoneType";

    fn entity_id(&self) -> Option<&str> {
        Some(&self.id)
    }
}
