//! Add-in data Model
//!
//! Free-form JSON documents stored by add-ins. The asset-mapping records
//! (third-party device ↔ platform device) live in `details`.

use super::null_as_default;
use crate::Entity;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Add-in data record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddInData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub add_in_id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub details: Map<String, Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AddInData {
    /// A `details` entry as text; numbers are rendered, empty strings count as missing
    pub fn detail(&self, key: &str) -> Option<String> {
        match self.details.get(key)? {
            Value::String(s) if s.is_empty() => None,
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }
}

impl Entity for AddInData {
    const TYPE_NAME: &'static str = "AddInData";

    fn entity_id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_detail_lookup() {
        let data: AddInData = serde_json::from_value(json!({
            "id": "aXyZ",
            "details": {
                "type": "ri-device",
                "name": "Truck 12",
                "ri-device": 4471,
                "ri-token": ""
            }
        }))
        .unwrap();

        assert_eq!(data.detail("name").as_deref(), Some("Truck 12"));
        assert_eq!(data.detail("ri-device").as_deref(), Some("4471"));
        assert_eq!(data.detail("ri-token"), None);
        assert_eq!(data.detail("gt-device"), None);
    }

    #[test]
    fn test_null_details() {
        let data: AddInData = serde_json::from_value(json!({ "details": null })).unwrap();
        assert!(data.details.is_empty());
    }
}
