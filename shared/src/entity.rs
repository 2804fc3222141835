//! Entity binding and search criteria

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// A record type stored by the remote fleet API.
///
/// `TYPE_NAME` is the `typeName` parameter sent with every `Get`/`Set`.
pub trait Entity: Serialize + DeserializeOwned + Send + Sync + 'static {
    const TYPE_NAME: &'static str;

    /// Identifier assigned by the remote system, if the record has one yet
    fn entity_id(&self) -> Option<&str>;
}

/// Search criteria for `Get`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Search {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub where_clause: Option<String>,
}

impl Search {
    /// Look up a single record by identifier
    pub fn by_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Default::default()
        }
    }

    /// Filter with a server-side where clause (e.g. `type = "ri-device"`)
    pub fn where_clause(clause: impl Into<String>) -> Self {
        Self {
            where_clause: Some(clause.into()),
            ..Default::default()
        }
    }
}
