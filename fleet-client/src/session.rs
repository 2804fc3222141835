//! Session context
//!
//! A session is established once, up front, by [`GeotabClient::connect`]
//! and attached to every subsequent call.
//!
//! [`GeotabClient::connect`]: crate::GeotabClient::connect

use crate::config::server_base;
use serde::{Deserialize, Serialize};

/// Credentials sent with every call
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    pub database: String,
    pub user_name: String,
    pub session_id: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("database", &self.database)
            .field("user_name", &self.user_name)
            .field("session_id", &"***")
            .finish()
    }
}

/// An established session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    /// Server that owns the database (after any `Authenticate` redirect)
    pub server: String,
    pub credentials: Credentials,
}

impl SessionContext {
    pub fn database(&self) -> &str {
        &self.credentials.database
    }

    pub fn user_name(&self) -> &str {
        &self.credentials.user_name
    }

    /// Link to a page of the platform's web UI for this database
    pub fn page_url(&self, fragment: &str) -> String {
        format!(
            "{}/{}/#{}",
            server_base(&self.server),
            self.credentials.database,
            fragment
        )
    }

    /// Link to a device's page
    pub fn device_url(&self, device_id: &str) -> String {
        self.page_url(&format!("device,id:{}", device_id))
    }

    /// Link to the zone editor, where new zones are drawn
    pub fn create_zone_url(&self) -> String {
        self.page_url("zones")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> SessionContext {
        SessionContext {
            server: "my3.geotab.com".into(),
            credentials: Credentials {
                database: "traxxisdemo".into(),
                user_name: "ops@example.com".into(),
                session_id: "s-42".into(),
            },
        }
    }

    #[test]
    fn test_links() {
        let s = session();
        assert_eq!(
            s.device_url("b3A"),
            "https://my3.geotab.com/traxxisdemo/#device,id:b3A"
        );
        assert_eq!(s.create_zone_url(), "https://my3.geotab.com/traxxisdemo/#zones");
    }

    #[test]
    fn test_credentials_wire_shape() {
        let json = serde_json::to_value(&session().credentials).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "database": "traxxisdemo",
                "userName": "ops@example.com",
                "sessionId": "s-42"
            })
        );
        assert!(!format!("{:?}", session()).contains("s-42"));
    }
}
