//! Client configuration

use crate::{ClientError, ClientResult};

/// Default API host
pub const DEFAULT_SERVER: &str = "my.geotab.com";

/// Client configuration for connecting to the fleet API
#[derive(Clone)]
pub struct ClientConfig {
    /// API host (e.g., "my.geotab.com"); a full `http(s)://` base is used as-is
    pub server: String,

    /// Database (tenant) name
    pub database: String,

    /// Login user name
    pub user_name: String,

    /// Password, exchanged for a session id by `Authenticate`
    pub password: Option<String>,

    /// Pre-issued session id; skips `Authenticate` when set
    pub session_id: Option<String>,

    /// Request timeout in seconds
    pub timeout: u64,
}

impl ClientConfig {
    /// Create a new configuration for the given server
    pub fn new(server: impl Into<String>) -> Self {
        Self {
            server: server.into(),
            database: String::new(),
            user_name: String::new(),
            password: None,
            session_id: None,
            timeout: 30,
        }
    }

    /// Set the database name
    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = database.into();
        self
    }

    /// Set the user name
    pub fn with_user(mut self, user_name: impl Into<String>) -> Self {
        self.user_name = user_name.into();
        self
    }

    /// Set the password
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Set a pre-issued session id
    pub fn with_session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// JSON-RPC endpoint for this configuration's server
    pub fn api_url(&self) -> String {
        api_url(&self.server)
    }

    /// Check that a session can be established from this configuration
    pub fn validate(&self) -> ClientResult<()> {
        if self.server.trim().is_empty() {
            return Err(ClientError::Config("server must not be empty".into()));
        }
        if self.database.trim().is_empty() {
            return Err(ClientError::Config("database must not be empty".into()));
        }
        if self.user_name.trim().is_empty() {
            return Err(ClientError::Config("user name must not be empty".into()));
        }
        let has_password = self.password.as_deref().is_some_and(|p| !p.is_empty());
        let has_session = self.session_id.as_deref().is_some_and(|s| !s.is_empty());
        if !has_password && !has_session {
            return Err(ClientError::Config(
                "either a password or a session id is required".into(),
            ));
        }
        Ok(())
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_SERVER)
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("server", &self.server)
            .field("database", &self.database)
            .field("user_name", &self.user_name)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("session_id", &self.session_id.as_ref().map(|_| "***"))
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Base URL of a server: bare hosts get `https://`
pub(crate) fn server_base(server: &str) -> String {
    let server = server.trim_end_matches('/');
    if server.starts_with("http://") || server.starts_with("https://") {
        server.to_string()
    } else {
        format!("https://{}", server)
    }
}

pub(crate) fn api_url(server: &str) -> String {
    format!("{}/apiv1", server_base(server))
}
