//! Console configuration
//!
//! Every setting can come from the environment (a `.env` file is loaded
//! first); command-line flags take precedence.

use clap::Args;
use fleet_client::ClientConfig;
use fleet_client::config::DEFAULT_SERVER;

/// Connection to the fleet platform
#[derive(Debug, Clone, Args)]
pub struct ConnectionArgs {
    /// API host, or a full http(s) base URL
    #[arg(long, env = "GEOTAB_SERVER", default_value = DEFAULT_SERVER)]
    pub server: String,

    /// Database (tenant) name
    #[arg(long, env = "GEOTAB_DATABASE", default_value = "")]
    pub database: String,

    /// Login user name
    #[arg(long = "user", env = "GEOTAB_USERNAME", default_value = "")]
    pub user_name: String,

    #[arg(long, env = "GEOTAB_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Reuse an existing session instead of authenticating
    #[arg(long, env = "GEOTAB_SESSION_ID", hide_env_values = true)]
    pub session_id: Option<String>,

    /// Request timeout in seconds
    #[arg(long, env = "GEOTAB_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout: u64,
}

impl ConnectionArgs {
    pub fn client_config(&self) -> ClientConfig {
        let mut config = ClientConfig::new(&self.server)
            .with_database(&self.database)
            .with_user(&self.user_name)
            .with_timeout(self.timeout);
        if let Some(password) = self.password.as_deref().filter(|p| !p.is_empty()) {
            config = config.with_password(password);
        }
        if let Some(session_id) = self.session_id.as_deref().filter(|s| !s.is_empty()) {
            config = config.with_session_id(session_id);
        }
        config
    }
}

/// Log output
#[derive(Debug, Clone, Args)]
pub struct LogArgs {
    /// Default filter when RUST_LOG is unset
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// JSON log lines
    #[arg(long, env = "LOG_JSON", default_value_t = false)]
    pub log_json: bool,

    /// Also write daily-rotated log files here
    #[arg(long, env = "LOG_DIR")]
    pub log_dir: Option<String>,
}
