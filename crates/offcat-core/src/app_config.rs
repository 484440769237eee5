use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Application configuration shared by the server and the CLI.
///
/// Everything is defaulted; the upstream is a public API and needs no
/// credentials.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// Base URL of the upstream product database.
    pub upstream_base_url: String,
    /// Ceiling on every upstream listing/search call.
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub default_page_size: u32,
    pub max_page_size: u32,
    /// How many category names the category enumeration returns.
    pub categories_limit: usize,
    /// Where the CLI persists the session cart.
    pub cart_path: PathBuf,
}
