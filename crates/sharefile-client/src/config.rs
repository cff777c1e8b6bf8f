//! Client configuration

use std::time::Duration;

/// Suffix appended to a session's subdomain to form the API hostname
pub const API_DOMAIN: &str = "sf-api.com";

/// Client configuration
#[derive(Clone, Debug)]
pub struct Config {
    /// Overall request timeout
    pub timeout: Duration,
    /// TCP connect timeout
    pub connect_timeout: Duration,
    /// User agent string
    pub user_agent: String,
    /// Base URL replacing `https://{subdomain}.sf-api.com` for API calls.
    /// Chunk URIs returned by the service are always used verbatim.
    pub api_base: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            user_agent: format!("sharefile-client/{}", env!("CARGO_PKG_VERSION")),
            api_base: None,
        }
    }
}

impl Config {
    /// Create a config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set connect timeout
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set the user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Route API calls to a fixed base URL (proxies, test servers)
    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = Some(base.into().trim_end_matches('/').to_string());
        self
    }

    /// Build the absolute URL for an API path
    pub fn api_url(&self, hostname: &str, path: &str) -> String {
        match &self.api_base {
            Some(base) => format!("{}{}", base, path),
            None => format!("https://{}{}", hostname, path),
        }
    }
}
